/// Observer of the generational loop.
pub trait ProgressCallback {
    fn on_generation_start(&mut self, generation: usize);
    fn on_generation_complete(&mut self, generation: usize, best_score: f64);
    fn on_member_scored(&mut self, member: usize, total: usize);
}

pub struct ConsoleProgressCallback;

impl ProgressCallback for ConsoleProgressCallback {
    fn on_generation_start(&mut self, generation: usize) {
        println!("Generation {} starting...", generation + 1);
    }

    fn on_generation_complete(&mut self, generation: usize, best_score: f64) {
        println!(
            "Generation {} complete. Best score: {:.4}",
            generation + 1,
            best_score
        );
    }

    fn on_member_scored(&mut self, member: usize, total: usize) {
        if member % 10 == 0 || member == total {
            println!("  Scored {}/{} members", member, total);
        }
    }
}

/// Discards every event. Useful for tests and embedding.
pub struct SilentProgressCallback;

impl ProgressCallback for SilentProgressCallback {
    fn on_generation_start(&mut self, _generation: usize) {}
    fn on_generation_complete(&mut self, _generation: usize, _best_score: f64) {}
    fn on_member_scored(&mut self, _member: usize, _total: usize) {}
}
