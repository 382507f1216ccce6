pub mod engine;
pub mod operators;
pub mod progress;

pub use engine::{GeneticSearch, Scorer};
pub use progress::{ConsoleProgressCallback, ProgressCallback, SilentProgressCallback};
