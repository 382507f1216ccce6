use crate::config::{ConfigSection, EvolutionConfig, MutationConfig};
use crate::engines::generation::progress::ProgressCallback;
use crate::error::{EvoqueryError, Result};
use crate::tree::RequestTree;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rayon::prelude::*;

/// Externally supplied fitness function. Must be total over any structurally
/// valid request tree: an unscoreable tree gets a sentinel number (for
/// example `f64::NEG_INFINITY`), never an error, so the population always
/// has a total order.
pub trait Scorer: Sync {
    fn score(&self, tree: &RequestTree) -> f64;
}

impl<F> Scorer for F
where
    F: Fn(&RequestTree) -> f64 + Sync,
{
    fn score(&self, tree: &RequestTree) -> f64 {
        self(tree)
    }
}

/// Elitist generational search over a population of request trees.
///
/// Each generation scores every member once, keeps the top slice unmutated,
/// refills the population with mutated copies of elite members, and repeats.
/// All randomness flows through one seedable RNG so runs are reproducible.
pub struct GeneticSearch<S: Scorer> {
    config: EvolutionConfig,
    mutation: MutationConfig,
    scorer: S,
    rng: StdRng,
}

impl<S: Scorer> GeneticSearch<S> {
    pub fn new(config: EvolutionConfig, mutation: MutationConfig, scorer: S) -> Self {
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Self {
            config,
            mutation,
            scorer,
            rng,
        }
    }

    /// Run the full generational loop from `initial` and return the
    /// best-scoring member of the final population.
    pub fn run<C: ProgressCallback>(
        &mut self,
        initial: RequestTree,
        callback: &mut C,
    ) -> Result<RequestTree> {
        self.config.validate()?;
        self.mutation.validate()?;

        let mut population = self.initialize_population(initial)?;

        for generation in 0..self.config.nb_generations {
            callback.on_generation_start(generation);

            let scores = self.evaluate_population(&population, callback);

            let mut ranked: Vec<(RequestTree, f64)> = population.into_iter().zip(scores).collect();
            ranked.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(std::cmp::Ordering::Equal));

            let best_score = ranked[0].1;
            callback.on_generation_complete(generation, best_score);
            log::debug!(
                "generation {}: best score {:.4}, best query {}",
                generation,
                best_score,
                ranked[0].0
            );

            if generation == self.config.nb_generations - 1 {
                population = ranked.into_iter().map(|(tree, _)| tree).collect();
                break;
            }

            population = self.next_generation(ranked)?;
        }

        population
            .into_iter()
            .next()
            .ok_or_else(|| EvoqueryError::Configuration("population is empty".to_string()))
    }

    /// Member 0 is the caller's tree unchanged; every other member is a deep
    /// copy mutated a uniform number of times in [0, max_initial_alterations].
    fn initialize_population(&mut self, initial: RequestTree) -> Result<Vec<RequestTree>> {
        let mut population = Vec::with_capacity(self.config.population_size);
        population.push(initial);
        while population.len() < self.config.population_size {
            let mut member = population[0].clone();
            let alterations = self.rng.gen_range(0..=self.config.max_initial_alterations);
            member.apply_alterations(alterations, &self.mutation, &mut self.rng)?;
            population.push(member);
        }
        Ok(population)
    }

    /// Score every member exactly once. The parallel path fans the calls out
    /// with rayon; indexed collection keeps the score-to-member association
    /// intact, so elitism ordering is unaffected by evaluation order.
    fn evaluate_population<C: ProgressCallback>(
        &self,
        population: &[RequestTree],
        callback: &mut C,
    ) -> Vec<f64> {
        if self.config.parallel_scoring {
            return population
                .par_iter()
                .map(|tree| self.scorer.score(tree))
                .collect();
        }

        let total = population.len();
        population
            .iter()
            .enumerate()
            .map(|(i, tree)| {
                let score = self.scorer.score(tree);
                callback.on_member_scored(i + 1, total);
                score
            })
            .collect()
    }

    /// Keep the elite slice unmutated and refill the rest of the population
    /// with mutated copies of uniformly drawn elite members.
    fn next_generation(&mut self, ranked: Vec<(RequestTree, f64)>) -> Result<Vec<RequestTree>> {
        let elite_count = self.config.elite_count();
        let elite: Vec<RequestTree> = ranked
            .into_iter()
            .take(elite_count)
            .map(|(tree, _)| tree)
            .collect();

        let mut next = elite.clone();
        while next.len() < self.config.population_size {
            let parent = &elite[self.rng.gen_range(0..elite.len())];
            let mut child = parent.clone();
            let alterations = self
                .rng
                .gen_range(0..=self.config.max_alterations_per_generation);
            child.apply_alterations(alterations, &self.mutation, &mut self.rng)?;
            next.push(child);
        }
        Ok(next)
    }
}
