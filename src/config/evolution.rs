use super::traits::ConfigSection;
use crate::error::{EvoqueryError, Result};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EvolutionConfig {
    pub population_size: usize,
    pub nb_generations: usize,
    /// Upper bound (inclusive) of the uniform mutation-count draw applied to
    /// each non-seed member when the population is first built.
    pub max_initial_alterations: usize,
    /// Upper bound (inclusive) of the uniform mutation-count draw applied to
    /// each refilled member every generation.
    pub max_alterations_per_generation: usize,
    /// Fraction of the population retained unmutated each generation.
    pub elitism_rate: f64,
    /// Score a generation's members through rayon instead of sequentially.
    pub parallel_scoring: bool,
    /// Fixed RNG seed for reproducible runs; entropy-seeded when absent.
    pub seed: Option<u64>,
}

impl EvolutionConfig {
    /// Number of members kept unmutated each generation.
    pub fn elite_count(&self) -> usize {
        (self.population_size as f64 * self.elitism_rate) as usize
    }
}

impl Default for EvolutionConfig {
    fn default() -> Self {
        Self {
            population_size: 10,
            nb_generations: 20,
            max_initial_alterations: 10,
            max_alterations_per_generation: 5,
            elitism_rate: 0.1,
            parallel_scoring: false,
            seed: None,
        }
    }
}

impl ConfigSection for EvolutionConfig {
    fn section_name() -> &'static str {
        "evolution"
    }

    fn validate(&self) -> Result<()> {
        if self.population_size < 10 {
            return Err(EvoqueryError::Configuration(
                "Population size must be at least 10".to_string(),
            ));
        }
        if self.nb_generations == 0 {
            return Err(EvoqueryError::Configuration(
                "Number of generations must be at least 1".to_string(),
            ));
        }
        if self.elitism_rate <= 0.0 || self.elitism_rate > 1.0 {
            return Err(EvoqueryError::Configuration(
                "Elitism rate must be in (0, 1]".to_string(),
            ));
        }
        if self.elite_count() == 0 {
            return Err(EvoqueryError::Configuration(
                "Elitism rate keeps no member at this population size".to_string(),
            ));
        }
        Ok(())
    }
}
