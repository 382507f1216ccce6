use super::traits::ConfigSection;
use crate::error::{EvoqueryError, Result};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MutationConfig {
    /// Probability that a leaf alteration stays inside the word's own
    /// synonym category instead of drawing from the whole vocabulary.
    pub keep_similar_word_proba: f64,
    /// Probability that a random-node alteration changes structure rather
    /// than value.
    pub alter_structure_proba: f64,
    /// Probability that a structural alteration of an operation node grows
    /// the subtree rather than shrinking it.
    pub grow_proba: f64,
}

impl Default for MutationConfig {
    fn default() -> Self {
        Self {
            keep_similar_word_proba: 0.7,
            alter_structure_proba: 0.5,
            grow_proba: 0.6,
        }
    }
}

impl ConfigSection for MutationConfig {
    fn section_name() -> &'static str {
        "mutation"
    }

    fn validate(&self) -> Result<()> {
        for (name, value) in [
            ("keep_similar_word_proba", self.keep_similar_word_proba),
            ("alter_structure_proba", self.alter_structure_proba),
            ("grow_proba", self.grow_proba),
        ] {
            if !(0.0..=1.0).contains(&value) {
                return Err(EvoqueryError::Configuration(format!(
                    "{} must be between 0 and 1",
                    name
                )));
            }
        }
        Ok(())
    }
}
