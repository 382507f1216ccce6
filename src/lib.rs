pub mod codec;
pub mod config;
pub mod engines;
pub mod error;
pub mod simplify;
pub mod tree;
pub mod types;
pub mod vocabulary;

pub use config::{AppConfig, ConfigManager, EvolutionConfig, MutationConfig};
pub use engines::generation::{GeneticSearch, ProgressCallback, Scorer};
pub use error::{EvoqueryError, Result};
pub use tree::{Node, RequestTree};
pub use types::{Connective, NodeValue};
pub use vocabulary::Vocabulary;
