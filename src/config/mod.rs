pub mod evolution;
pub mod manager;
pub mod mutation;
pub mod traits;

pub use evolution::EvolutionConfig;
pub use manager::{AppConfig, ConfigManager};
pub use mutation::MutationConfig;
pub use traits::ConfigSection;
