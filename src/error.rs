use thiserror::Error;

#[derive(Error, Debug)]
pub enum EvoqueryError {
    #[error("Invalid tree structure: {0}")]
    Structural(String),

    #[error("Malformed serialized tree: {0}")]
    Format(String),

    #[error("Unknown vocabulary word: {0}")]
    Lookup(String),

    #[error("Invalid vocabulary: {0}")]
    VocabularyFormat(String),

    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serde error: {0}")]
    Serde(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, EvoqueryError>;
