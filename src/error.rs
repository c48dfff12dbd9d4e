
use thiserror::Error;

#[derive(Error, Debug)]
pub enum MillesimeError {
    #[error("Config error: {0}")]
    Config(String),
    #[error("Catalog error: {0}")]
    Catalog(String),
    #[error("Input error: {0}")]
    Input(String),
    #[error("Internal invariant violated: {0}")]
    Invariant(String),
}

pub type Result<T> = std::result::Result<T, MillesimeError>;

// Helper conversions
impl From<config::ConfigError> for MillesimeError {
    fn from(e: config::ConfigError) -> Self { Self::Config(e.to_string()) }
}
