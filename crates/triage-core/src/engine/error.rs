use thiserror::Error;

use super::config::ConfigError;

#[derive(Debug, Error)]
pub enum EngineError {
    #[error("Configuration error: {source}")]
    Config {
        #[from]
        source: ConfigError,
    },

    #[error(
        "Escalation exhausted: {survivors} candidate(s) survived, {minimum} required"
    )]
    InsufficientSurvivors { survivors: usize, minimum: usize },

    #[error("Internal logic error: {0}")]
    Internal(String),
}
