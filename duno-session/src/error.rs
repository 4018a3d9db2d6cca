use duno::UnoError;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SessionError {
    #[error(transparent)]
    Engine(#[from] UnoError),
    #[error("\"{0}\" is not a color that can be chosen")]
    InvalidColor(String),
    #[error("No match with id {0}")]
    UnknownMatch(u64),
    #[error("The match is no longer running")]
    Closed,
    #[error("Invalid configuration for {key}: {reason}")]
    Config { key: &'static str, reason: String },
}

pub type Result<T, E = SessionError> = std::result::Result<T, E>;
