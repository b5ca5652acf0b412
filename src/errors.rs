use thiserror::Error;

use pcb_config::ConfigError;
use pcb_core::CoreError;

/// Error type that captures library-level failures.
#[derive(Debug, Error)]
pub enum PcbError {
    #[error(transparent)]
    Core(#[from] CoreError),
    #[error("Config error: {0}")]
    Config(#[from] ConfigError),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),
}

/// Failures surfaced to the command line user.
#[derive(Debug, Error)]
pub enum CliError {
    #[error("{0}")]
    Usage(String),
    #[error("Unknown command `{input}`")]
    UnknownCommand {
        input: String,
        suggestion: Option<String>,
    },
    #[error(transparent)]
    Pcb(#[from] PcbError),
}

impl From<CoreError> for CliError {
    fn from(err: CoreError) -> Self {
        CliError::Pcb(err.into())
    }
}

impl From<ConfigError> for CliError {
    fn from(err: ConfigError) -> Self {
        CliError::Pcb(err.into())
    }
}

impl From<std::io::Error> for CliError {
    fn from(err: std::io::Error) -> Self {
        CliError::Pcb(err.into())
    }
}

impl From<serde_json::Error> for CliError {
    fn from(err: serde_json::Error) -> Self {
        CliError::Pcb(err.into())
    }
}
