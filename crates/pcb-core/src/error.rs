use thiserror::Error;

/// Hard failures of a forecast run. Record-level defects never surface here.
#[derive(Debug, Error)]
pub enum CoreError {
    #[error("Run date is required (YYYY-MM-DD)")]
    MissingRunDate,
    #[error("Invalid date: {0}")]
    InvalidDate(String),
    #[error("Invalid window: {0}")]
    InvalidWindow(String),
    #[error("Invalid run parameter: {0}")]
    InvalidParameter(String),
    #[error("Record source error: {0}")]
    Source(String),
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<pcb_domain::DateWindowError> for CoreError {
    fn from(err: pcb_domain::DateWindowError) -> Self {
        CoreError::InvalidWindow(err.to_string())
    }
}
