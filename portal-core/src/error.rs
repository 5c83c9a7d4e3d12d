//! Errors raised by the Portal core.

use thiserror::Error;

/// Every failure the core can report.
#[derive(Debug, Error)]
pub enum PortalError {
    /// A tick rate outside of `1..=1000` was given to a strict setter.
    #[error("tick rate must be an integer between 1 and 1000, got {value}")]
    InvalidRate { value: i64 },
    /// A component could not be stored in (or looked up from) a container.
    #[error("invalid component {id:?}: {reason}")]
    InvalidComponent { id: String, reason: &'static str },
    /// The display backend failed.
    #[error("display error: {0}")]
    Display(String),
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("settings error: {0}")]
    Settings(#[from] serde_json::Error),
}

pub type Result<T, E = PortalError> = std::result::Result<T, E>;
