//! Errors raised by editor commands

use thiserror::Error;

/// Invalid-argument conditions; no partial mutation happens when returned
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RoiError {
    #[error("unregistered ROI type: {0}")]
    UnknownType(String),
    #[error("invalid argument: {0}")]
    InvalidArgument(String),
}

pub type Result<T> = std::result::Result<T, RoiError>;
