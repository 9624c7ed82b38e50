use thiserror::Error;

/// Errors raised by sheet storage and macro construction
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SheetError {
    /// A row or column passed to a store operation is negative or out of range
    #[error("Invalid cell coordinate ({row},{col}): row and column cannot be negative")]
    InvalidCoordinate { row: i64, col: i64 },

    /// A macro rectangle is malformed, or an average destination overlaps its source
    #[error("Invalid range: {0}")]
    InvalidRange(String),

    /// A required collaborator was not supplied
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),
}

pub type Result<T> = std::result::Result<T, SheetError>;
