use sparsesheet_core::SheetError;
use thiserror::Error;

/// Interpreter error type
#[derive(Error, Debug)]
pub enum CliError {
    #[error("{0}")]
    Sheet(#[from] SheetError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Undefined instruction: {0}")]
    UnknownInstruction(String),

    #[error("Invalid parameters for {instruction}. Usage: {usage}")]
    WrongArity {
        instruction: &'static str,
        usage: &'static str,
    },

    #[error("Invalid number format: {0}")]
    InvalidNumber(String),

    #[error("Invalid row: {0}")]
    InvalidRow(String),
}

impl CliError {
    /// Whether the session can continue after reporting this error
    pub fn is_recoverable(&self) -> bool {
        !matches!(self, CliError::Io(_))
    }
}
