//! Error types for the terminal client.

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ClientError {
    /// Could not reach the server
    #[error("Connection error: {0}")]
    ConnectionError(String),

    #[error("Unknown command '{0}'. Type 'help' for the list of commands")]
    UnknownCommand(String),

    #[error("Usage: {0}")]
    MissingArgument(&'static str),

    #[error("Bid amount must be a whole number (got '{0}')")]
    InvalidAmount(String),
}
