//! UseCase error types.

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum UseCaseError {
    #[error("session controller is no longer running")]
    SessionClosed,
}
