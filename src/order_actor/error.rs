//! Error types for the Order actor.

use thiserror::Error;

/// Errors that can occur during order operations.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum OrderError {
    /// The requested order was not found.
    #[error("Order not found: {0}")]
    NotFound(String),

    /// An order must contain at least one line.
    #[error("Order has no lines")]
    NoLines,

    /// Stored orders cannot be changed.
    #[error("Order {0} cannot be modified")]
    Immutable(String),

    /// Orders support no custom actions.
    #[error("Unsupported order action")]
    UnsupportedAction,

    /// An error occurred while communicating with the actor system.
    #[error("Actor communication error: {0}")]
    ActorCommunicationError(String),
}

impl From<String> for OrderError {
    fn from(msg: String) -> Self {
        OrderError::ActorCommunicationError(msg)
    }
}
