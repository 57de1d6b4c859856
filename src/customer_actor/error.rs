//! Error types for the Customer actor.

use thiserror::Error;

/// Errors that can occur during customer operations.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum CustomerError {
    /// The requested customer was not found.
    #[error("Customer not found: {0}")]
    NotFound(String),

    /// The customer name is blank.
    #[error("Customer name must not be empty")]
    EmptyName,

    /// The email address is not plausibly an address.
    #[error("Invalid email: {0}")]
    InvalidEmail(String),

    /// Customers support no custom actions.
    #[error("Unsupported customer action")]
    UnsupportedAction,

    /// An error occurred while communicating with the actor system.
    #[error("Actor communication error: {0}")]
    ActorCommunicationError(String),
}

impl From<String> for CustomerError {
    fn from(msg: String) -> Self {
        CustomerError::ActorCommunicationError(msg)
    }
}
