//! # Framework Errors
//!
//! Errors raised by the runtime itself, independent of any entity. Entity
//! failures travel inside [`FrameworkError::EntityError`] so typed clients can
//! recover them by downcasting.

/// Errors that can occur within the resource actor runtime.
#[derive(Debug, thiserror::Error)]
pub enum FrameworkError {
    #[error("Actor closed")]
    ActorClosed,
    #[error("Actor dropped response channel")]
    ActorDropped,
    #[error("Item not found: {0}")]
    NotFound(String),
    #[error("Entity error: {0}")]
    EntityError(Box<dyn std::error::Error + Send + Sync>),
}

impl FrameworkError {
    /// Wraps an entity's own error.
    pub fn entity<E>(error: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        Self::EntityError(Box::new(error))
    }

    /// Recovers the entity error of type `E`, if that is what this error carries.
    ///
    /// Returns the original error untouched when it is a runtime failure or an
    /// entity error of a different type.
    pub fn into_entity<E>(self) -> Result<E, Self>
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        match self {
            Self::EntityError(inner) => match inner.downcast::<E>() {
                Ok(err) => Ok(*err),
                Err(other) => Err(Self::EntityError(other)),
            },
            other => Err(other),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, thiserror::Error, PartialEq)]
    #[error("out of stock")]
    struct OutOfStock;

    #[derive(Debug, thiserror::Error)]
    #[error("other")]
    struct Other;

    #[test]
    fn into_entity_recovers_matching_type() {
        let err = FrameworkError::entity(OutOfStock);
        assert_eq!(err.into_entity::<OutOfStock>().unwrap(), OutOfStock);
    }

    #[test]
    fn into_entity_keeps_foreign_errors() {
        let err = FrameworkError::entity(Other);
        let back = err.into_entity::<OutOfStock>().unwrap_err();
        assert_eq!(back.to_string(), "Entity error: other");

        let closed = FrameworkError::ActorClosed.into_entity::<OutOfStock>();
        assert!(matches!(closed, Err(FrameworkError::ActorClosed)));
    }
}
