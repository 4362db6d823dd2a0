use crate::types::DbId;

#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("Entity not found: {entity} with id {id}")]
    NotFound { entity: &'static str, id: DbId },

    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("Forbidden: {0}")]
    Forbidden(String),

    /// The request payload was rejected before any mutation took place.
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// A single field could not be coerced to its column type.
    #[error("Invalid value for field '{field}': {message}")]
    InvalidFieldValue { field: String, message: String },

    /// A unique or foreign-key constraint was breached at the storage layer.
    #[error("Constraint violation: {0}")]
    ConstraintViolation(String),

    #[error("Domain rule violation: {0}")]
    DomainRuleViolation(String),
}
