//! Domain-level error types.

use thiserror::Error;

use crate::domain::PostId;
use crate::ports::AccessError;

/// Domain errors - business logic failures.
#[derive(Debug, Error)]
pub enum DomainError {
    #[error("Entity not found: {entity_type} with id {id}")]
    NotFound { entity_type: &'static str, id: PostId },

    #[error("Validation failed: {}", join_fields(.fields))]
    Validation { fields: Vec<FieldError> },

    #[error("Forbidden")]
    Forbidden,

    #[error("Internal error: {0}")]
    Internal(String),
}

impl DomainError {
    pub(crate) fn post_not_found(id: PostId) -> Self {
        DomainError::NotFound {
            entity_type: "Post",
            id,
        }
    }
}

fn join_fields(fields: &[FieldError]) -> String {
    fields
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

/// A single rejected input field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldError {
    pub field: &'static str,
    pub reason: FieldReason,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldReason {
    Required,
    TooLong { max: usize },
}

impl std::fmt::Display for FieldError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.reason {
            FieldReason::Required => write!(f, "{} is required", self.field),
            FieldReason::TooLong { max } => {
                write!(f, "{} must be at most {} characters", self.field, max)
            }
        }
    }
}

impl From<AccessError> for DomainError {
    fn from(_: AccessError) -> Self {
        DomainError::Forbidden
    }
}

/// Repository-level errors.
#[derive(Debug, Error)]
pub enum RepoError {
    #[error("Database connection failed: {0}")]
    Connection(String),

    #[error("Query execution failed: {0}")]
    Query(String),

    #[error("Entity not found")]
    NotFound,

    #[error("Constraint violation: {0}")]
    Constraint(String),
}
