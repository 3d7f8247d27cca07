//! Domain-level error types.

use thiserror::Error;

/// Domain errors - business rule failures surfaced to callers.
#[derive(Debug, Error)]
pub enum DomainError {
    #[error("Entity not found: {entity_type} with id {id}")]
    NotFound { entity_type: &'static str, id: i64 },

    #[error("Operation not allowed: {0}")]
    SelfActionForbidden(String),

    #[error("{entity_type} {id} does not belong to the acting account")]
    NotOwner { entity_type: &'static str, id: i64 },

    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("Conflicting concurrent write: {0}")]
    ConflictRace(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl DomainError {
    pub fn not_found(entity_type: &'static str, id: i64) -> Self {
        Self::NotFound { entity_type, id }
    }

    pub fn not_owner(entity_type: &'static str, id: i64) -> Self {
        Self::NotOwner { entity_type, id }
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

    #[error("Unique constraint violated: {0}")]
    UniqueViolation(String),

    #[error("Constraint violation: {0}")]
    Constraint(String),
}

impl RepoError {
    pub fn is_unique_violation(&self) -> bool {
        matches!(self, RepoError::UniqueViolation(_))
    }
}

// Store failures the engine does not interpret itself are not caller-actionable.
impl From<RepoError> for DomainError {
    fn from(err: RepoError) -> Self {
        match err {
            RepoError::UniqueViolation(msg) => DomainError::ConflictRace(msg),
            other => DomainError::Internal(other.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unique_violation_maps_to_conflict_race() {
        let err: DomainError = RepoError::UniqueViolation("uq_accounts_handle".into()).into();
        assert!(matches!(err, DomainError::ConflictRace(msg) if msg == "uq_accounts_handle"));
    }

    #[test]
    fn test_query_failure_maps_to_internal() {
        let err: DomainError = RepoError::Query("timeout".into()).into();
        assert!(matches!(err, DomainError::Internal(_)));
    }
}
