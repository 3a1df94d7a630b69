//! Store error types

use sqlx::error::ErrorKind;
use thiserror::Error;

use crate::validation::ValidationErrors;

/// Store-specific errors
#[derive(Debug, Error)]
pub enum StoreError {
    /// Opening the database or acquiring a connection failed
    #[error("database connection error: {message}")]
    Connection { message: String },

    /// A statement failed for a reason other than a constraint
    #[error("database query error: {message}")]
    Query { message: String },

    /// Begin or commit failed
    #[error("transaction error: {message}")]
    Transaction { message: String },

    /// The store rejected a write on a unique, foreign-key, not-null or
    /// check constraint
    #[error("constraint violation: {message}")]
    Constraint { message: String },

    /// A stored value no longer satisfies the model
    #[error("corrupt row in {table}: {message}")]
    Corrupt { table: &'static str, message: String },

    /// A rule that needs the store (reference resolution, duplicate names)
    /// rejected the write
    #[error(transparent)]
    Validation(#[from] ValidationErrors),
}

/// Result type for store operations
pub type StoreResult<T> = Result<T, StoreError>;

impl StoreError {
    /// Classifies a statement failure, separating constraint violations
    /// from everything else.
    pub fn query(err: sqlx::Error) -> Self {
        if let sqlx::Error::Database(db_err) = &err {
            let constraint = matches!(
                db_err.kind(),
                ErrorKind::UniqueViolation
                    | ErrorKind::ForeignKeyViolation
                    | ErrorKind::NotNullViolation
                    | ErrorKind::CheckViolation
            );
            if constraint {
                return StoreError::Constraint {
                    message: db_err.message().to_string(),
                };
            }
        }
        StoreError::Query {
            message: err.to_string(),
        }
    }

    pub fn connection(err: sqlx::Error) -> Self {
        StoreError::Connection {
            message: err.to_string(),
        }
    }

    pub fn transaction(err: sqlx::Error) -> Self {
        StoreError::Transaction {
            message: err.to_string(),
        }
    }

    /// True for failures the client caused
    pub fn is_client_error(&self) -> bool {
        matches!(self, StoreError::Constraint { .. } | StoreError::Validation(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::validation::FieldError;

    #[test]
    fn test_non_database_errors_are_queries() {
        let err = StoreError::query(sqlx::Error::RowNotFound);
        assert!(matches!(err, StoreError::Query { .. }));
        assert!(!err.is_client_error());
    }

    #[test]
    fn test_validation_is_client_error() {
        let err = StoreError::from(ValidationErrors::from(FieldError::missing_reference(
            "hero_id", 4, "hero",
        )));
        assert!(err.is_client_error());
        assert_eq!(
            err.to_string(),
            "validation failed: hero_id 4 does not reference an existing hero"
        );
    }
}
