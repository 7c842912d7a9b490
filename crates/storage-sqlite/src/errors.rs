//! Translation of diesel and r2d2 failures into the database-agnostic
//! error types of `paperfolio_core`.
//!
//! Repositories map every fallible diesel call through [`StorageError`],
//! so nothing diesel-flavored leaks past this crate. Constraint
//! violations keep their kind: the users service relies on
//! `UniqueViolation` to report a taken username.

use diesel::result::{DatabaseErrorKind, Error as DieselError};
use thiserror::Error;

use paperfolio_core::errors::{DatabaseError, Error};

/// Internal storage failure, still carrying the driver-level error.
#[derive(Error, Debug)]
pub enum StorageError {
    #[error("Database connection failed: {0}")]
    ConnectionFailed(#[from] diesel::ConnectionError),

    #[error("Connection pool error: {0}")]
    PoolError(#[from] r2d2::Error),

    #[error("Query execution failed: {0}")]
    QueryFailed(#[from] DieselError),

    #[error("Migration failed: {0}")]
    MigrationFailed(String),
}

/// Classifies a diesel query error, keeping constraint kinds intact.
fn map_query_error(err: DieselError) -> DatabaseError {
    match err {
        DieselError::NotFound => DatabaseError::NotFound("Record not found".to_string()),
        DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, info) => {
            DatabaseError::UniqueViolation(info.message().to_string())
        }
        DieselError::DatabaseError(DatabaseErrorKind::ForeignKeyViolation, info) => {
            DatabaseError::ForeignKeyViolation(info.message().to_string())
        }
        other => DatabaseError::QueryFailed(other.to_string()),
    }
}

impl From<StorageError> for Error {
    fn from(err: StorageError) -> Self {
        let database_error = match err {
            StorageError::ConnectionFailed(e) => DatabaseError::ConnectionFailed(e.to_string()),
            StorageError::PoolError(e) => DatabaseError::PoolCreationFailed(e.to_string()),
            StorageError::QueryFailed(e) => map_query_error(e),
            StorageError::MigrationFailed(e) => DatabaseError::MigrationFailed(e),
        };
        Error::Database(database_error)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn to_core(err: DieselError) -> Error {
        StorageError::from(err).into()
    }

    #[test]
    fn test_not_found_keeps_its_kind() {
        assert!(matches!(
            to_core(DieselError::NotFound),
            Error::Database(DatabaseError::NotFound(_))
        ));
    }

    #[test]
    fn test_unique_violation_keeps_kind_and_message() {
        let err = DieselError::DatabaseError(
            DatabaseErrorKind::UniqueViolation,
            Box::new("UNIQUE constraint failed: users.username".to_string()),
        );
        match to_core(err) {
            Error::Database(DatabaseError::UniqueViolation(message)) => {
                assert!(message.contains("users.username"));
            }
            other => panic!("expected UniqueViolation, got {:?}", other),
        }
    }

    #[test]
    fn test_other_query_errors_are_generic() {
        assert!(matches!(
            to_core(DieselError::RollbackTransaction),
            Error::Database(DatabaseError::QueryFailed(_))
        ));
    }
}
