use std::result::Result as StdResult;

use diesel::r2d2::PoolError;
use diesel::result::{DatabaseErrorKind, Error as DieselError};
use diesel_migrations::RunMigrationsError;
use thiserror::Error;

/// Result type for store operations.
pub type Result<T> = StdResult<T, Error>;

/// Errors reported by the store.
#[derive(Debug, Error)]
pub enum Error {
    /// A `users` row already holds this `username` or `email`.
    #[error("unique constraint violated on users.{column}")]
    UniqueConstraintViolation { column: String },

    /// A post names an author that is not a live user.
    ///
    /// `author_id` is `None` when the engine rejected the row without naming it.
    #[error("foreign key violated: {}", missing_author(.author_id))]
    ForeignKeyViolation { author_id: Option<i64> },

    /// A user tried to change a post written by someone else.
    #[error("user {user_id} may not modify post {post_id}")]
    Forbidden { post_id: i64, user_id: i64 },

    #[error("{entity} {id} not found")]
    NotFound { entity: &'static str, id: i64 },

    /// The database rejected or failed an operation.
    #[error("storage error: {0}")]
    Storage(DieselError),

    #[error("connection pool error: {0}")]
    Pool(#[from] PoolError),

    #[error("migration error: {0}")]
    Migration(#[from] RunMigrationsError),

    #[error("configuration error: {0}")]
    Config(String),
}

impl Error {
    pub fn user_not_found(id: i64) -> Self {
        Error::NotFound { entity: "user", id }
    }

    pub fn post_not_found(id: i64) -> Self {
        Error::NotFound { entity: "post", id }
    }

    /// Caller-input errors, as opposed to storage faults.
    pub fn is_constraint_violation(&self) -> bool {
        match self {
            Error::UniqueConstraintViolation { .. } | Error::ForeignKeyViolation { .. } => true,
            _ => false,
        }
    }
}

impl From<DieselError> for Error {
    fn from(err: DieselError) -> Self {
        match err {
            DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, ref info) => {
                // SQLite reports "UNIQUE constraint failed: users.email"
                let column = info
                    .message()
                    .rsplit('.')
                    .next()
                    .map(str::trim)
                    .filter(|c| !c.is_empty() && !c.contains(' '))
                    .unwrap_or("unknown")
                    .to_owned();
                Error::UniqueConstraintViolation { column }
            }
            // The engine does not say which id was missing.
            DieselError::DatabaseError(DatabaseErrorKind::ForeignKeyViolation, _) => {
                Error::ForeignKeyViolation { author_id: None }
            }
            other => Error::Storage(other),
        }
    }
}

fn missing_author(author_id: &Option<i64>) -> String {
    match author_id {
        Some(id) => format!("no user with id {}", id),
        None => String::from("post author does not exist"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_messages() {
        let err = Error::UniqueConstraintViolation {
            column: "email".to_owned(),
        };
        assert_eq!(err.to_string(), "unique constraint violated on users.email");

        assert_eq!(
            Error::ForeignKeyViolation { author_id: Some(7) }.to_string(),
            "foreign key violated: no user with id 7"
        );
        assert_eq!(
            Error::ForeignKeyViolation { author_id: None }.to_string(),
            "foreign key violated: post author does not exist"
        );
        assert_eq!(
            Error::Forbidden {
                post_id: 4,
                user_id: 2
            }
            .to_string(),
            "user 2 may not modify post 4"
        );
        assert_eq!(Error::post_not_found(3).to_string(), "post 3 not found");
        assert_eq!(Error::user_not_found(1).to_string(), "user 1 not found");
    }

    #[test]
    fn constraint_violations_are_caller_errors() {
        assert!(Error::ForeignKeyViolation { author_id: Some(1) }.is_constraint_violation());
        assert!(Error::UniqueConstraintViolation {
            column: "username".to_owned()
        }
        .is_constraint_violation());
        assert!(!Error::user_not_found(1).is_constraint_violation());
        assert!(!Error::from(DieselError::RollbackTransaction).is_constraint_violation());
    }

    #[test]
    fn not_found_from_diesel_is_a_storage_error() {
        match Error::from(DieselError::NotFound) {
            Error::Storage(DieselError::NotFound) => {}
            other => panic!("unexpected {:?}", other),
        }
    }
}
