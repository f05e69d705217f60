//! Database access for the recipes backend: entity models, queries, mutations and fixtures.
//!
//! Every query and mutation takes a `&mut PgConnection`, so callers decide whether
//! a group of operations runs inside a transaction (pass `&mut *transaction`) or not.

use std::borrow::Cow;

use thiserror::Error;

#[macro_use]
pub(crate) mod macros;

pub mod entities;
pub mod fixtures;



#[derive(Debug, Error)]
pub enum QueryError {
    #[error("sqlx error")]
    SqlxError {
        #[from]
        #[source]
        error: sqlx::Error,
    },

    #[error("model error: {}", .reason)]
    ModelError { reason: Cow<'static, str> },

    #[error("database inconsistency: {}", .problem)]
    DatabaseInconsistencyError { problem: Cow<'static, str> },
}

impl QueryError {
    pub fn model_error<R>(reason: R) -> Self
    where
        R: Into<Cow<'static, str>>,
    {
        Self::ModelError {
            reason: reason.into(),
        }
    }

    /// Returns `true` if this error is a violation of the unique constraint named `constraint_name`.
    pub fn is_unique_violation_of(&self, constraint_name: &str) -> bool {
        let Self::SqlxError {
            error: sqlx::Error::Database(database_error),
        } = self
        else {
            return false;
        };

        database_error.is_unique_violation() && database_error.constraint() == Some(constraint_name)
    }

    pub fn database_inconsistency<R>(problem: R) -> Self
    where
        R: Into<Cow<'static, str>>,
    {
        Self::DatabaseInconsistencyError {
            problem: problem.into(),
        }
    }
}



pub type QueryResult<R, E = QueryError> = Result<R, E>;



/// Conversion from a raw database row into the model this crate hands out.
pub trait IntoExternalModel {
    type ExternalModel;

    fn into_external_model(self) -> Self::ExternalModel;
}


/// Converts a `COUNT(*)` result into an unsigned count.
pub(crate) fn non_negative_count(count: i64) -> QueryResult<u64> {
    u64::try_from(count).map_err(|_| {
        QueryError::database_inconsistency(format!(
            "COUNT(*) returned a negative value: {}",
            count
        ))
    })
}



#[cfg(test)]
mod test {
    use std::error::Error as StdError;
    use std::fmt::{self, Display};

    use sqlx::error::{DatabaseError, ErrorKind};

    use super::*;

    #[derive(Debug)]
    struct ConstraintViolation {
        is_unique: bool,
        constraint: &'static str,
    }

    impl Display for ConstraintViolation {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            write!(f, "violates constraint {}", self.constraint)
        }
    }

    impl StdError for ConstraintViolation {}

    impl DatabaseError for ConstraintViolation {
        fn message(&self) -> &str {
            "constraint violation"
        }

        fn as_error(&self) -> &(dyn StdError + Send + Sync + 'static) {
            self
        }

        fn as_error_mut(&mut self) -> &mut (dyn StdError + Send + Sync + 'static) {
            self
        }

        fn into_error(self: Box<Self>) -> Box<dyn StdError + Send + Sync + 'static> {
            self
        }

        fn constraint(&self) -> Option<&str> {
            Some(self.constraint)
        }

        fn kind(&self) -> ErrorKind {
            if self.is_unique {
                ErrorKind::UniqueViolation
            } else {
                ErrorKind::ForeignKeyViolation
            }
        }
    }

    fn violation(is_unique: bool, constraint: &'static str) -> QueryError {
        QueryError::from(sqlx::Error::Database(Box::new(ConstraintViolation {
            is_unique,
            constraint,
        })))
    }

    #[test]
    fn recognizes_unique_violation_by_constraint_name() {
        let error = violation(true, "category_title_unique");

        assert!(error.is_unique_violation_of("category_title_unique"));
        assert!(!error.is_unique_violation_of("some_other_unique"));
    }

    #[test]
    fn other_errors_are_not_unique_violations() {
        assert!(!violation(false, "category_title_unique")
            .is_unique_violation_of("category_title_unique"));

        assert!(!QueryError::from(sqlx::Error::RowNotFound)
            .is_unique_violation_of("category_title_unique"));

        assert!(!QueryError::model_error("nope").is_unique_violation_of("category_title_unique"));
    }
}
