//! Diesel and pool error mapping for the todo repository.

use tracing::debug;

use crate::domain::ports::TodoRepositoryError;

use super::pool::PoolError;

/// Map pool errors to repository connection errors.
pub(crate) fn map_pool_error(error: PoolError) -> TodoRepositoryError {
    match error {
        PoolError::Checkout { message }
        | PoolError::Build { message }
        | PoolError::InvalidConfig { message } => TodoRepositoryError::connection(message),
    }
}

/// Map Diesel errors to repository errors.
///
/// Database messages are logged at debug level and replaced with generic
/// text so SQL details never reach clients.
pub(crate) fn map_diesel_error(error: diesel::result::Error) -> TodoRepositoryError {
    use diesel::result::{DatabaseErrorKind, Error as DieselError};

    match &error {
        DieselError::DatabaseError(kind, info) => {
            debug!(?kind, message = info.message(), "diesel operation failed");
        }
        _ => debug!(error = %error, "diesel operation failed"),
    }

    match error {
        DieselError::NotFound => TodoRepositoryError::query("record not found"),
        DieselError::QueryBuilderError(_) => TodoRepositoryError::query("database query error"),
        DieselError::DatabaseError(DatabaseErrorKind::ClosedConnection, _) => {
            TodoRepositoryError::connection("database connection error")
        }
        DieselError::DatabaseError(DatabaseErrorKind::CheckViolation, _)
        | DieselError::DatabaseError(DatabaseErrorKind::NotNullViolation, _) => {
            TodoRepositoryError::query("constraint violation")
        }
        _ => TodoRepositoryError::query("database error"),
    }
}
