//! Table bootstrap run once at process start.
//!
//! The statement is idempotent, so restarting against an existing database
//! keeps its rows.

use diesel_async::RunQueryDsl;
use tracing::info;

use crate::domain::ports::TodoRepositoryError;

use super::diesel_error_mapping::{map_diesel_error, map_pool_error};
use super::pool::DbPool;

/// DDL for the `todos` table. Keep in sync with [`super::schema`].
pub const CREATE_TODOS_TABLE: &str = "\
CREATE TABLE IF NOT EXISTS todos (
    id          BIGSERIAL PRIMARY KEY,
    name        VARCHAR(50) NOT NULL,
    description TEXT,
    done        BOOLEAN NOT NULL DEFAULT FALSE,
    created_at  TIMESTAMPTZ NOT NULL DEFAULT now(),
    updated_at  TIMESTAMPTZ NOT NULL DEFAULT now()
)";

/// Create the `todos` table when it does not exist yet.
///
/// # Errors
///
/// Returns [`TodoRepositoryError::Connection`] when no connection can be
/// checked out and [`TodoRepositoryError::Query`] when the DDL fails.
pub async fn ensure_todos_table(pool: &DbPool) -> Result<(), TodoRepositoryError> {
    let mut conn = pool.get().await.map_err(map_pool_error)?;
    diesel::sql_query(CREATE_TODOS_TABLE)
        .execute(&mut conn)
        .await
        .map_err(map_diesel_error)?;
    info!("todos table ready");
    Ok(())
}
