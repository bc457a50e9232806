//! PostgreSQL-backed `TodoRepository` implementation using Diesel ORM.
//!
//! Every mutation runs inside `AsyncConnection::transaction`, which commits
//! when the closure returns `Ok` and rolls back on `Err` or on drop.

use async_trait::async_trait;
use diesel::dsl::now;
use diesel::prelude::*;
use diesel_async::scoped_futures::ScopedFutureExt;
use diesel_async::{AsyncConnection, RunQueryDsl};

use crate::domain::ports::{TodoRepository, TodoRepositoryError};
use crate::domain::{NewTodo, Todo, TodoFilter, TodoId, TodoPatch};

use super::diesel_error_mapping::{map_diesel_error, map_pool_error};
use super::models::{NewTodoRow, TodoChangeset, TodoRow};
use super::pool::DbPool;
use super::schema::todos;

/// Diesel-backed implementation of the `TodoRepository` port.
#[derive(Clone)]
pub struct DieselTodoRepository {
    pool: DbPool,
}

impl DieselTodoRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl TodoRepository for DieselTodoRepository {
    async fn ping(&self) -> Result<(), TodoRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        diesel::sql_query("SELECT 1")
            .execute(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        Ok(())
    }

    async fn list(&self, filter: TodoFilter) -> Result<Vec<Todo>, TodoRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let mut query = todos::table
            .select(TodoRow::as_select())
            .order(todos::id.asc())
            .into_boxed();
        if let Some(done) = filter.done {
            query = query.filter(todos::done.eq(done));
        }

        let rows: Vec<TodoRow> = query.load(&mut conn).await.map_err(map_diesel_error)?;
        Ok(rows.into_iter().map(Todo::from).collect())
    }

    async fn find_by_id(&self, id: TodoId) -> Result<Option<Todo>, TodoRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let row: Option<TodoRow> = todos::table
            .find(id.get())
            .select(TodoRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;

        Ok(row.map(Todo::from))
    }

    async fn insert(&self, new_todo: &NewTodo) -> Result<Todo, TodoRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let new_row = NewTodoRow::from(new_todo);

        let row = conn
            .transaction::<TodoRow, diesel::result::Error, _>(|conn| {
                async move {
                    diesel::insert_into(todos::table)
                        .values(&new_row)
                        .returning(TodoRow::as_returning())
                        .get_result(conn)
                        .await
                }
                .scope_boxed()
            })
            .await
            .map_err(map_diesel_error)?;

        Ok(Todo::from(row))
    }

    async fn update(
        &self,
        id: TodoId,
        patch: &TodoPatch,
    ) -> Result<Option<Todo>, TodoRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let row = conn
            .transaction::<Option<TodoRow>, diesel::result::Error, _>(|conn| {
                async move {
                    let current: Option<TodoRow> = todos::table
                        .find(id.get())
                        .select(TodoRow::as_select())
                        .for_update()
                        .first(conn)
                        .await
                        .optional()?;
                    let Some(current) = current else {
                        return Ok(None);
                    };

                    let changes = patch.changes_for(&Todo::from(current.clone()));
                    if changes.is_empty() {
                        return Ok(Some(current));
                    }

                    let changeset = TodoChangeset::from(&changes);
                    diesel::update(todos::table.find(id.get()))
                        .set((&changeset, todos::updated_at.eq(now)))
                        .returning(TodoRow::as_returning())
                        .get_result(conn)
                        .await
                        .map(Some)
                }
                .scope_boxed()
            })
            .await
            .map_err(map_diesel_error)?;

        Ok(row.map(Todo::from))
    }

    async fn delete(&self, id: TodoId) -> Result<bool, TodoRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let deleted = conn
            .transaction::<usize, diesel::result::Error, _>(|conn| {
                async move {
                    diesel::delete(todos::table.find(id.get()))
                        .execute(conn)
                        .await
                }
                .scope_boxed()
            })
            .await
            .map_err(map_diesel_error)?;

        Ok(deleted > 0)
    }
}
