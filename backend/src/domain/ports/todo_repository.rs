//! Port for todo persistence.
//!
//! The [`TodoRepository`] trait is the persistence gateway. Every mutating
//! method runs as one scoped transaction inside the adapter: it either commits
//! completely or leaves the store untouched.

use async_trait::async_trait;

use super::define_port_error;

use crate::domain::{NewTodo, Todo, TodoFilter, TodoId, TodoPatch};

define_port_error! {
    /// Errors raised by todo repository adapters.
    pub enum TodoRepositoryError {
        /// Repository connection could not be established.
        Connection { message: String } => ServiceUnavailable, "todo repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } => InternalError, "todo repository query failed: {message}",
    }
}

/// Port for todo storage and retrieval.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait TodoRepository: Send + Sync {
    /// List todos passing `filter`, ordered by identifier.
    async fn list(&self, filter: TodoFilter) -> Result<Vec<Todo>, TodoRepositoryError>;

    /// Fetch a single todo. Returns `None` when no record has this id.
    async fn find_by_id(&self, id: TodoId) -> Result<Option<Todo>, TodoRepositoryError>;

    /// Insert a new record and return it as stored, with the identifier and
    /// both timestamps assigned by the store.
    async fn insert(&self, new_todo: &NewTodo) -> Result<Todo, TodoRepositoryError>;

    /// Apply `patch` to the record with this id and return the result.
    ///
    /// Returns `None` when no record has this id. `updated_at` is refreshed
    /// only when at least one field actually changes.
    async fn update(
        &self,
        id: TodoId,
        patch: &TodoPatch,
    ) -> Result<Option<Todo>, TodoRepositoryError>;

    /// Hard-delete the record with this id. Returns `false` when no record
    /// matched.
    async fn delete(&self, id: TodoId) -> Result<bool, TodoRepositoryError>;

    /// Cheap round trip proving the store can serve requests.
    async fn ping(&self) -> Result<(), TodoRepositoryError>;
}
