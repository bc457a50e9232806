//! Driving port for todo mutations.

use async_trait::async_trait;

use crate::domain::{Error, NewTodo, Todo, TodoId, TodoPatch};

/// Domain use-case port for creating, updating and deleting todos.
///
/// Item operations fail with [`crate::domain::ErrorCode::NotFound`] when the
/// identifier does not match a stored record.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait TodoCommand: Send + Sync {
    /// Persist a new todo and return the stored record.
    async fn create_todo(&self, new_todo: NewTodo) -> Result<Todo, Error>;

    /// Apply a partial update and return the stored record.
    async fn update_todo(&self, id: TodoId, patch: TodoPatch) -> Result<Todo, Error>;

    /// Remove a todo.
    async fn delete_todo(&self, id: TodoId) -> Result<(), Error>;
}
