//! Driving port for todo reads.
//!
//! Inbound adapters use this port to read todos without importing outbound
//! persistence concerns.

use async_trait::async_trait;

use crate::domain::{Error, Todo, TodoFilter, TodoId};

/// Domain use-case port for reading todos.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait TodoQuery: Send + Sync {
    /// List todos narrowed by `filter`, ordered by identifier.
    async fn list_todos(&self, filter: TodoFilter) -> Result<Vec<Todo>, Error>;

    /// Fetch one todo, failing with [`crate::domain::ErrorCode::NotFound`]
    /// when it does not exist.
    async fn get_todo(&self, id: TodoId) -> Result<Todo, Error>;

    /// Succeed when the backing store is reachable.
    async fn check_store(&self) -> Result<(), Error>;
}
