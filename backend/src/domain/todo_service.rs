//! Todo domain service.
//!
//! Implements the driving ports over a [`TodoRepository`], turning missing
//! records into not-found errors and repository failures into domain errors.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::{debug, info};

use crate::domain::ports::{TodoCommand, TodoQuery, TodoRepository};
use crate::domain::{Error, NewTodo, Todo, TodoFilter, TodoId, TodoPatch};

/// Todo service implementing [`TodoCommand`] and [`TodoQuery`].
#[derive(Clone)]
pub struct TodoService<R> {
    repository: Arc<R>,
}

impl<R> TodoService<R> {
    /// Create a new service over the given repository.
    pub fn new(repository: Arc<R>) -> Self {
        Self { repository }
    }
}

fn todo_not_found(id: TodoId) -> Error {
    Error::not_found(format!("Todo with id {id} was not found"))
}

#[async_trait]
impl<R> TodoQuery for TodoService<R>
where
    R: TodoRepository,
{
    async fn list_todos(&self, filter: TodoFilter) -> Result<Vec<Todo>, Error> {
        self.repository
            .list(filter)
            .await
            .map_err(Error::from)
    }

    async fn get_todo(&self, id: TodoId) -> Result<Todo, Error> {
        self.repository
            .find_by_id(id)
            .await
            .map_err(Error::from)?
            .ok_or_else(|| todo_not_found(id))
    }

    async fn check_store(&self) -> Result<(), Error> {
        self.repository.ping().await.map_err(Error::from)
    }
}

#[async_trait]
impl<R> TodoCommand for TodoService<R>
where
    R: TodoRepository,
{
    async fn create_todo(&self, new_todo: NewTodo) -> Result<Todo, Error> {
        let todo = self
            .repository
            .insert(&new_todo)
            .await
            .map_err(Error::from)?;
        info!(todo_id = %todo.id, "todo created");
        Ok(todo)
    }

    async fn update_todo(&self, id: TodoId, patch: TodoPatch) -> Result<Todo, Error> {
        let todo = self
            .repository
            .update(id, &patch)
            .await
            .map_err(Error::from)?
            .ok_or_else(|| todo_not_found(id))?;
        debug!(todo_id = %id, "todo updated");
        Ok(todo)
    }

    async fn delete_todo(&self, id: TodoId) -> Result<(), Error> {
        let removed = self
            .repository
            .delete(id)
            .await
            .map_err(Error::from)?;
        if !removed {
            return Err(todo_not_found(id));
        }
        info!(todo_id = %id, "todo deleted");
        Ok(())
    }
}

#[cfg(test)]
#[path = "todo_service_tests.rs"]
mod tests;
