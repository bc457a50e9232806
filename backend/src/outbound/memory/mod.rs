//! In-process todo store.
//!
//! Backs the service when no database URL is configured and gives tests an
//! isolated store per instance. Each operation holds the store lock for its
//! whole duration, so a mutation is applied completely or not at all.

use std::collections::BTreeMap;
use std::sync::{Arc, Mutex, MutexGuard};

use async_trait::async_trait;
use mockable::{Clock, DefaultClock};

use crate::domain::ports::{TodoRepository, TodoRepositoryError};
use crate::domain::{NewTodo, Todo, TodoFilter, TodoId, TodoPatch};

#[derive(Debug, Default)]
struct Store {
    last_id: i64,
    rows: BTreeMap<TodoId, Todo>,
}

/// Mutex-guarded todo store ordered by identifier.
///
/// Identifiers come from a monotonically increasing counter and are never
/// reused, even after deletes.
pub struct InMemoryTodoRepository {
    store: Mutex<Store>,
    clock: Arc<dyn Clock>,
}

impl Default for InMemoryTodoRepository {
    fn default() -> Self {
        Self::new(Arc::new(DefaultClock))
    }
}

impl InMemoryTodoRepository {
    /// Create an empty store stamping records with `clock`.
    pub fn new(clock: Arc<dyn Clock>) -> Self {
        Self {
            store: Mutex::new(Store::default()),
            clock,
        }
    }

    fn lock(&self) -> Result<MutexGuard<'_, Store>, TodoRepositoryError> {
        self.store
            .lock()
            .map_err(|_| TodoRepositoryError::query("todo store lock poisoned"))
    }
}

#[async_trait]
impl TodoRepository for InMemoryTodoRepository {
    async fn ping(&self) -> Result<(), TodoRepositoryError> {
        self.lock().map(drop)
    }

    async fn list(&self, filter: TodoFilter) -> Result<Vec<Todo>, TodoRepositoryError> {
        let store = self.lock()?;
        Ok(store
            .rows
            .values()
            .filter(|todo| filter.matches(todo))
            .cloned()
            .collect())
    }

    async fn find_by_id(&self, id: TodoId) -> Result<Option<Todo>, TodoRepositoryError> {
        Ok(self.lock()?.rows.get(&id).cloned())
    }

    async fn insert(&self, new_todo: &NewTodo) -> Result<Todo, TodoRepositoryError> {
        let mut store = self.lock()?;
        let now = self.clock.utc();
        store.last_id += 1;
        let todo = Todo {
            id: TodoId::new(store.last_id),
            name: new_todo.name.as_str().to_owned(),
            description: new_todo.description.clone(),
            done: false,
            created_at: now,
            updated_at: now,
        };
        store.rows.insert(todo.id, todo.clone());
        Ok(todo)
    }

    async fn update(
        &self,
        id: TodoId,
        patch: &TodoPatch,
    ) -> Result<Option<Todo>, TodoRepositoryError> {
        let mut store = self.lock()?;
        let Some(current) = store.rows.get(&id).cloned() else {
            return Ok(None);
        };

        let changes = patch.changes_for(&current);
        if changes.is_empty() {
            return Ok(Some(current));
        }

        let mut updated = changes.apply(current);
        updated.updated_at = self.clock.utc().max(updated.created_at);
        store.rows.insert(id, updated.clone());
        Ok(Some(updated))
    }

    async fn delete(&self, id: TodoId) -> Result<bool, TodoRepositoryError> {
        Ok(self.lock()?.rows.remove(&id).is_some())
    }
}
