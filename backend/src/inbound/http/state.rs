//! Shared HTTP adapter state.
//!
//! HTTP handlers accept this state via `actix_web::web::Data` so they only
//! depend on domain ports and remain testable without I/O.

use std::sync::Arc;

use crate::domain::TodoService;
use crate::domain::ports::{TodoCommand, TodoQuery, TodoRepository};

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    pub todos: Arc<dyn TodoCommand>,
    pub todos_query: Arc<dyn TodoQuery>,
}

impl HttpState {
    /// Construct state from explicit port implementations.
    pub fn new(todos: Arc<dyn TodoCommand>, todos_query: Arc<dyn TodoQuery>) -> Self {
        Self { todos, todos_query }
    }

    /// Wire both ports to a [`TodoService`] over `repository`.
    pub fn from_repository<R>(repository: Arc<R>) -> Self
    where
        R: TodoRepository + 'static,
    {
        let service = Arc::new(TodoService::new(repository));
        Self::new(service.clone(), service)
    }
}
