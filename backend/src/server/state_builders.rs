//! Builders for the HTTP state handed to every worker.

use std::sync::Arc;

use actix_web::web;
use tracing::info;

use todo_backend::inbound::http::state::HttpState;
use todo_backend::outbound::memory::InMemoryTodoRepository;
use todo_backend::outbound::persistence::DieselTodoRepository;

use super::ServerConfig;

/// Wire the todo ports to the PostgreSQL repository when a pool is
/// configured, otherwise to a process-wide in-memory store.
///
/// The state is built once and cloned into each worker so all workers share
/// the same store.
pub(super) fn build_http_state(config: &ServerConfig) -> web::Data<HttpState> {
    let state = match &config.db_pool {
        Some(pool) => {
            info!("serving todos from PostgreSQL");
            HttpState::from_repository(Arc::new(DieselTodoRepository::new(pool.clone())))
        }
        None => {
            info!("no database configured; serving todos from memory");
            HttpState::from_repository(Arc::new(InMemoryTodoRepository::default()))
        }
    };
    web::Data::new(state)
}
