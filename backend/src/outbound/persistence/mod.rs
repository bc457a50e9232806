//! PostgreSQL persistence adapter using Diesel ORM.
//!
//! - **Thin adapter**: [`DieselTodoRepository`] only translates between Diesel
//!   rows and domain types. The partial update merge lives in the domain.
//! - **Internal models**: row structs (`models.rs`) and the table definition
//!   (`schema.rs`) never leave this module.
//! - **Async pooling**: connections come from a `bb8` pool through
//!   `diesel-async`.
//!
//! # Example
//!
//! ```no_run
//! use todo_backend::outbound::persistence::{
//!     DbPool, DieselTodoRepository, PoolConfig, ensure_todos_table,
//! };
//!
//! # async fn run() -> Result<(), Box<dyn std::error::Error>> {
//! let pool = DbPool::new(PoolConfig::new("postgres://localhost/todos")).await?;
//! ensure_todos_table(&pool).await?;
//! let repository = DieselTodoRepository::new(pool);
//! # let _ = repository;
//! # Ok(())
//! # }
//! ```

mod bootstrap;
mod diesel_error_mapping;
mod diesel_todo_repository;
mod models;
mod pool;
mod schema;

pub use bootstrap::{CREATE_TODOS_TABLE, ensure_todos_table};
pub use diesel_todo_repository::DieselTodoRepository;
pub use pool::{DbPool, PoolConfig, PoolError};
