//! Domain ports for the hexagonal boundary.
//!
//! Driven port: [`TodoRepository`]. Driving ports: [`TodoCommand`] and
//! [`TodoQuery`].

mod macros;
pub(crate) use macros::define_port_error;

mod todo_command;
mod todo_query;
mod todo_repository;

#[cfg(test)]
pub use todo_command::MockTodoCommand;
pub use todo_command::TodoCommand;
#[cfg(test)]
pub use todo_query::MockTodoQuery;
pub use todo_query::TodoQuery;
#[cfg(test)]
pub use todo_repository::MockTodoRepository;
pub use todo_repository::{TodoRepository, TodoRepositoryError};
