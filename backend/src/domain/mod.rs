//! Domain primitives, ports and services.
//!
//! Purpose: define the todo resource model, the partial update model and the
//! use-case service without any dependency on HTTP or SQL.
//!
//! Public surface:
//! - Error / ErrorCode: transport agnostic failures.
//! - Todo, NewTodo, TodoPatch, TodoFilter: resource model.
//! - TodoService: implementation of the driving ports.

pub mod error;
pub mod ports;
pub mod todo;
pub mod todo_patch;
pub mod todo_service;
pub mod trace_id;

pub use self::error::{Error, ErrorCode};
pub use self::todo::{
    NewTodo, TODO_NAME_MAX_CHARS, Todo, TodoFilter, TodoId, TodoName, TodoNameError,
};
pub use self::todo_patch::{Patch, TodoChanges, TodoPatch};
pub use self::todo_service::TodoService;
pub use self::trace_id::TraceId;

/// HTTP header carrying the request trace identifier.
pub const TRACE_ID_HEADER: &str = "trace-id";
