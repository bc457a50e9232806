//! HTTP inbound adapter exposing the todo REST endpoints.

pub mod error;
pub mod health;
pub mod schemas;
pub mod state;
pub mod todos;
pub mod validation;

pub use error::ApiResult;
