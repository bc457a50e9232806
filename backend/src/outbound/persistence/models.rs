//! Internal Diesel row structs for the `todos` table.
//!
//! These types are implementation details of the persistence layer and never
//! leave it; repositories convert them to and from domain types.

use chrono::{DateTime, Utc};
use diesel::prelude::*;

use crate::domain::{NewTodo, Todo, TodoChanges, TodoId};

use super::schema::todos;

/// Row struct for reading from the todos table.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = todos)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct TodoRow {
    pub id: i64,
    pub name: String,
    pub description: Option<String>,
    pub done: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<TodoRow> for Todo {
    fn from(row: TodoRow) -> Self {
        Self {
            id: TodoId::new(row.id),
            name: row.name,
            description: row.description,
            done: row.done,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

/// Insertable struct for creating todo records.
///
/// `id`, `done` and the timestamps fall back to column defaults.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = todos)]
pub(crate) struct NewTodoRow<'a> {
    pub name: &'a str,
    pub description: Option<&'a str>,
}

impl<'a> From<&'a NewTodo> for NewTodoRow<'a> {
    fn from(value: &'a NewTodo) -> Self {
        Self {
            name: value.name.as_str(),
            description: value.description.as_deref(),
        }
    }
}

/// Changeset for partial updates.
///
/// `None` leaves a column untouched; `Some(None)` on `description` writes
/// `NULL`.
#[derive(Debug, Clone, AsChangeset)]
#[diesel(table_name = todos)]
pub(crate) struct TodoChangeset<'a> {
    pub name: Option<&'a str>,
    pub description: Option<Option<&'a str>>,
    pub done: Option<bool>,
}

impl<'a> From<&'a TodoChanges> for TodoChangeset<'a> {
    fn from(changes: &'a TodoChanges) -> Self {
        Self {
            name: changes.name.as_deref(),
            description: changes.description.as_ref().map(Option::as_deref),
            done: changes.done,
        }
    }
}
