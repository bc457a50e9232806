//! Request and response shapes for the todo resource.
//!
//! Each shape implements [`RequestSchema`] or [`ResponseSchema`] so the
//! validation layer can check it at the HTTP boundary, and derives
//! `ToSchema` for the OpenAPI document. Domain types stay free of framework
//! derives.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use crate::domain::{
    NewTodo, Patch, Todo, TodoFilter, TodoName, TodoNameError, TodoPatch,
};
use crate::inbound::http::validation::{
    FieldError, FieldErrorKind, FieldReader, RequestSchema, ResponseSchema, Source,
    ValidationErrors,
};

fn name_error_kind(err: &TodoNameError) -> FieldErrorKind {
    match err {
        TodoNameError::Empty => FieldErrorKind::StringTooShort,
        TodoNameError::TooLong { .. } => FieldErrorKind::StringTooLong,
    }
}

fn name_error_message(err: &TodoNameError) -> String {
    match err {
        TodoNameError::Empty => "String should have at least 1 character".to_owned(),
        TodoNameError::TooLong { max } => format!("String should have at most {max} characters"),
    }
}

fn read_name(reader: &mut FieldReader<'_>, raw: String) -> Option<TodoName> {
    TodoName::new(raw)
        .inspect_err(|err| reader.reject("name", name_error_kind(err), name_error_message(err)))
        .ok()
}

/// Body accepted by `POST /todos/`.
#[derive(Debug, Clone, PartialEq, Eq, ToSchema)]
pub struct TodoCreateInput {
    #[schema(value_type = String, min_length = 1, max_length = 50, example = "Buy milk")]
    pub name: TodoName,
    #[schema(example = "Two litres, semi-skimmed")]
    pub description: Option<String>,
}

impl RequestSchema for TodoCreateInput {
    fn validate(mut reader: FieldReader<'_>) -> Result<Self, ValidationErrors> {
        let name = reader
            .required_str("name")
            .and_then(|raw| read_name(&mut reader, raw));
        let description = reader
            .optional_str("description")
            .map(|patch| match patch {
                Patch::Value(text) => Some(text),
                Patch::Absent | Patch::Null => None,
            });
        reader.deny_unknown(&["name", "description"]);
        reader.finish(
            name.zip(description)
                .map(|(name, description)| Self { name, description }),
        )
    }
}

impl From<TodoCreateInput> for NewTodo {
    fn from(input: TodoCreateInput) -> Self {
        Self {
            name: input.name,
            description: input.description,
        }
    }
}

/// Body accepted by `PATCH /todos/{todo_id}/`.
///
/// Absent keys leave the stored value alone. `description: null` clears the
/// description; `null` for `name` or `done` is ignored.
#[derive(Debug, Clone, Default, PartialEq, Eq, ToSchema)]
pub struct TodoUpdateInput {
    #[schema(value_type = Option<String>, min_length = 1, max_length = 50)]
    pub name: Option<TodoName>,
    #[schema(value_type = Option<String>)]
    pub description: Patch<String>,
    pub done: Option<bool>,
}

impl RequestSchema for TodoUpdateInput {
    fn validate(mut reader: FieldReader<'_>) -> Result<Self, ValidationErrors> {
        let name = reader.optional_str("name").map(|patch| match patch {
            Patch::Value(raw) => read_name(&mut reader, raw).map(Some),
            Patch::Absent | Patch::Null => Some(None),
        });
        let description = reader.optional_str("description");
        let done = reader.optional_bool("done").map(|patch| match patch {
            Patch::Value(done) => Some(done),
            Patch::Absent | Patch::Null => None,
        });
        reader.deny_unknown(&["name", "description", "done"]);
        let fields = match (name.flatten(), description, done) {
            (Some(name), Some(description), Some(done)) => Some(Self {
                name,
                description,
                done,
            }),
            _ => None,
        };
        reader.finish(fields)
    }
}

impl From<TodoUpdateInput> for TodoPatch {
    fn from(input: TodoUpdateInput) -> Self {
        Self {
            name: input.name,
            description: input.description,
            done: input.done,
        }
    }
}

/// Query string accepted by `GET /todos/`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct TodoFilterQuery {
    /// Keep only todos with this completion flag. Accepts `true/false`,
    /// `1/0`, `yes/no`, `on/off`, `t/f` and `y/n`.
    pub done: Option<bool>,
}

impl RequestSchema for TodoFilterQuery {
    fn validate(mut reader: FieldReader<'_>) -> Result<Self, ValidationErrors> {
        let done = reader.optional_bool("done").map(|patch| match patch {
            Patch::Value(done) => Self { done: Some(done) },
            Patch::Absent | Patch::Null => Self { done: None },
        });
        reader.finish(done)
    }
}

impl From<TodoFilterQuery> for TodoFilter {
    fn from(query: TodoFilterQuery) -> Self {
        Self { done: query.done }
    }
}

/// Todo as returned by every endpoint of the resource.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct TodoOutput {
    #[schema(example = 1, minimum = 1)]
    pub id: i64,
    #[schema(min_length = 1, max_length = 50, example = "Buy milk")]
    pub name: String,
    pub description: Option<String>,
    pub done: bool,
    #[schema(value_type = String, format = DateTime)]
    pub created_at: DateTime<Utc>,
    #[schema(value_type = String, format = DateTime)]
    pub updated_at: DateTime<Utc>,
}

impl ResponseSchema for TodoOutput {
    type Source = Todo;

    fn project(todo: Todo) -> Result<Self, ValidationErrors> {
        let mut errors = ValidationErrors::default();
        let mut reject = |field: &str, kind, message: String| {
            errors.push(FieldError::field(Source::Response, field, kind, message));
        };

        if todo.id.get() <= 0 {
            reject(
                "id",
                FieldErrorKind::GreaterThan,
                "Input should be greater than 0".to_owned(),
            );
        }
        if let Err(err) = TodoName::new(todo.name.as_str()) {
            reject("name", name_error_kind(&err), name_error_message(&err));
        }
        if todo.updated_at < todo.created_at {
            reject(
                "updated_at",
                FieldErrorKind::TimestampOrder,
                "updated_at must not be earlier than created_at".to_owned(),
            );
        }

        if !errors.is_empty() {
            return Err(errors);
        }
        Ok(Self {
            id: todo.id.get(),
            name: todo.name,
            description: todo.description,
            done: todo.done,
            created_at: todo.created_at,
            updated_at: todo.updated_at,
        })
    }
}

/// OpenAPI schema for a single field error.
#[derive(ToSchema)]
#[expect(
    dead_code,
    reason = "Used only for OpenAPI schema generation via utoipa"
)]
pub struct FieldErrorSchema {
    /// Path to the offending value, starting with `body`, `query` or `response`.
    #[schema(value_type = Vec<String>, example = json!(["body", "name"]))]
    loc: Vec<serde_json::Value>,
    /// Human-readable explanation.
    #[schema(example = "Field required")]
    msg: String,
    /// Stable machine-readable reason.
    #[schema(rename = "type", example = "missing")]
    kind: String,
}

/// OpenAPI schema for error bodies.
///
/// `detail` is a message string, or the list of field errors for validation
/// failures.
#[derive(ToSchema)]
#[expect(
    dead_code,
    reason = "Used only for OpenAPI schema generation via utoipa"
)]
pub struct DetailSchema {
    #[schema(value_type = Object, example = "Todo with id 1 was not found")]
    detail: serde_json::Value,
}
