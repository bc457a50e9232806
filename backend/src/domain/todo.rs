//! Todo resource model.
//!
//! A [`Todo`] is the record as the store holds it. Inputs destined for the
//! store travel as [`NewTodo`] (create) or [`crate::domain::TodoPatch`]
//! (partial update), both of which carry an already validated [`TodoName`].

use std::fmt;

use chrono::{DateTime, Utc};

/// Maximum number of characters a todo name may hold.
pub const TODO_NAME_MAX_CHARS: usize = 50;

/// Store-assigned todo identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TodoId(i64);

impl TodoId {
    /// Wrap a raw identifier.
    #[must_use]
    pub const fn new(id: i64) -> Self {
        Self(id)
    }

    /// Access the raw identifier.
    #[must_use]
    pub const fn get(self) -> i64 {
        self.0
    }
}

impl From<i64> for TodoId {
    fn from(value: i64) -> Self {
        Self(value)
    }
}

impl fmt::Display for TodoId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Validation errors returned by [`TodoName::new`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TodoNameError {
    Empty,
    TooLong { max: usize },
}

impl fmt::Display for TodoNameError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty => write!(f, "name must not be empty"),
            Self::TooLong { max } => write!(f, "name must be at most {max} characters"),
        }
    }
}

impl std::error::Error for TodoNameError {}

/// Non-empty todo name of at most [`TODO_NAME_MAX_CHARS`] characters.
///
/// # Examples
/// ```
/// use todo_backend::domain::TodoName;
///
/// let name = TodoName::new("Buy milk").expect("valid name");
/// assert_eq!(name.as_str(), "Buy milk");
/// assert!(TodoName::new("").is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TodoName(String);

impl TodoName {
    /// Validate and construct a name.
    pub fn new(name: impl Into<String>) -> Result<Self, TodoNameError> {
        let name = name.into();
        if name.is_empty() {
            return Err(TodoNameError::Empty);
        }
        if name.chars().count() > TODO_NAME_MAX_CHARS {
            return Err(TodoNameError::TooLong {
                max: TODO_NAME_MAX_CHARS,
            });
        }
        Ok(Self(name))
    }

    /// Borrow the name as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consume the wrapper.
    #[must_use]
    pub fn into_inner(self) -> String {
        self.0
    }
}

impl AsRef<str> for TodoName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TodoName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A stored todo record.
///
/// Fields mirror the `todos` table one to one. The name is kept as stored so
/// that output validation can catch records that drifted from the contract.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Todo {
    pub id: TodoId,
    pub name: String,
    pub description: Option<String>,
    pub done: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Validated input for creating a todo.
///
/// `done` is not part of the input; new records always start as not done.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewTodo {
    pub name: TodoName,
    pub description: Option<String>,
}

/// Optional narrowing applied when listing todos.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TodoFilter {
    /// Keep only records whose completion flag equals this value.
    pub done: Option<bool>,
}

impl TodoFilter {
    /// Whether `todo` passes the filter.
    #[must_use]
    pub fn matches(&self, todo: &Todo) -> bool {
        self.done.is_none_or(|done| todo.done == done)
    }
}
