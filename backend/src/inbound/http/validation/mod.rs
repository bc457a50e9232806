//! Schema validation at the HTTP boundary.
//!
//! Request bodies and query strings are read into a [`FieldReader`] and
//! validated by a [`RequestSchema`] before a handler runs (see
//! [`ValidatedJson`] and [`ValidatedQuery`]). Handler results pass through a
//! [`ResponseSchema`] projection before they are sent (see
//! [`ValidatedResponse`]). Both directions report every violated field, not
//! just the first, as a list of `{"loc", "msg", "type"}` objects.

mod reader;
mod request;
mod response;

use std::fmt;

use serde_json::{Value, json};

use crate::domain::Error;

pub use reader::{FieldReader, parse_bool_flag};
pub use request::{RequestSchema, ValidatedJson, ValidatedQuery};
pub use response::{ResponseSchema, ValidatedResponse};

/// Where the offending value came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Source {
    Body,
    Query,
    Response,
}

impl Source {
    fn as_str(self) -> &'static str {
        match self {
            Self::Body => "body",
            Self::Query => "query",
            Self::Response => "response",
        }
    }
}

/// Stable machine-readable reason for a field error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldErrorKind {
    Missing,
    StringType,
    BoolType,
    BoolParsing,
    StringTooShort,
    StringTooLong,
    ExtraForbidden,
    JsonInvalid,
    ModelType,
    GreaterThan,
    TimestampOrder,
}

impl FieldErrorKind {
    /// Wire representation of the kind.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Missing => "missing",
            Self::StringType => "string_type",
            Self::BoolType => "bool_type",
            Self::BoolParsing => "bool_parsing",
            Self::StringTooShort => "string_too_short",
            Self::StringTooLong => "string_too_long",
            Self::ExtraForbidden => "extra_forbidden",
            Self::JsonInvalid => "json_invalid",
            Self::ModelType => "model_type",
            Self::GreaterThan => "greater_than",
            Self::TimestampOrder => "timestamp_order",
        }
    }
}

/// One segment of a field location.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LocPart {
    Key(String),
    Index(usize),
}

impl From<&str> for LocPart {
    fn from(value: &str) -> Self {
        Self::Key(value.to_owned())
    }
}

impl From<usize> for LocPart {
    fn from(value: usize) -> Self {
        Self::Index(value)
    }
}

/// A single violated field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldError {
    source: Source,
    path: Vec<LocPart>,
    kind: FieldErrorKind,
    message: String,
}

impl FieldError {
    /// Create an error for the field at `path` under `source`.
    pub fn new(
        source: Source,
        path: impl IntoIterator<Item = LocPart>,
        kind: FieldErrorKind,
        message: impl Into<String>,
    ) -> Self {
        Self {
            source,
            path: path.into_iter().collect(),
            kind,
            message: message.into(),
        }
    }

    /// Create an error for a top-level field.
    pub fn field(
        source: Source,
        field: &str,
        kind: FieldErrorKind,
        message: impl Into<String>,
    ) -> Self {
        Self::new(source, [LocPart::from(field)], kind, message)
    }

    /// Machine-readable reason.
    #[must_use]
    pub fn kind(&self) -> FieldErrorKind {
        self.kind
    }

    /// Last key in the location, if any.
    #[must_use]
    pub fn field_name(&self) -> Option<&str> {
        self.path.iter().rev().find_map(|part| match part {
            LocPart::Key(key) => Some(key.as_str()),
            LocPart::Index(_) => None,
        })
    }

    fn to_json(&self) -> Value {
        let loc: Vec<Value> = std::iter::once(json!(self.source.as_str()))
            .chain(self.path.iter().map(|part| match part {
                LocPart::Key(key) => json!(key),
                LocPart::Index(index) => json!(index),
            }))
            .collect();
        json!({
            "loc": loc,
            "msg": self.message,
            "type": self.kind.as_str(),
        })
    }
}

/// Every field error found while validating one value.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationErrors(Vec<FieldError>);

impl ValidationErrors {
    /// Wrap a single error.
    #[must_use]
    pub fn single(error: FieldError) -> Self {
        Self(vec![error])
    }

    /// Record another error.
    pub fn push(&mut self, error: FieldError) {
        self.0.push(error);
    }

    /// Whether nothing has been recorded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Recorded errors in discovery order.
    #[must_use]
    pub fn errors(&self) -> &[FieldError] {
        &self.0
    }

    /// Prefix every location with `index`, used when validating list items.
    #[must_use]
    pub fn at_index(mut self, index: usize) -> Self {
        for error in &mut self.0 {
            error.path.insert(0, LocPart::Index(index));
        }
        self
    }

    /// Move all errors from `other` into `self`.
    pub fn extend(&mut self, other: Self) {
        self.0.extend(other.0);
    }

    /// Render as the JSON list used in `{"detail": [...]}`.
    #[must_use]
    pub fn to_json(&self) -> Value {
        Value::Array(self.0.iter().map(FieldError::to_json).collect())
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} validation error(s)", self.0.len())
    }
}

impl From<ValidationErrors> for Error {
    fn from(errors: ValidationErrors) -> Self {
        Self::invalid_request(errors.to_string()).with_details(errors.to_json())
    }
}

#[cfg(test)]
mod tests;
