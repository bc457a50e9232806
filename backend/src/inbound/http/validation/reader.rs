//! Field-by-field reader over a decoded JSON object.

use serde_json::{Map, Value};

use crate::domain::Patch;

use super::{FieldError, FieldErrorKind, Source, ValidationErrors};

/// Parse the permissive boolean spellings accepted for flags.
///
/// Matching is case-insensitive: `true/false`, `1/0`, `yes/no`, `on/off`,
/// `t/f` and `y/n`.
///
/// # Examples
/// ```
/// use todo_backend::inbound::http::validation::parse_bool_flag;
///
/// assert_eq!(parse_bool_flag("Yes"), Some(true));
/// assert_eq!(parse_bool_flag("0"), Some(false));
/// assert_eq!(parse_bool_flag("maybe"), None);
/// ```
#[must_use]
pub fn parse_bool_flag(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "true" | "1" | "yes" | "on" | "t" | "y" => Some(true),
        "false" | "0" | "no" | "off" | "f" | "n" => Some(false),
        _ => None,
    }
}

/// Reads typed fields out of a JSON object, collecting every failure.
///
/// Each accessor returns `None` when it recorded an error for that field, so
/// schemas can combine the results and hand them to [`FieldReader::finish`].
#[derive(Debug)]
pub struct FieldReader<'a> {
    source: Source,
    fields: &'a Map<String, Value>,
    errors: ValidationErrors,
}

impl<'a> FieldReader<'a> {
    /// Start reading `value`, which must be a JSON object.
    pub fn object(source: Source, value: &'a Value) -> Result<Self, ValidationErrors> {
        match value {
            Value::Object(fields) => Ok(Self::new(source, fields)),
            _ => Err(ValidationErrors::single(FieldError::new(
                source,
                [],
                FieldErrorKind::ModelType,
                "Input should be an object",
            ))),
        }
    }

    /// Start reading an already decoded object.
    #[must_use]
    pub fn new(source: Source, fields: &'a Map<String, Value>) -> Self {
        Self {
            source,
            fields,
            errors: ValidationErrors::default(),
        }
    }

    /// Where the fields came from.
    #[must_use]
    pub fn source(&self) -> Source {
        self.source
    }

    /// Read a string that must be present and non-null.
    pub fn required_str(&mut self, field: &str) -> Option<String> {
        let fields = self.fields;
        match fields.get(field) {
            None => {
                self.reject(field, FieldErrorKind::Missing, "Field required");
                None
            }
            Some(value) => self.string_value(field, value),
        }
    }

    /// Read a string that may be absent or explicitly `null`.
    pub fn optional_str(&mut self, field: &str) -> Option<Patch<String>> {
        let fields = self.fields;
        match fields.get(field) {
            None => Some(Patch::Absent),
            Some(Value::Null) => Some(Patch::Null),
            Some(value) => self.string_value(field, value).map(Patch::Value),
        }
    }

    /// Read a boolean that may be absent or explicitly `null`.
    ///
    /// Besides JSON booleans, the integers `0`/`1` and the spellings accepted
    /// by [`parse_bool_flag`] are coerced.
    pub fn optional_bool(&mut self, field: &str) -> Option<Patch<bool>> {
        let fields = self.fields;
        let value = match fields.get(field) {
            None => return Some(Patch::Absent),
            Some(Value::Null) => return Some(Patch::Null),
            Some(value) => value,
        };
        let parsed = match value {
            Value::Bool(flag) => Some(*flag),
            Value::Number(number) => match number.as_i64() {
                Some(1) => Some(true),
                Some(0) => Some(false),
                _ => None,
            },
            Value::String(raw) => parse_bool_flag(raw),
            _ => {
                self.reject(field, FieldErrorKind::BoolType, "Input should be a valid boolean");
                return None;
            }
        };
        if parsed.is_none() {
            self.reject(
                field,
                FieldErrorKind::BoolParsing,
                "Input should be a valid boolean, unable to interpret input",
            );
        }
        parsed.map(Patch::Value)
    }

    /// Reject every key not listed in `allowed`.
    pub fn deny_unknown(&mut self, allowed: &[&str]) {
        let fields = self.fields;
        let unknown: Vec<&str> = fields
            .keys()
            .map(String::as_str)
            .filter(|key| !allowed.contains(key))
            .collect();
        for key in unknown {
            self.reject(key, FieldErrorKind::ExtraForbidden, "Extra inputs are not permitted");
        }
    }

    /// Record a failure for `field`.
    pub fn reject(&mut self, field: &str, kind: FieldErrorKind, message: impl Into<String>) {
        self.errors
            .push(FieldError::field(self.source, field, kind, message));
    }

    /// Return `value` if no error was recorded.
    ///
    /// `value` is expected to be `Some` whenever the reader is clean; a
    /// `None` without recorded errors is reported as a malformed object.
    pub fn finish<T>(self, value: Option<T>) -> Result<T, ValidationErrors> {
        if !self.errors.is_empty() {
            return Err(self.errors);
        }
        value.ok_or_else(|| {
            ValidationErrors::single(FieldError::new(
                self.source,
                [],
                FieldErrorKind::ModelType,
                "Input could not be validated",
            ))
        })
    }

    fn string_value(&mut self, field: &str, value: &Value) -> Option<String> {
        if let Value::String(text) = value {
            Some(text.clone())
        } else {
            self.reject(field, FieldErrorKind::StringType, "Input should be a valid string");
            None
        }
    }
}
