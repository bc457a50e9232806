//! Request-side validation extractors.

use std::ops::Deref;

use actix_web::dev::Payload;
use actix_web::web::{Bytes, Query};
use actix_web::{FromRequest, HttpRequest};
use futures_util::future::{LocalBoxFuture, Ready, ready};
use serde_json::{Map, Value};
use tracing::debug;

use crate::domain::Error;

use super::{FieldError, FieldErrorKind, FieldReader, Source, ValidationErrors};

/// A shape incoming data is validated against.
pub trait RequestSchema: Sized {
    /// Read and check every field, reporting all violations at once.
    fn validate(reader: FieldReader<'_>) -> Result<Self, ValidationErrors>;
}

/// JSON request body validated against `T`.
///
/// Malformed JSON, a non-object body or any field violation rejects the
/// request with `400` before the handler runs.
#[derive(Debug)]
pub struct ValidatedJson<T>(pub T);

impl<T> ValidatedJson<T> {
    /// Unwrap the validated value.
    pub fn into_inner(self) -> T {
        self.0
    }
}

impl<T> Deref for ValidatedJson<T> {
    type Target = T;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl<T: RequestSchema + 'static> FromRequest for ValidatedJson<T> {
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, payload: &mut Payload) -> Self::Future {
        let body = Bytes::from_request(req, payload);
        Box::pin(async move {
            let bytes = body.await.map_err(|err| {
                debug!(error = %err, "request body could not be read");
                json_invalid(format!("Request body could not be read: {err}"))
            })?;
            let parsed = validate_body::<T>(&bytes).inspect_err(|errors| {
                debug!(errors = ?errors.errors(), "request body failed validation");
            })?;
            Ok(Self(parsed))
        })
    }
}

fn validate_body<T: RequestSchema>(bytes: &[u8]) -> Result<T, ValidationErrors> {
    let value: Value = serde_json::from_slice(bytes)
        .map_err(|err| json_invalid(format!("Invalid JSON: {err}")))?;
    let reader = FieldReader::object(Source::Body, &value)?;
    T::validate(reader)
}

fn json_invalid(message: String) -> ValidationErrors {
    ValidationErrors::single(FieldError::new(
        Source::Body,
        [],
        FieldErrorKind::JsonInvalid,
        message,
    ))
}

/// Query string validated against `T`.
///
/// Repeated keys keep their last value. Keys `T` does not read are ignored.
#[derive(Debug)]
pub struct ValidatedQuery<T>(pub T);

impl<T> ValidatedQuery<T> {
    /// Unwrap the validated value.
    pub fn into_inner(self) -> T {
        self.0
    }
}

impl<T> Deref for ValidatedQuery<T> {
    type Target = T;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl<T: RequestSchema> FromRequest for ValidatedQuery<T> {
    type Error = Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        let result = validate_query::<T>(req.query_string())
            .inspect_err(|errors| {
                debug!(errors = ?errors.errors(), "query string failed validation");
            })
            .map(Self)
            .map_err(Error::from);
        ready(result)
    }
}

fn validate_query<T: RequestSchema>(query: &str) -> Result<T, ValidationErrors> {
    let pairs = Query::<Vec<(String, String)>>::from_query(query).map_err(|err| {
        ValidationErrors::single(FieldError::new(
            Source::Query,
            [],
            FieldErrorKind::ModelType,
            format!("Query string could not be parsed: {err}"),
        ))
    })?;
    let fields: Map<String, Value> = pairs
        .into_inner()
        .into_iter()
        .map(|(key, value)| (key, Value::String(value)))
        .collect();
    T::validate(FieldReader::new(Source::Query, &fields))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Patch;
    use rstest::rstest;

    #[derive(Debug, PartialEq)]
    struct Sample {
        label: String,
        flag: Patch<bool>,
    }

    impl RequestSchema for Sample {
        fn validate(mut reader: FieldReader<'_>) -> Result<Self, ValidationErrors> {
            let label = reader.required_str("label");
            let flag = reader.optional_bool("flag");
            if reader.source() == Source::Body {
                reader.deny_unknown(&["label", "flag"]);
            }
            reader.finish(label.zip(flag).map(|(label, flag)| Self { label, flag }))
        }
    }

    fn kinds(errors: &ValidationErrors) -> Vec<&'static str> {
        errors.errors().iter().map(|e| e.kind().as_str()).collect()
    }

    #[test]
    fn body_accepts_well_formed_object() {
        let sample: Sample = validate_body(br#"{"label": "x", "flag": true}"#).expect("valid");
        assert_eq!(
            sample,
            Sample {
                label: "x".into(),
                flag: Patch::Value(true)
            }
        );
    }

    #[rstest]
    #[case(b"{not json".as_slice(), "json_invalid")]
    #[case(b"".as_slice(), "json_invalid")]
    #[case(b"[1, 2]".as_slice(), "model_type")]
    #[case(b"\"label\"".as_slice(), "model_type")]
    fn body_rejects_non_objects(#[case] body: &[u8], #[case] expected: &str) {
        let errors = validate_body::<Sample>(body).expect_err("invalid body");
        assert_eq!(kinds(&errors), vec![expected]);
    }

    #[test]
    fn body_reports_every_violation() {
        let errors =
            validate_body::<Sample>(br#"{"flag": [], "extra": 1}"#).expect_err("invalid body");
        assert_eq!(kinds(&errors), vec!["missing", "bool_type", "extra_forbidden"]);
        let json = errors.to_json();
        assert_eq!(json[0]["loc"], serde_json::json!(["body", "label"]));
        assert_eq!(json[2]["loc"], serde_json::json!(["body", "extra"]));
    }

    #[test]
    fn query_ignores_unknown_keys_and_keeps_last_value() {
        let sample: Sample = validate_query("label=a&label=b&flag=off&page=2").expect("valid");
        assert_eq!(
            sample,
            Sample {
                label: "b".into(),
                flag: Patch::Value(false)
            }
        );
    }

    #[test]
    fn query_rejects_unparseable_flag() {
        let errors = validate_query::<Sample>("label=a&flag=maybe").expect_err("invalid");
        assert_eq!(kinds(&errors), vec!["bool_parsing"]);
        assert_eq!(
            errors.to_json()[0]["loc"],
            serde_json::json!(["query", "flag"])
        );
    }
}
