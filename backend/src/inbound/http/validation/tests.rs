//! Tests for field error collection and rendering.

use super::*;
use crate::domain::{ErrorCode, Patch};
use rstest::rstest;
use serde_json::json;

fn reader_for(value: &Value) -> FieldReader<'_> {
    FieldReader::object(Source::Body, value).expect("object payload")
}

#[rstest]
#[case("true", Some(true))]
#[case("FALSE", Some(false))]
#[case("1", Some(true))]
#[case("0", Some(false))]
#[case("yes", Some(true))]
#[case("No", Some(false))]
#[case("on", Some(true))]
#[case("off", Some(false))]
#[case("t", Some(true))]
#[case("F", Some(false))]
#[case("y", Some(true))]
#[case("n", Some(false))]
#[case("maybe", None)]
#[case("", None)]
fn bool_flags_accept_common_spellings(#[case] raw: &str, #[case] expected: Option<bool>) {
    assert_eq!(parse_bool_flag(raw), expected);
}

#[test]
fn field_errors_render_loc_msg_and_type() {
    let mut errors = ValidationErrors::default();
    errors.push(FieldError::field(
        Source::Query,
        "done",
        FieldErrorKind::BoolParsing,
        "bad flag",
    ));

    assert_eq!(
        errors.to_json(),
        json!([{"loc": ["query", "done"], "msg": "bad flag", "type": "bool_parsing"}])
    );
}

#[test]
fn list_items_are_located_by_index() {
    let errors = ValidationErrors::single(FieldError::field(
        Source::Response,
        "name",
        FieldErrorKind::StringTooShort,
        "too short",
    ))
    .at_index(2);

    assert_eq!(errors.to_json()[0]["loc"], json!(["response", 2, "name"]));
    assert_eq!(errors.errors()[0].field_name(), Some("name"));
}

#[test]
fn validation_errors_become_invalid_request() {
    let errors = ValidationErrors::single(FieldError::field(
        Source::Body,
        "name",
        FieldErrorKind::Missing,
        "Field required",
    ));
    let error = Error::from(errors.clone());

    assert_eq!(error.code(), ErrorCode::InvalidRequest);
    assert_eq!(error.details(), Some(&errors.to_json()));
}

#[test]
fn non_object_payload_is_a_model_type_error() {
    let errors = FieldReader::object(Source::Body, &json!([1])).expect_err("array rejected");
    assert_eq!(errors.errors()[0].kind(), FieldErrorKind::ModelType);
    assert_eq!(errors.to_json()[0]["loc"], json!(["body"]));
}

#[test]
fn optional_fields_distinguish_absent_from_null() {
    let value = json!({"description": null, "done": true});
    let mut reader = reader_for(&value);

    assert_eq!(reader.optional_str("description"), Some(Patch::Null));
    assert_eq!(reader.optional_str("name"), Some(Patch::Absent));
    assert_eq!(reader.optional_bool("done"), Some(Patch::Value(true)));
    assert!(reader.finish(Some(())).is_ok());
}

#[rstest]
#[case(json!({"name": 5}), "string_type")]
#[case(json!({"name": null}), "string_type")]
#[case(json!({}), "missing")]
fn required_strings_report_their_failure(#[case] value: Value, #[case] expected: &str) {
    let mut reader = reader_for(&value);
    assert_eq!(reader.required_str("name"), None);

    let errors = reader.finish(Some(())).expect_err("field error recorded");
    assert_eq!(errors.errors()[0].kind().as_str(), expected);
}

#[rstest]
#[case(json!({"done": 1}), Some(Patch::Value(true)))]
#[case(json!({"done": "off"}), Some(Patch::Value(false)))]
#[case(json!({"done": 2}), None)]
#[case(json!({"done": ["x"]}), None)]
fn booleans_coerce_flags_and_integers(#[case] value: Value, #[case] expected: Option<Patch<bool>>) {
    let mut reader = reader_for(&value);
    assert_eq!(reader.optional_bool("done"), expected);
}

#[test]
fn unknown_keys_are_reported_individually() {
    let value = json!({"name": "x", "owner": "me", "tags": []});
    let mut reader = reader_for(&value);
    reader.deny_unknown(&["name"]);

    let errors = reader.finish(Some(())).expect_err("extra keys rejected");
    let fields: Vec<_> = errors.errors().iter().filter_map(FieldError::field_name).collect();
    assert_eq!(fields, vec!["owner", "tags"]);
}

#[test]
fn clean_reader_without_value_is_still_an_error() {
    let value = json!({});
    let reader = reader_for(&value);
    assert!(reader.finish::<()>(None).is_err());
}
