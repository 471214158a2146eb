//! Purpose: Define the request-body types and decode/encode entrypoints for the API.
//! Exports: `RawBody`, `DecodedFields`, `decode`, `decode_as`, `encode`, `type_name`.
//! Role: Stable body contract aligned with HTTP callers: bytes in, typed fields out.
//! Invariants: Decoding is pure and idempotent; each call works only on its own inputs.
//! Invariants: Absent keys and wrong-typed values surface as distinct error kinds.
#![allow(clippy::result_large_err)]

use crate::core::error::{Error, ErrorKind};
use crate::json::parse::{self, ParseFailureCategory};
use bstr::ByteSlice;
use bytes::Bytes;
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};

const MAX_SNIPPET_BYTES: usize = 64;

/// Unparsed request payload. Request-scoped; clones share the same bytes.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct RawBody {
    bytes: Bytes,
}

impl RawBody {
    pub fn new(bytes: impl Into<Bytes>) -> Self {
        Self {
            bytes: bytes.into(),
        }
    }

    pub fn from_static(bytes: &'static [u8]) -> Self {
        Self {
            bytes: Bytes::from_static(bytes),
        }
    }

    pub fn as_slice(&self) -> &[u8] {
        &self.bytes
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    pub fn into_bytes(self) -> Bytes {
        self.bytes
    }
}

impl From<Bytes> for RawBody {
    fn from(bytes: Bytes) -> Self {
        Self { bytes }
    }
}

impl From<Vec<u8>> for RawBody {
    fn from(bytes: Vec<u8>) -> Self {
        Self {
            bytes: Bytes::from(bytes),
        }
    }
}

impl From<&[u8]> for RawBody {
    fn from(bytes: &[u8]) -> Self {
        Self {
            bytes: Bytes::copy_from_slice(bytes),
        }
    }
}

impl From<String> for RawBody {
    fn from(text: String) -> Self {
        Self {
            bytes: Bytes::from(text),
        }
    }
}

impl From<&str> for RawBody {
    fn from(text: &str) -> Self {
        Self {
            bytes: Bytes::copy_from_slice(text.as_bytes()),
        }
    }
}

/// Parsed JSON object exposed as a string-keyed mapping.
///
/// Keys are unique and case-sensitive; insertion order carries no meaning.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct DecodedFields {
    fields: Map<String, Value>,
}

impl DecodedFields {
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.fields.get(key)
    }

    pub fn require(&self, key: &str) -> Result<&Value, Error> {
        self.fields.get(key).ok_or_else(|| missing_field(key))
    }

    pub fn get_str(&self, key: &str) -> Result<&str, Error> {
        let value = self.require(key)?;
        value
            .as_str()
            .ok_or_else(|| type_mismatch(key, "string", type_name(value)))
    }

    pub fn get_bool(&self, key: &str) -> Result<bool, Error> {
        let value = self.require(key)?;
        value
            .as_bool()
            .ok_or_else(|| type_mismatch(key, "boolean", type_name(value)))
    }

    pub fn get_i64(&self, key: &str) -> Result<i64, Error> {
        let value = self.require(key)?;
        match value {
            Value::Number(number) => number.as_i64().ok_or_else(|| {
                type_mismatch(key, "integer", "number")
                    .with_message("number does not fit in a signed 64-bit integer")
            }),
            other => Err(type_mismatch(key, "number", type_name(other))),
        }
    }

    pub fn get_u64(&self, key: &str) -> Result<u64, Error> {
        let value = self.require(key)?;
        match value {
            Value::Number(number) => number.as_u64().ok_or_else(|| {
                type_mismatch(key, "integer", "number")
                    .with_message("number does not fit in an unsigned 64-bit integer")
            }),
            other => Err(type_mismatch(key, "number", type_name(other))),
        }
    }

    pub fn get_f64(&self, key: &str) -> Result<f64, Error> {
        let value = self.require(key)?;
        value
            .as_f64()
            .ok_or_else(|| type_mismatch(key, "number", type_name(value)))
    }

    pub fn get_array(&self, key: &str) -> Result<&Vec<Value>, Error> {
        let value = self.require(key)?;
        value
            .as_array()
            .ok_or_else(|| type_mismatch(key, "array", type_name(value)))
    }

    pub fn get_object(&self, key: &str) -> Result<&Map<String, Value>, Error> {
        let value = self.require(key)?;
        value
            .as_object()
            .ok_or_else(|| type_mismatch(key, "object", type_name(value)))
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.fields.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.fields.keys().map(String::as_str)
    }

    pub fn as_map(&self) -> &Map<String, Value> {
        &self.fields
    }
}

impl From<Map<String, Value>> for DecodedFields {
    fn from(fields: Map<String, Value>) -> Self {
        Self { fields }
    }
}

/// Decode a request body into a string-keyed field mapping.
///
/// Fails with kind `Decode` when the body is not valid UTF-8, is not
/// well-formed JSON, or is well-formed JSON whose top level is not an object.
pub fn decode(raw: &RawBody) -> Result<DecodedFields, Error> {
    let text = utf8_text(raw)?;
    match parse::from_str::<Map<String, Value>>(text) {
        Ok(fields) => Ok(DecodedFields { fields }),
        Err(err) => Err(parse_error(
            raw,
            err,
            "body.decode",
            "body is valid JSON but not an object",
        )),
    }
}

/// Decode a request body into a caller-declared shape.
pub fn decode_as<T: DeserializeOwned>(raw: &RawBody) -> Result<T, Error> {
    let text = utf8_text(raw)?;
    parse::from_str(text).map_err(|err| {
        parse_error(
            raw,
            err,
            "body.decode_as",
            "body does not match the expected shape",
        )
    })
}

/// Serialize a field mapping back to JSON text.
pub fn encode(fields: &DecodedFields) -> Result<String, Error> {
    serde_json::to_string(&fields.fields).map_err(|err| {
        Error::new(ErrorKind::Internal)
            .with_message("failed to encode fields as JSON")
            .with_source(err)
    })
}

/// Stable label for a JSON value's variant, used in mismatch diagnostics.
pub fn type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

pub(crate) fn missing_field(key: &str) -> Error {
    Error::new(ErrorKind::MissingField)
        .with_message("required field is absent")
        .with_key(key)
}

pub(crate) fn type_mismatch(key: &str, expected: &'static str, found: &'static str) -> Error {
    Error::new(ErrorKind::TypeMismatch)
        .with_message(format!("value has type {found}, expected {expected}"))
        .with_key(key)
        .with_expected(expected)
        .with_found(found)
}

fn utf8_text(raw: &RawBody) -> Result<&str, Error> {
    std::str::from_utf8(raw.as_slice()).map_err(|err| {
        tracing::debug!(len = raw.len(), "request body is not valid UTF-8");
        Error::new(ErrorKind::Decode)
            .with_message("body is not valid UTF-8")
            .with_hint(format!(
                "parse category: {}; body snippet: {}",
                ParseFailureCategory::Utf8.label(),
                snippet(raw.as_slice())
            ))
            .with_source(err)
    })
}

fn parse_error(
    raw: &RawBody,
    err: serde_json::Error,
    context: &'static str,
    data_message: &'static str,
) -> Error {
    let category = parse::categorize_error(&err);
    tracing::debug!(
        len = raw.len(),
        category = category.label(),
        context,
        "request body failed to decode"
    );
    let message = match category {
        ParseFailureCategory::Syntax => "body is not well-formed JSON",
        ParseFailureCategory::Eof => "body is empty or truncated",
        ParseFailureCategory::DepthLimit => "body nests deeper than the decoder allows",
        ParseFailureCategory::Data => data_message,
        ParseFailureCategory::Utf8 | ParseFailureCategory::Unknown => "body failed to decode",
    };
    let hint = format!(
        "{}; body snippet: {}",
        parse::hint_for_error(&err, context),
        snippet(raw.as_slice())
    );
    Error::new(ErrorKind::Decode)
        .with_message(message)
        .with_hint(hint)
        .with_source(err)
}

fn snippet(bytes: &[u8]) -> String {
    let take = bytes.len().min(MAX_SNIPPET_BYTES);
    let mut text = bytes[..take].to_str_lossy().into_owned();
    if bytes.len() > take {
        text.push_str("...");
    }
    text
}

#[cfg(test)]
mod tests {
    use super::{RawBody, decode, decode_as, encode, type_name};
    use crate::core::error::ErrorKind;
    use bytes::Bytes;
    use serde_json::json;

    #[test]
    fn decode_exposes_string_field() {
        let raw = RawBody::from(r#"{"name": "alice", "age": 30}"#);
        let fields = decode(&raw).expect("decode");
        assert_eq!(fields.get_str("name").expect("name"), "alice");
        assert_eq!(fields.get_i64("age").expect("age"), 30);
        assert_eq!(fields.len(), 2);
    }

    #[test]
    fn missing_key_is_missing_field() {
        let raw = RawBody::from("{}");
        let fields = decode(&raw).expect("decode");
        let err = fields.get_str("name").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::MissingField);
        assert_eq!(err.key(), Some("name"));
    }

    #[test]
    fn wrong_type_is_type_mismatch() {
        let raw = RawBody::from(r#"{"name": 42}"#);
        let fields = decode(&raw).expect("decode");
        let err = fields.get_str("name").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::TypeMismatch);
        assert_eq!(err.expected(), Some("string"));
        assert_eq!(err.found(), Some("number"));
    }

    #[test]
    fn decode_rejects_invalid_utf8() {
        let raw = RawBody::from(&[0xff, b'{', b'}'][..]);
        let err = decode(&raw).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Decode);
        assert!(err.hint().expect("hint").contains("parse category: utf8"));
    }

    #[test]
    fn decode_rejects_malformed_json() {
        let raw = RawBody::from("{not json");
        let err = decode(&raw).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Decode);
        assert!(err.hint().expect("hint").contains("parse category: syntax"));
    }

    #[test]
    fn integer_accessors_reject_fractional_numbers() {
        let raw = RawBody::from(r#"{"count": 2.5}"#);
        let fields = decode(&raw).expect("decode");
        let err = fields.get_i64("count").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::TypeMismatch);
        assert_eq!(err.expected(), Some("integer"));
        assert_eq!(fields.get_f64("count").expect("f64"), 2.5);
    }

    #[test]
    fn float_accessor_accepts_integers() {
        let raw = RawBody::from(r#"{"count": 3}"#);
        let fields = decode(&raw).expect("decode");
        assert_eq!(fields.get_f64("count").expect("f64"), 3.0);
        assert_eq!(fields.get_u64("count").expect("u64"), 3);
    }

    #[test]
    fn container_accessors_expose_nested_values() {
        let raw = RawBody::from(r#"{"tags": ["a", "b"], "user": {"id": 7}}"#);
        let fields = decode(&raw).expect("decode");
        assert_eq!(fields.get_array("tags").expect("tags").len(), 2);
        let user = fields.get_object("user").expect("user");
        assert_eq!(user.get("id"), Some(&json!(7)));
        let err = fields.get_object("tags").unwrap_err();
        assert_eq!(err.found(), Some("array"));
    }

    #[test]
    fn boolean_accessor_distinguishes_kinds() {
        let raw = RawBody::from(r#"{"active": true, "count": 1}"#);
        let fields = decode(&raw).expect("decode");
        assert!(fields.get_bool("active").expect("active"));

        let err = fields.get_bool("count").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::TypeMismatch);
        assert_eq!(err.expected(), Some("boolean"));
        assert_eq!(err.found(), Some("number"));
    }

    #[test]
    fn introspection_reports_keys_and_membership() {
        let raw = RawBody::from_static(br#"{"a": 1, "b": 2}"#);
        let fields = decode(&raw).expect("decode");
        assert!(fields.contains_key("a"));
        assert!(!fields.contains_key("c"));
        assert_eq!(fields.keys().collect::<Vec<_>>(), vec!["a", "b"]);
        assert_eq!(fields.as_map().len(), 2);
    }

    #[test]
    fn raw_body_constructors_share_bytes() {
        let body = RawBody::new(Bytes::from_static(b"{}"));
        assert_eq!(body.len(), 2);
        assert!(!body.is_empty());
        assert_eq!(body.as_slice(), b"{}");

        let clone = body.clone();
        assert_eq!(clone, body);
        assert_eq!(clone.into_bytes(), Bytes::from_static(b"{}"));
    }

    #[test]
    fn decode_as_fills_typed_shapes() {
        #[derive(Debug, serde::Deserialize)]
        struct Greeting {
            name: String,
        }

        let raw = RawBody::from(r#"{"name": "alice"}"#);
        let greeting: Greeting = decode_as(&raw).expect("decode_as");
        assert_eq!(greeting.name, "alice");

        let mismatch = decode_as::<Greeting>(&RawBody::from(r#"{"name": 42}"#)).unwrap_err();
        assert_eq!(mismatch.kind(), ErrorKind::Decode);
        assert!(
            mismatch
                .hint()
                .expect("hint")
                .contains("parse category: data")
        );
    }

    #[test]
    fn encode_round_trips_through_decode() {
        let raw = RawBody::from(r#"{"name": "alice", "tags": ["x"], "n": 1}"#);
        let fields = decode(&raw).expect("decode");
        let text = encode(&fields).expect("encode");
        let again = decode(&RawBody::from(text)).expect("decode again");
        assert_eq!(fields, again);
    }

    #[test]
    fn type_name_labels_every_variant() {
        assert_eq!(type_name(&json!(null)), "null");
        assert_eq!(type_name(&json!(true)), "boolean");
        assert_eq!(type_name(&json!(1)), "number");
        assert_eq!(type_name(&json!("s")), "string");
        assert_eq!(type_name(&json!([])), "array");
        assert_eq!(type_name(&json!({})), "object");
    }
}
