//! Purpose: Resolve dotted paths against decoded fields for nested extraction.
//! Exports: `value_at`, `str_at`.
//! Role: Path layer over `DecodedFields` for callers that address nested values.
//! Invariants: Paths use dotted segments; numeric segments index arrays.
//! Invariants: Absent steps are MissingField; traversing into a leaf is TypeMismatch.
#![allow(clippy::result_large_err)]

use super::body::{DecodedFields, type_mismatch, type_name};
use crate::core::error::{Error, ErrorKind};
use serde_json::Value;

/// Resolve a dotted path like `user.emails.0` against the field mapping.
pub fn value_at<'a>(fields: &'a DecodedFields, path: &str) -> Result<&'a Value, Error> {
    let mut segments = path.split('.');
    let first = match segments.next() {
        Some(segment) if !segment.is_empty() => segment,
        _ => return Err(empty_path(path)),
    };
    let mut current = fields.get(first).ok_or_else(|| step_missing(path, first))?;
    for segment in segments {
        if segment.is_empty() {
            return Err(empty_path(path));
        }
        current = step(current, path, segment)?;
    }
    Ok(current)
}

/// Resolve a dotted path and require a string at its end.
pub fn str_at<'a>(fields: &'a DecodedFields, path: &str) -> Result<&'a str, Error> {
    let value = value_at(fields, path)?;
    value
        .as_str()
        .ok_or_else(|| type_mismatch(path, "string", type_name(value)))
}

fn step<'a>(value: &'a Value, path: &str, segment: &str) -> Result<&'a Value, Error> {
    match value {
        Value::Object(map) => map.get(segment).ok_or_else(|| step_missing(path, segment)),
        Value::Array(items) => {
            let index = segment.parse::<usize>().map_err(|_| {
                type_mismatch(path, "object", "array")
                    .with_message(format!("array step '{segment}' requires a numeric index"))
            })?;
            items
                .get(index)
                .ok_or_else(|| index_out_of_bounds(path, segment, items.len()))
        }
        other => Err(type_mismatch(path, "object", type_name(other))
            .with_message(format!("path step '{segment}' cannot traverse into a leaf"))),
    }
}

fn step_missing(path: &str, segment: &str) -> Error {
    Error::new(ErrorKind::MissingField)
        .with_message(format!("path step '{segment}' is absent"))
        .with_key(path)
}

fn index_out_of_bounds(path: &str, segment: &str, len: usize) -> Error {
    Error::new(ErrorKind::MissingField)
        .with_message(format!("array index {segment} is out of bounds (len {len})"))
        .with_key(path)
}

fn empty_path(path: &str) -> Error {
    Error::new(ErrorKind::MissingField)
        .with_message("path is empty or has an empty segment")
        .with_key(path)
        .with_hint("Use dotted segments, for example user.name or items.0.")
}
