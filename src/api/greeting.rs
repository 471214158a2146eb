//! Purpose: Provide the greeting pipeline over decoded request bodies.
//! Exports: `GREETING_FIELD`, `greet`, `greet_body`.
//! Role: Reference caller of the decode + lookup contract; output format is stable.
//! Invariants: Output is exactly `Hello :<name>!` for the string `name` field.
#![allow(clippy::result_large_err)]

use super::body::{DecodedFields, RawBody, decode};
use crate::core::error::Error;

pub const GREETING_FIELD: &str = "name";

pub fn greet(fields: &DecodedFields) -> Result<String, Error> {
    let name = fields.get_str(GREETING_FIELD)?;
    Ok(format!("Hello :{name}!"))
}

pub fn greet_body(raw: &RawBody) -> Result<String, Error> {
    let fields = decode(raw)?;
    greet(&fields)
}
