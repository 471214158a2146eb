//! Purpose: Define the stable public Rust API boundary for reqfields.
//! Exports: Body decoding, field access, greeting, and response translation.
//! Role: Public, additive-only surface; hides decode internals.
//! Invariants: This module is the only public path to decode and lookup.
//! Invariants: Internal modules remain private and are not directly exposed.

mod body;
mod greeting;
mod lookup;
mod respond;

pub use crate::core::error::{Error, ErrorKind};
pub use body::{DecodedFields, RawBody, decode, decode_as, encode, type_name};
pub use greeting::{GREETING_FIELD, greet, greet_body};
pub use lookup::{str_at, value_at};
pub use respond::{ErrorBody, ErrorEnvelope, error_envelope, respond, status_for};
