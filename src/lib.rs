//! Purpose: Typed field extraction over JSON request bodies.
//! Exports: `api` (decode, field access, greeting, response translation).
//! Role: Library crate embedded by services that own the transport layer.
//! Invariants: `api` is the stable surface; `core` and `json` back it.
//! Invariants: Modules prefer explicit inputs/outputs over hidden state.
pub mod api;
pub mod core;
pub(crate) mod json;
