//! Purpose: Translate typed failures into HTTP response material for callers.
//! Exports: `status_for`, `error_envelope`, `respond`, `ErrorEnvelope`, `ErrorBody`.
//! Role: Caller-side mapping only; this crate owns no server or transport.
//! Invariants: Kind-to-status mapping is stable; envelope fields are additive-only.

use crate::core::error::{Error, ErrorKind};
use http::StatusCode;
use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct ErrorEnvelope {
    pub error: ErrorBody,
}

#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub kind: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub key: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expected: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub found: Option<&'static str>,
}

/// Status for a failure kind: malformed bodies are the client's fault (400),
/// well-formed bodies with unusable fields are 422, encode faults are 500.
pub fn status_for(kind: ErrorKind) -> StatusCode {
    match kind {
        ErrorKind::Decode => StatusCode::BAD_REQUEST,
        ErrorKind::MissingField | ErrorKind::TypeMismatch => StatusCode::UNPROCESSABLE_ENTITY,
        ErrorKind::Internal => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

pub fn error_envelope(err: &Error) -> ErrorEnvelope {
    ErrorEnvelope {
        error: ErrorBody {
            kind: format!("{:?}", err.kind()),
            message: err.message().unwrap_or("error").to_string(),
            key: err.key().map(str::to_string),
            expected: err.expected(),
            found: err.found(),
        },
    }
}

pub fn respond(err: &Error) -> (StatusCode, ErrorEnvelope) {
    let status = status_for(err.kind());
    tracing::debug!(kind = ?err.kind(), status = %status, "translated request-body failure");
    (status, error_envelope(err))
}
