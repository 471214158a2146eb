//! Purpose: Provide the internal runtime JSON decode entrypoints.
//! Exports: `from_str`, `ParseFailureCategory`, `categorize_error`, `hint_for_error`.
//! Role: Parser boundary that centralizes serde_json usage details.
//! Invariants: Runtime JSON decoding goes through this module.
//! Invariants: No crate-internal imports; mapping into domain errors stays at callsites.
//! Notes: Category labels are stable; decode diagnostics embed them verbatim.

use serde::de::DeserializeOwned;
use serde_json::error::Category;

pub(crate) fn from_str<T: DeserializeOwned>(input: &str) -> Result<T, serde_json::Error> {
    serde_json::from_str(input)
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) enum ParseFailureCategory {
    Utf8,
    Syntax,
    Eof,
    Data,
    DepthLimit,
    Unknown,
}

impl ParseFailureCategory {
    pub(crate) fn label(self) -> &'static str {
        match self {
            Self::Utf8 => "utf8",
            Self::Syntax => "syntax",
            Self::Eof => "eof",
            Self::Data => "data",
            Self::DepthLimit => "depth-limit",
            Self::Unknown => "unknown",
        }
    }
}

pub(crate) fn categorize_error(err: &serde_json::Error) -> ParseFailureCategory {
    match err.classify() {
        Category::Eof => ParseFailureCategory::Eof,
        Category::Data => ParseFailureCategory::Data,
        Category::Syntax => match categorize_message(&err.to_string()) {
            ParseFailureCategory::DepthLimit => ParseFailureCategory::DepthLimit,
            _ => ParseFailureCategory::Syntax,
        },
        Category::Io => ParseFailureCategory::Unknown,
    }
}

pub(crate) fn categorize_message(message: &str) -> ParseFailureCategory {
    if message.contains("recursion limit exceeded") {
        ParseFailureCategory::DepthLimit
    } else {
        ParseFailureCategory::Unknown
    }
}

pub(crate) fn hint_for_error(err: &serde_json::Error, context: &str) -> String {
    format!(
        "parse category: {}; context: {}; position: line {} column {}",
        categorize_error(err).label(),
        context,
        err.line(),
        err.column()
    )
}
