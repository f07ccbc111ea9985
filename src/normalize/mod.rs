//! Result normalization
//!
//! A record set is rendered as the legacy export frame (see [`frame`]), then a fixed
//! window of lines is cut out of the rendered text (see [`excise`]) and the remainder
//! is parsed back. The cut is positional: it only lands on the frame preamble when
//! the records carry 9 to 12 fields, which renders exactly three header lines. Any
//! other record shape or an empty set produces text that fails to parse, and that
//! failure is returned as [`NormalizeError::MalformedOutput`].
//!
//! [`normalize_structural`] is the structural alternative: it returns the rows as a
//! JSON array without touching rendered text.

pub mod excise;
pub mod frame;

pub use excise::{excise, strip_lines};
pub use frame::{frame, render};

use crate::types::{NormalizeMode, RecordSet};
use serde_json::Value;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum NormalizeError {
    /// The stripped and rejoined text is not JSON. `text` is what was parsed.
    #[error("normalized output is not valid JSON: {source}")]
    MalformedOutput {
        text: String,
        #[source]
        source: serde_json::Error,
    },
}

impl NormalizeError {
    /// The text that failed to parse, for callers that surface it raw.
    pub fn raw_text(&self) -> &str {
        match self {
            NormalizeError::MalformedOutput { text, .. } => text,
        }
    }
}

/// Render, strip lines 2..=6 and the last two, and parse the rest.
pub fn normalize(set: &RecordSet) -> Result<Value, NormalizeError> {
    let text = render(set)?;
    excise(&text)
}

pub fn normalize_structural(set: &RecordSet) -> Value {
    Value::Array(set.rows.iter().cloned().map(Value::Object).collect())
}

pub fn normalize_with(set: &RecordSet, mode: NormalizeMode) -> Result<Value, NormalizeError> {
    match mode {
        NormalizeMode::Positional => normalize(set),
        NormalizeMode::Structural => Ok(normalize_structural(set)),
    }
}
