//! Errors raised while building options and parsing language files.

use thiserror::Error;

/// Why loader options could not be built.
#[derive(Debug, Error)]
pub enum OptionsError {
    /// A detection pattern failed to compile.
    #[error("Invalid pattern for '{field}': {source}")]
    InvalidPattern {
        /// The option the pattern was supplied for.
        field: &'static str,
        #[source]
        source: regex::Error,
    },
    /// A detection pattern compiled but has no group to extract the code from.
    #[error("Pattern for '{field}' must contain a capture group")]
    MissingCaptureGroup {
        /// The option the pattern was supplied for.
        field: &'static str,
    },
}

#[derive(Debug, Error)]
pub enum PayloadError {
    /// The body is not valid JSON.
    #[error("Language file is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),
    /// The body is valid JSON but not an object.
    #[error("Language file must be a JSON object, found {found}")]
    NotAnObject {
        /// The JSON type that was found instead.
        found: &'static str,
    },
    /// An entry maps to an array or object instead of a plain value.
    #[error("Language entry '{key}' must be a string, number or boolean")]
    NestedValue {
        /// The offending key.
        key: String,
    },
}
