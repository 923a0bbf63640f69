// ATV e2e - check errors

use reqwest::StatusCode;
use serde_json::Value;

/// Every way the schema check can fail.
///
/// Variants map one-to-one to the step that raised them, so the caller can
/// tell a dead deployment (`Request`) from a broken one (`Status`) from a
/// deployment serving the wrong document (`MissingField`, `ValueMismatch`).
#[derive(Debug, thiserror::Error)]
pub enum CheckError {
    #[error("Invalid configuration: {0}")]
    Config(String),

    #[error("Request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("Unexpected status {status} from {url}")]
    Status { url: String, status: StatusCode },

    #[error("Response body is not valid JSON: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("Response body decoded to null")]
    NullDocument,

    #[error("Schema is missing property '{0}'")]
    MissingField(String),

    #[error("Property '{path}' should be {expected}, got {actual}")]
    WrongType {
        path: String,
        expected: &'static str,
        actual: &'static str,
    },

    #[error("Property '{path}' mismatch: expected {expected:?}, got {actual:?}")]
    ValueMismatch {
        path: String,
        expected: String,
        actual: String,
    },
}

impl CheckError {
    /// Short machine-readable code, used as a structured log field.
    pub fn code(&self) -> &'static str {
        match self {
            CheckError::Config(_) => "CONFIG",
            CheckError::Request(_) => "REQUEST",
            CheckError::Status { .. } => "STATUS",
            CheckError::Decode(_) => "DECODE",
            CheckError::NullDocument => "NULL_DOCUMENT",
            CheckError::MissingField(_) => "MISSING_FIELD",
            CheckError::WrongType { .. } => "WRONG_TYPE",
            CheckError::ValueMismatch { .. } => "VALUE_MISMATCH",
        }
    }
}

/// JSON type name for `WrongType` messages.
pub(crate) fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

pub type CheckResult<T> = Result<T, CheckError>;
