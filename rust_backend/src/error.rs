//! Error types for catalog ingestion.
//!
//! Loading a source fails in one of three ways: the file cannot be opened or
//! read ([`LoadError::FileAccess`]), a structural element is missing or
//! malformed ([`LoadError::Format`]), or a single field is rejected by a
//! domain constructor ([`LoadError::FieldConversion`]). None of them are
//! retried; they are surfaced to the caller as-is.

use std::io;
use std::path::PathBuf;

/// Result type for loader operations
pub type LoadResult<T> = Result<T, LoadError>;

/// Error type for loader operations
#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    #[error("Cannot read {}: {source}", path.display())]
    FileAccess {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Format error: {0}")]
    Format(#[from] FormatError),

    #[error("Invalid field in row {row}: {source}")]
    FieldConversion {
        /// 1-based position of the offending data row
        row: usize,
        #[source]
        source: FieldError,
    },
}

impl LoadError {
    pub(crate) fn file_access(path: impl Into<PathBuf>, source: io::Error) -> Self {
        LoadError::FileAccess {
            path: path.into(),
            source,
        }
    }

    pub(crate) fn field(row: usize, source: FieldError) -> Self {
        LoadError::FieldConversion { row, source }
    }

    pub fn is_file_access(&self) -> bool {
        matches!(self, LoadError::FileAccess { .. })
    }

    pub fn is_format(&self) -> bool {
        matches!(self, LoadError::Format(_))
    }

    pub fn is_field_conversion(&self) -> bool {
        matches!(self, LoadError::FieldConversion { .. })
    }
}

/// A required structural element of a source is absent or malformed.
#[derive(Debug, thiserror::Error)]
pub enum FormatError {
    #[error("missing required column(s): {}", .0.join(", "))]
    MissingColumns(Vec<String>),

    #[error("invalid JSON syntax: {0}")]
    Syntax(String),

    #[error("top-level value must be an object, found {0}")]
    NotAnObject(&'static str),

    #[error("JSON must contain a '{key}' key. Found keys: {found:?}")]
    MissingKey { key: &'static str, found: Vec<String> },

    #[error("'{key}' must be an array, found {found}")]
    NotAnArray {
        key: &'static str,
        found: &'static str,
    },

    #[error("row {row} must be an array, found {found}")]
    RowNotAnArray { row: usize, found: &'static str },

    #[error("row {row} has {width} field(s), at least {expected} required")]
    RowTooShort {
        row: usize,
        width: usize,
        expected: usize,
    },

    #[error("field header at position {position} is '{found}', expected '{expected}'")]
    FieldHeaderMismatch {
        position: usize,
        expected: &'static str,
        found: String,
    },

    #[error("malformed record at row {row}: {message}")]
    Record { row: usize, message: String },

    #[error("cannot decode {path}: {message}")]
    Decode { path: String, message: String },
}

/// A single field value was rejected by a domain constructor.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum FieldError {
    #[error("missing required field '{field}'")]
    Missing { field: &'static str },

    #[error("field '{field}' is not a number: '{value}'")]
    InvalidNumber { field: &'static str, value: String },

    #[error("unrecognized hazard marker '{value}'")]
    InvalidFlag { value: String },

    #[error("unrecognized approach time '{value}'")]
    InvalidTime { value: String },
}

/// Names the JSON type of a value for error messages.
pub(crate) fn json_type_name(value: &serde_json::Value) -> &'static str {
    match value {
        serde_json::Value::Null => "null",
        serde_json::Value::Bool(_) => "boolean",
        serde_json::Value::Number(_) => "number",
        serde_json::Value::String(_) => "string",
        serde_json::Value::Array(_) => "array",
        serde_json::Value::Object(_) => "object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_columns_message_lists_all() {
        let err = LoadError::from(FormatError::MissingColumns(vec![
            "diameter".to_string(),
            "pha".to_string(),
        ]));
        assert!(err.is_format());
        assert!(err.to_string().contains("diameter, pha"));
    }

    #[test]
    fn test_field_conversion_keeps_source() {
        use std::error::Error;

        let err = LoadError::field(
            3,
            FieldError::InvalidNumber {
                field: "diameter",
                value: "big".to_string(),
            },
        );
        assert!(err.is_field_conversion());
        let source = err.source().and_then(|s| s.downcast_ref::<FieldError>());
        assert_eq!(
            source,
            Some(&FieldError::InvalidNumber {
                field: "diameter",
                value: "big".to_string(),
            })
        );
    }

    #[test]
    fn test_file_access_mentions_path() {
        let err = LoadError::file_access(
            "/nope/neos.csv",
            io::Error::new(io::ErrorKind::NotFound, "gone"),
        );
        assert!(err.is_file_access());
        assert!(err.to_string().contains("/nope/neos.csv"));
    }
}
