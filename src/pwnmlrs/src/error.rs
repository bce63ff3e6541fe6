// pwnmlrs/src/error.rs

//! Error types for reading and writing namelist/card input decks.

use std::io;
use thiserror::Error;

/// Result type alias for pwnmlrs operations.
pub type Result<T> = std::result::Result<T, NmlError>;

/// Errors that can occur while scanning, parsing, or writing an input deck.
#[derive(Debug, Error)]
pub enum NmlError {
    /// I/O error when reading or writing files
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// Generic syntax error with position
    #[error("parse error at line {line}, column {column}: {message}")]
    Parse {
        message: String,
        line: usize,
        column: usize,
    },

    /// A namelist group was opened but never closed with `/`
    #[error("namelist '{group}' opened at line {line} is never terminated")]
    UnterminatedGroup { group: String, line: usize },

    /// A quoted string runs to the end of its line
    #[error("unterminated string literal at line {line}, column {column}")]
    UnterminatedString { line: usize, column: usize },

    /// The same namelist group appears twice in one input
    #[error("namelist '{name}' appears more than once (second occurrence at line {line})")]
    DuplicateGroup { name: String, line: usize },

    /// A variable was given a list of values
    #[error("variable '{variable}' in namelist '{group}' has {count} values, only scalars are supported")]
    MultipleValues {
        group: String,
        variable: String,
        count: usize,
    },

    /// A variable was assigned nothing
    #[error("variable '{variable}' in namelist '{group}' has no value")]
    MissingValue { group: String, variable: String },

    /// A literal could not be converted to the requested type
    #[error("invalid value '{value}', expected {expected_type}")]
    InvalidValue {
        value: String,
        expected_type: &'static str,
    },
}

impl NmlError {
    pub fn parse_error<S: Into<String>>(message: S, line: usize, column: usize) -> Self {
        NmlError::Parse {
            message: message.into(),
            line,
            column,
        }
    }

    pub fn invalid_value<S: Into<String>>(value: S, expected_type: &'static str) -> Self {
        NmlError::InvalidValue {
            value: value.into(),
            expected_type,
        }
    }

    /// Line number the error refers to, when known.
    pub fn line(&self) -> Option<usize> {
        match self {
            NmlError::Parse { line, .. }
            | NmlError::UnterminatedGroup { line, .. }
            | NmlError::UnterminatedString { line, .. }
            | NmlError::DuplicateGroup { line, .. } => Some(*line),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_error_display() {
        let err = NmlError::parse_error("unexpected '='", 3, 7);
        assert_eq!(
            err.to_string(),
            "parse error at line 3, column 7: unexpected '='"
        );
        assert_eq!(err.line(), Some(3));
    }

    #[test]
    fn test_io_error_has_no_line() {
        let err: NmlError = io::Error::new(io::ErrorKind::NotFound, "gone").into();
        assert!(err.line().is_none());
        assert!(err.to_string().starts_with("I/O error"));
    }
}
