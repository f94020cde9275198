//! Error types for the Zircuit impedance engine.
//!
//! This module provides a unified error type [`ZircuitError`] that covers
//! all error conditions that can occur during model-file parsing and
//! table output. Circuit construction and impedance evaluation never fail
//! for well-typed input, so the fallible surface is confined to the parser
//! and the file writers.

use thiserror::Error;

/// Result type alias using [`ZircuitError`].
pub type Result<T> = std::result::Result<T, ZircuitError>;

/// Unified error type for all Zircuit operations.
#[derive(Error, Debug)]
pub enum ZircuitError {
    // ============ Model-File Parsing Errors ============
    /// General parse error tied to a line of the model file
    #[error("Parse error at line {line}: {message}")]
    ParseError { line: usize, message: String },

    /// A field line expected at a fixed offset after a type marker is missing
    #[error("Missing '{field}' field for element at line {line}")]
    MissingField { line: usize, field: &'static str },

    /// A field value did not parse as a number
    #[error("Invalid number '{text}' at line {line}")]
    InvalidNumber { line: usize, text: String },

    /// A fixed/free flag was outside the accepted code set
    #[error("Invalid fixed/free flag '{code}' at line {line} (expected 0, 1 or 2)")]
    InvalidFlag { line: usize, code: String },

    /// The file contained no recognizable element markers
    #[error("Model file contains no element definitions")]
    EmptyModel,

    /// A parallel group was opened but never closed
    #[error("Parallel group opened at line {line} is never closed")]
    UnclosedGroup { line: usize },

    /// A parallel group was closed without a matching open
    #[error("Parallel group closed at line {line} without a matching open")]
    UnmatchedGroupEnd { line: usize },

    /// A parallel group contained no elements
    #[error("Parallel group opened at line {line} contains no elements")]
    EmptyGroup { line: usize },

    // ============ I/O Errors ============
    /// Error reading a model file
    #[error("Failed to read model file '{path}': {source}")]
    FileReadError {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// Error writing an impedance table
    #[error("Failed to write impedance table '{path}': {source}")]
    FileWriteError {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

impl ZircuitError {
    /// Create a parse error
    pub fn parse(line: usize, message: impl Into<String>) -> Self {
        Self::ParseError {
            line,
            message: message.into(),
        }
    }

    /// Create a missing-field error
    pub fn missing_field(line: usize, field: &'static str) -> Self {
        Self::MissingField { line, field }
    }

    /// Create an invalid-number error
    pub fn invalid_number(line: usize, text: impl Into<String>) -> Self {
        Self::InvalidNumber {
            line,
            text: text.into(),
        }
    }

    /// Create an invalid-flag error
    pub fn invalid_flag(line: usize, code: impl Into<String>) -> Self {
        Self::InvalidFlag {
            line,
            code: code.into(),
        }
    }

    /// Create a file-read error
    pub fn file_read(path: impl Into<String>, source: std::io::Error) -> Self {
        Self::FileReadError {
            path: path.into(),
            source,
        }
    }

    /// Create a file-write error
    pub fn file_write(path: impl Into<String>, source: std::io::Error) -> Self {
        Self::FileWriteError {
            path: path.into(),
            source,
        }
    }
}
