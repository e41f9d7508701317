//! Error types for pf-schema

use thiserror::Error;

/// Schema document / validator errors
#[derive(Error, Debug)]
pub enum SchemaError {
    /// S001: The schema document itself is not a valid JSON Schema
    #[error("[S001] Invalid schema document: {message}")]
    InvalidDocument { message: String },

    /// S002: Schema document file could not be read
    #[error("[S002] Failed to read schema document '{path}': {source}")]
    IoWithPath {
        path: String,
        source: std::io::Error,
    },

    /// S003: Schema document file is not valid JSON
    #[error("[S003] Failed to parse schema document '{path}': {message}")]
    ParseError { path: String, message: String },
}

/// Result type alias for SchemaError
pub type SchemaResult<T> = Result<T, SchemaError>;
