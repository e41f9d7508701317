//! pf-schema - Pluggable schema validation for Prismflow
//!
//! Manifest nodes are validated against versioned JSON Schema documents
//! before they are trusted. This crate provides the documents, the
//! validator abstraction, and stable diagnostic formatting.

pub mod document;
pub mod error;
pub mod validator;

pub use document::{SchemaDocument, METRIC_SCHEMA_V1, MODEL_SCHEMA_V1};
pub use error::{SchemaError, SchemaResult};
pub use validator::{
    join_diagnostics, Diagnostic, JsonSchemaValidator, NodeValidator, SchemaStore,
};
