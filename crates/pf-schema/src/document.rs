//! Versioned schema documents.
//!
//! The two validation documents (model node schema, metric schema) are
//! external static configuration, versioned independently of the manifest
//! format. Defaults ship embedded in the crate; deployments can swap in
//! newer documents from disk without touching validation logic.

use crate::error::{SchemaError, SchemaResult};
use std::path::Path;

/// Embedded default model-node schema (version 1).
pub const MODEL_SCHEMA_V1: &str = include_str!("../documents/model.v1.json");

/// Embedded default metric schema (version 1).
pub const METRIC_SCHEMA_V1: &str = include_str!("../documents/metric.v1.json");

/// A JSON Schema document plus its version number.
#[derive(Debug, Clone)]
pub struct SchemaDocument {
    version: u32,
    raw: serde_json::Value,
}

impl SchemaDocument {
    /// Wrap an in-memory JSON Schema value.
    pub fn new(version: u32, raw: serde_json::Value) -> Self {
        Self { version, raw }
    }

    /// Parse a schema document from a JSON string.
    pub fn from_json(version: u32, content: &str) -> SchemaResult<Self> {
        let raw = serde_json::from_str(content).map_err(|e| SchemaError::InvalidDocument {
            message: e.to_string(),
        })?;
        Ok(Self { version, raw })
    }

    /// Load a schema document from a file.
    pub fn from_path(version: u32, path: &Path) -> SchemaResult<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| SchemaError::IoWithPath {
            path: path.display().to_string(),
            source: e,
        })?;
        let raw = serde_json::from_str(&content).map_err(|e| SchemaError::ParseError {
            path: path.display().to_string(),
            message: e.to_string(),
        })?;
        Ok(Self { version, raw })
    }

    /// Embedded default model-node document.
    pub fn embedded_model() -> SchemaResult<Self> {
        Self::from_json(1, MODEL_SCHEMA_V1)
    }

    /// Embedded default metric document.
    pub fn embedded_metric() -> SchemaResult<Self> {
        Self::from_json(1, METRIC_SCHEMA_V1)
    }

    /// Document version.
    pub fn version(&self) -> u32 {
        self.version
    }

    /// The raw JSON Schema value.
    pub fn raw(&self) -> &serde_json::Value {
        &self.raw
    }
}
