//! Node validators and diagnostics.
//!
//! Validation is abstracted behind [`NodeValidator`] so schema versions and
//! adapter-specific variants can be swapped in without any change to the
//! validation call sites.

use crate::document::SchemaDocument;
use crate::error::{SchemaError, SchemaResult};
use jsonschema::{Draft, JSONSchema};
use pf_core::AdapterType;
use serde::Serialize;
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

/// A single validation finding against a node.
///
/// Displays as `"<field path> <message>"`; this formatting is stable and
/// relied on by golden-output tests downstream.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Diagnostic {
    /// JSON pointer to the offending field (`/` for the node root)
    pub path: String,

    /// Human-readable message
    pub message: String,
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.path, self.message)
    }
}

/// Join diagnostics into the newline-separated form carried by explore
/// errors.
pub fn join_diagnostics(diagnostics: &[Diagnostic]) -> String {
    diagnostics
        .iter()
        .map(Diagnostic::to_string)
        .collect::<Vec<_>>()
        .join("\n")
}

/// Validates a raw manifest node against a schema document.
pub trait NodeValidator: Send + Sync {
    /// All findings for a node, in document order. Empty means valid.
    fn diagnostics(&self, node: &serde_json::Value) -> Vec<Diagnostic>;

    /// Version of the document this validator was built from.
    fn version(&self) -> u32;
}

/// A [`NodeValidator`] backed by a compiled JSON Schema (draft 7).
pub struct JsonSchemaValidator {
    compiled: JSONSchema,
    version: u32,
}

impl JsonSchemaValidator {
    /// Compile a schema document into a validator.
    pub fn compile(document: &SchemaDocument) -> SchemaResult<Self> {
        let compiled = JSONSchema::options()
            .with_draft(Draft::Draft7)
            .compile(document.raw())
            .map_err(|e| SchemaError::InvalidDocument {
                message: e.to_string(),
            })?;
        Ok(Self {
            compiled,
            version: document.version(),
        })
    }
}

impl NodeValidator for JsonSchemaValidator {
    fn diagnostics(&self, node: &serde_json::Value) -> Vec<Diagnostic> {
        match self.compiled.validate(node) {
            Ok(()) => Vec::new(),
            Err(errors) => errors
                .map(|err| {
                    let pointer = err.instance_path.to_string();
                    Diagnostic {
                        path: if pointer.is_empty() {
                            "/".to_string()
                        } else {
                            pointer
                        },
                        message: err.to_string(),
                    }
                })
                .collect(),
        }
    }

    fn version(&self) -> u32 {
        self.version
    }
}

/// Holds the compiled validators for one compilation run.
///
/// The model validator can be overridden per adapter type; lookups fall
/// back to the default document when no variant is registered.
pub struct SchemaStore {
    model: Arc<dyn NodeValidator>,
    metric: Arc<dyn NodeValidator>,
    model_overrides: HashMap<AdapterType, Arc<dyn NodeValidator>>,
}

impl SchemaStore {
    /// Build a store from explicit model and metric documents.
    pub fn new(model: &SchemaDocument, metric: &SchemaDocument) -> SchemaResult<Self> {
        Ok(Self {
            model: Arc::new(JsonSchemaValidator::compile(model)?),
            metric: Arc::new(JsonSchemaValidator::compile(metric)?),
            model_overrides: HashMap::new(),
        })
    }

    /// Build a store from the embedded default documents.
    pub fn embedded() -> SchemaResult<Self> {
        Self::new(
            &SchemaDocument::embedded_model()?,
            &SchemaDocument::embedded_metric()?,
        )
    }

    /// Register an adapter-specific model document variant.
    pub fn with_model_override(
        mut self,
        adapter: AdapterType,
        document: &SchemaDocument,
    ) -> SchemaResult<Self> {
        log::debug!(
            "registering model schema v{} override for {}",
            document.version(),
            adapter
        );
        self.model_overrides
            .insert(adapter, Arc::new(JsonSchemaValidator::compile(document)?));
        Ok(self)
    }

    /// The model validator for an adapter type.
    pub fn model_validator(&self, adapter: AdapterType) -> &dyn NodeValidator {
        self.model_overrides
            .get(&adapter)
            .unwrap_or(&self.model)
            .as_ref()
    }

    /// The metric validator (shared across adapters).
    pub fn metric_validator(&self) -> &dyn NodeValidator {
        self.metric.as_ref()
    }
}

#[cfg(test)]
#[path = "validator_test.rs"]
mod tests;
