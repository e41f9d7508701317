//! Manifest types for the transformation-tool dependency graph.
//!
//! A manifest arrives as `{ metadata, nodes, metrics }` where nodes and
//! metrics are raw JSON values. Nodes stay untyped until they pass schema
//! validation; [`ModelNode`] is the typed form produced afterwards.

use crate::catalog::TableRef;
use crate::metric::MetricCalculation;
use crate::metric_name::MetricName;
use crate::model_name::ModelName;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::path::Path;

/// The manifest schema version this build understands.
pub const SUPPORTED_SCHEMA_VERSION: u32 = 1;

/// Manifest-level metadata describing provenance and target warehouse.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ManifestMetadata {
    /// Project name
    pub project_name: String,

    /// Warehouse dialect the manifest was generated for (raw string;
    /// parsed and rejected by the compiler if unsupported)
    pub adapter_type: String,

    /// When the external tool generated this manifest
    #[serde(default)]
    pub generated_at: Option<DateTime<Utc>>,

    /// Manifest format version
    #[serde(default = "default_schema_version")]
    pub schema_version: u32,
}

fn default_schema_version() -> u32 {
    SUPPORTED_SCHEMA_VERSION
}

/// A manifest: raw model/metric nodes plus metadata.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Manifest {
    /// Provenance and adapter metadata
    pub metadata: ManifestMetadata,

    /// Raw model nodes, untyped until validated
    #[serde(default)]
    pub nodes: Vec<serde_json::Value>,

    /// Raw metric definitions, untyped until validated
    #[serde(default)]
    pub metrics: Vec<serde_json::Value>,
}

impl Manifest {
    /// Load a manifest from a JSON file, rejecting unsupported versions.
    pub fn load(path: &Path) -> crate::error::CoreResult<Self> {
        if !path.exists() {
            return Err(crate::error::CoreError::ManifestNotFound {
                path: path.display().to_string(),
            });
        }
        let content =
            std::fs::read_to_string(path).map_err(|e| crate::error::CoreError::IoWithPath {
                path: path.display().to_string(),
                source: e,
            })?;
        let manifest: Manifest = serde_json::from_str(&content).map_err(|e| {
            crate::error::CoreError::ManifestParseError {
                path: path.display().to_string(),
                message: e.to_string(),
            }
        })?;
        if manifest.metadata.schema_version != SUPPORTED_SCHEMA_VERSION {
            return Err(crate::error::CoreError::UnsupportedManifestVersion {
                version: manifest.metadata.schema_version,
                supported: SUPPORTED_SCHEMA_VERSION,
            });
        }
        Ok(manifest)
    }

    /// Save the manifest to a file atomically.
    ///
    /// Uses write-to-temp-then-rename to prevent corruption. The temp file
    /// includes the process ID to avoid races between concurrent writers.
    pub fn save(&self, path: &Path) -> crate::error::CoreResult<()> {
        let json = serde_json::to_string_pretty(self)?;

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| crate::error::CoreError::IoWithPath {
                path: parent.display().to_string(),
                source: e,
            })?;
        }

        let temp_path = path.with_extension(format!("json.{}.tmp", std::process::id()));
        std::fs::write(&temp_path, &json).map_err(|e| crate::error::CoreError::IoWithPath {
            path: temp_path.display().to_string(),
            source: e,
        })?;
        std::fs::rename(&temp_path, path).map_err(|e| {
            let _ = std::fs::remove_file(&temp_path);
            crate::error::CoreError::IoWithPath {
                path: path.display().to_string(),
                source: e,
            }
        })?;
        Ok(())
    }

    /// SHA-256 checksum of the serialized manifest, for change detection.
    pub fn checksum(&self) -> String {
        let mut hasher = Sha256::new();
        // serde_json serialization of a given manifest is deterministic
        // (Value maps iterate in key order).
        if let Ok(json) = serde_json::to_string(self) {
            hasher.update(json.as_bytes());
        }
        format!("{:x}", hasher.finalize())
    }

    /// Raw nodes whose `resource_type` is `model`. Nodes of any other kind
    /// are not compiled and yield no outcome.
    pub fn model_nodes(&self) -> Vec<&serde_json::Value> {
        self.nodes.iter().filter(|n| is_model_node(n)).collect()
    }
}

/// Check whether a raw node declares `resource_type: model`.
pub fn is_model_node(node: &serde_json::Value) -> bool {
    node.get("resource_type").and_then(|v| v.as_str()) == Some("model")
}

/// Resource kind discriminator for manifest nodes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResourceKind {
    /// A data model, the only kind that compiles to an Explore
    Model,
    /// CSV seed data
    Seed,
    /// Point-in-time snapshot
    Snapshot,
    /// External source definition
    Source,
    /// Data test
    Test,
    /// Run operation / hook
    Operation,
    /// Any kind this build does not recognize
    #[serde(other)]
    Other,
}

impl ResourceKind {
    /// Returns true for model nodes.
    pub fn is_model(&self) -> bool {
        matches!(self, ResourceKind::Model)
    }
}

/// A model node that has passed schema validation and normalization.
///
/// `database` is always populated here: validation rewrites a null or
/// missing database to the adapter's active database before this type is
/// produced.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelNode {
    /// Unique identifier from the manifest (e.g. `model.jaffle.fct_orders`)
    pub unique_id: String,

    /// Model name; the identity shared with its compiled outcome
    pub name: ModelName,

    /// Resource kind (always `model` after upstream filtering)
    pub resource_type: ResourceKind,

    /// Database the model materializes into
    pub database: String,

    /// Schema the model materializes into
    pub schema: String,

    /// Physical table name, when it differs from the model name
    #[serde(default)]
    pub table: Option<String>,

    /// Model description
    #[serde(default)]
    pub description: Option<String>,

    /// Declared columns
    #[serde(default)]
    pub columns: Vec<ColumnDef>,

    /// Adapter-facing metadata (label, join declarations)
    #[serde(default)]
    pub meta: ModelMeta,

    /// Names of models this model depends on
    #[serde(default)]
    pub depends_on: Vec<ModelName>,

    /// Path of the file this model was defined in
    #[serde(default)]
    pub original_file_path: Option<String>,

    /// Raw source text of the definition, when the manifest carries it
    #[serde(default)]
    pub raw_code: Option<String>,
}

impl ModelNode {
    /// Physical table name (falls back to the model name).
    pub fn table_name(&self) -> &str {
        self.table.as_deref().unwrap_or(self.name.as_str())
    }

    /// Fully-qualified table reference for catalog lookups.
    pub fn table_ref(&self) -> TableRef {
        TableRef::new(
            self.database.clone(),
            self.schema.clone(),
            self.table_name(),
        )
    }

    /// Look up a declared column by name.
    pub fn column(&self, name: &str) -> Option<&ColumnDef> {
        self.columns.iter().find(|c| c.name == name)
    }

    /// Display label (metadata label, falling back to the model name).
    pub fn label(&self) -> &str {
        self.meta.label.as_deref().unwrap_or(self.name.as_str())
    }
}

/// Model-level metadata.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ModelMeta {
    /// Human-readable label
    #[serde(default)]
    pub label: Option<String>,

    /// Join declarations to other models
    #[serde(default)]
    pub joins: Vec<JoinDef>,
}

/// A declared join from one model to another, on a single key pair.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JoinDef {
    /// Target model name
    pub model: ModelName,

    /// Join key on the declaring model
    pub left_column: String,

    /// Join key on the target model
    pub right_column: String,
}

/// A declared column on a model node.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColumnDef {
    /// Column name
    pub name: String,

    /// Declared SQL data type, if the definition carries one
    #[serde(default, alias = "type")]
    pub data_type: Option<String>,

    /// Column description
    #[serde(default)]
    pub description: Option<String>,

    /// Column-level metadata (dimension options, inline metrics)
    #[serde(default)]
    pub meta: ColumnMeta,
}

/// Column-level metadata.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ColumnMeta {
    /// Dimension presentation options
    #[serde(default)]
    pub dimension: Option<DimensionMeta>,

    /// Inline metric shorthand defined on this column
    #[serde(default)]
    pub metrics: Vec<InlineMetric>,
}

/// Presentation options for the dimension built from a column.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DimensionMeta {
    /// Human-readable label
    #[serde(default)]
    pub label: Option<String>,

    /// Hidden dimensions are not emitted and do not require a resolved type
    #[serde(default)]
    pub hidden: bool,
}

/// A metric declared inline on a column.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InlineMetric {
    /// Metric name
    pub name: MetricName,

    /// Aggregation to apply to the owning column
    pub calculation: MetricCalculation,

    /// Human-readable label
    #[serde(default)]
    pub label: Option<String>,
}

#[cfg(test)]
#[path = "manifest_test.rs"]
mod tests;
