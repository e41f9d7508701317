//! Explore artifacts - the terminal outputs of a compilation.
//!
//! Every model node compiles to exactly one [`CompiledExplore`]: either a
//! queryable [`Explore`] or an [`ExploreError`] carrying diagnostics. The
//! two share a name so callers can always trace an outcome back to its
//! input node.

use crate::catalog::TableRef;
use crate::metric::MetricCalculation;
use crate::metric_name::MetricName;
use crate::model_name::ModelName;
use crate::types::{FieldType, SqlType};
use serde::{Deserialize, Serialize};

/// A queryable semantic entity: one base model plus joined models, with
/// dimensions and metrics attached to typed columns.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Explore {
    /// Explore name (the base model's name)
    pub name: ModelName,

    /// Human-readable label
    pub label: String,

    /// Physical table of the base model
    pub base_table: TableRef,

    /// Resolved joins to other models
    #[serde(default)]
    pub joins: Vec<ExploreJoin>,

    /// Dimensions, in declared column order (base model first, then joins)
    pub dimensions: Vec<Dimension>,

    /// Metrics attached to this explore
    #[serde(default)]
    pub metrics: Vec<MetricField>,
}

/// A resolved join edge inside an Explore.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExploreJoin {
    /// Joined model name
    pub model: ModelName,

    /// Physical table of the joined model
    pub table: TableRef,

    /// Join key on the base model
    pub left_column: String,

    /// Join key on the joined model
    pub right_column: String,
}

/// A queryable dimension backed by a typed column.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Dimension {
    /// Column name
    pub name: String,

    /// Model the column belongs to
    pub model: ModelName,

    /// Coarse field classification
    pub field_type: FieldType,

    /// Resolved SQL type
    pub sql_type: SqlType,

    /// Human-readable label
    pub label: String,

    /// Column description
    #[serde(default)]
    pub description: Option<String>,

    /// Source declaration, attached only when sources are requested
    #[serde(default)]
    pub source: Option<FieldSource>,
}

/// A metric attached to an owning column of an explore.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MetricField {
    /// Metric name
    pub name: MetricName,

    /// Model the owning column belongs to
    pub model: ModelName,

    /// Aggregation applied
    pub calculation: MetricCalculation,

    /// Owning column
    pub column: String,

    /// Human-readable label
    pub label: String,

    /// Metric description
    #[serde(default)]
    pub description: Option<String>,

    /// Source declaration, attached only when sources are requested
    #[serde(default)]
    pub source: Option<FieldSource>,
}

/// Where a field was declared, for consumers that surface source excerpts.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldSource {
    /// Path of the defining file
    pub path: String,

    /// Raw source text of the definition, when available
    #[serde(default)]
    pub excerpt: Option<String>,
}

/// The kind of failure recorded in an [`InlineError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InlineErrorKind {
    /// The node failed schema validation
    SchemaValidation,

    /// A declared join could not be resolved
    JoinResolution,

    /// A metric references a column that does not exist
    MetricReference,

    /// The model has no visible dimensions
    NoDimensions,
}

impl std::fmt::Display for InlineErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            InlineErrorKind::SchemaValidation => write!(f, "schema validation"),
            InlineErrorKind::JoinResolution => write!(f, "join resolution"),
            InlineErrorKind::MetricReference => write!(f, "metric reference"),
            InlineErrorKind::NoDimensions => write!(f, "no dimensions"),
        }
    }
}

/// A single diagnostic inside an [`ExploreError`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InlineError {
    /// Failure category
    pub kind: InlineErrorKind,

    /// Human-readable message
    pub message: String,
}

/// The terminal failure artifact for a model node.
///
/// Structurally parallel to [`Explore`] (same identity, a name) but
/// carrying an ordered list of diagnostics instead of queryable structure.
/// It is displayable data, never retried.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExploreError {
    /// Name of the failed node
    pub name: ModelName,

    /// Human-readable label, when one was declared
    #[serde(default)]
    pub label: Option<String>,

    /// Ordered diagnostics
    pub errors: Vec<InlineError>,
}

impl ExploreError {
    /// Build an error outcome with a single diagnostic.
    pub fn single(name: ModelName, kind: InlineErrorKind, message: impl Into<String>) -> Self {
        Self {
            name,
            label: None,
            errors: vec![InlineError {
                kind,
                message: message.into(),
            }],
        }
    }
}

/// One compiled outcome per input model node.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "result", rename_all = "snake_case")]
pub enum CompiledExplore {
    /// Successful compilation
    Explore(Explore),

    /// Terminal failure with diagnostics
    Error(ExploreError),
}

impl CompiledExplore {
    /// The outcome's name (shared with its input node).
    pub fn name(&self) -> &ModelName {
        match self {
            CompiledExplore::Explore(e) => &e.name,
            CompiledExplore::Error(e) => &e.name,
        }
    }

    /// Whether this outcome is an error.
    pub fn is_error(&self) -> bool {
        matches!(self, CompiledExplore::Error(_))
    }

    /// Borrow the explore, if this outcome succeeded.
    pub fn as_explore(&self) -> Option<&Explore> {
        match self {
            CompiledExplore::Explore(e) => Some(e),
            CompiledExplore::Error(_) => None,
        }
    }

    /// Borrow the error, if this outcome failed.
    pub fn as_error(&self) -> Option<&ExploreError> {
        match self {
            CompiledExplore::Explore(_) => None,
            CompiledExplore::Error(e) => Some(e),
        }
    }
}

#[cfg(test)]
#[path = "explore_test.rs"]
mod tests;
