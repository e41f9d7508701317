//! Error types for pf-compiler

use pf_core::TableRef;
use thiserror::Error;

/// Compilation error type
///
/// Per-node failures never surface here; they become `ExploreError`
/// outcomes instead. Every variant of this enum is fatal for the whole
/// compilation, with the single exception of `MissingCatalogEntry`, which
/// the orchestrator recovers from exactly once by refreshing the catalog.
#[derive(Error, Debug)]
pub enum CompileError {
    /// C001: The manifest declares a warehouse dialect this build cannot
    /// compile for; raised before any validation runs
    #[error("[C001] Unsupported adapter type: {adapter_type}")]
    UnsupportedAdapter { adapter_type: String },

    /// C002: A metric failed schema validation; metrics have no partial
    /// result path
    #[error("[C002] Metric '{metric}' failed schema validation:\n{diagnostics}")]
    MetricValidation { metric: String, diagnostics: String },

    /// C003: A needed column type is absent from the warehouse catalog
    #[error("[C003] Missing catalog entry for column '{column}' of table '{table}'")]
    MissingCatalogEntry { table: TableRef, column: String },

    /// Core error propagation
    #[error(transparent)]
    Core(#[from] pf_core::CoreError),

    /// Schema document error propagation
    #[error(transparent)]
    Schema(#[from] pf_schema::SchemaError),

    /// Warehouse error propagation (never retried here)
    #[error(transparent)]
    Warehouse(#[from] pf_warehouse::WarehouseError),
}

/// Result type alias for CompileError
pub type CompileResult<T> = Result<T, CompileError>;
