//! Error types for pf-warehouse

use thiserror::Error;

/// Warehouse operation errors
#[derive(Error, Debug)]
pub enum WarehouseError {
    /// W001: Connection error
    #[error("[W001] Warehouse connection failed: {0}")]
    ConnectionError(String),

    /// W002: Catalog fetch error
    #[error("[W002] Catalog fetch failed: {0}")]
    CatalogFetch(String),

    /// W003: Query execution error
    #[error("[W003] Query execution failed: {0}")]
    QueryExecution(String),

    /// W004: Operation not supported by this backend
    #[error("[W004] Operation not supported by {backend}: {operation}")]
    NotSupported {
        backend: String,
        operation: String,
    },

    /// W005: Malformed catalog file
    #[error("[W005] Invalid catalog file '{path}': {message}")]
    InvalidCatalogFile { path: String, message: String },
}

/// Result type alias for WarehouseError
pub type WarehouseResult<T> = Result<T, WarehouseError>;
