//! Error types for pf-core

use thiserror::Error;

/// Core error type for Prismflow
#[derive(Error, Debug)]
pub enum CoreError {
    /// E001: Configuration file not found
    #[error("[E001] Config file not found: {path}")]
    ConfigNotFound { path: String },

    /// E002: Failed to parse configuration file
    #[error("[E002] Failed to parse config: {message}")]
    ConfigParseError { message: String },

    /// E003: Manifest file not found
    #[error("[E003] Manifest file not found: {path}")]
    ManifestNotFound { path: String },

    /// E004: Failed to parse a manifest file
    #[error("[E004] Failed to parse manifest '{path}': {message}")]
    ManifestParseError { path: String, message: String },

    /// E005: Manifest schema version is not supported
    #[error("[E005] Unsupported manifest schema version {version} (supported: {supported})")]
    UnsupportedManifestVersion { version: u32, supported: u32 },

    /// E006: Circular model reference detected
    #[error("[E006] Circular model reference detected: {cycle}")]
    CircularReference { cycle: String },

    /// E007: A name field was empty where a non-empty name is required
    #[error("[E007] Empty name: {context}")]
    EmptyName { context: String },

    /// E008: Malformed table reference
    #[error("[E008] Invalid table reference '{value}': expected database.schema.table")]
    InvalidTableRef { value: String },

    /// E009: IO error with file path context
    #[error("[E009] Failed to read '{path}': {source}")]
    IoWithPath {
        path: String,
        source: std::io::Error,
    },

    /// E010: IO error
    #[error("[E010] IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization/deserialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// YAML parse error
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

/// Result type alias for CoreError
pub type CoreResult<T> = Result<T, CoreError>;
