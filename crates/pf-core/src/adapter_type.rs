//! Warehouse adapter type declared by the manifest.

use serde::{Deserialize, Serialize};

/// The warehouse dialect a manifest was generated for.
///
/// The manifest's `metadata.adapter_type` string selects the validation
/// schema variant and the active-database defaulting behavior. Unknown
/// values are rejected before any validation runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AdapterType {
    /// PostgreSQL
    Postgres,
    /// Amazon Redshift
    Redshift,
    /// Snowflake
    Snowflake,
    /// Google BigQuery
    Bigquery,
    /// Databricks
    Databricks,
    /// DuckDB
    DuckDb,
}

impl AdapterType {
    /// Parse an adapter type string, returning `None` for unsupported values.
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "postgres" | "postgresql" => Some(AdapterType::Postgres),
            "redshift" => Some(AdapterType::Redshift),
            "snowflake" => Some(AdapterType::Snowflake),
            "bigquery" => Some(AdapterType::Bigquery),
            "databricks" => Some(AdapterType::Databricks),
            "duckdb" => Some(AdapterType::DuckDb),
            _ => None,
        }
    }

    /// All adapter types Prismflow can compile for.
    pub fn supported() -> &'static [AdapterType] {
        &[
            AdapterType::Postgres,
            AdapterType::Redshift,
            AdapterType::Snowflake,
            AdapterType::Bigquery,
            AdapterType::Databricks,
            AdapterType::DuckDb,
        ]
    }
}

impl std::fmt::Display for AdapterType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AdapterType::Postgres => write!(f, "postgres"),
            AdapterType::Redshift => write!(f, "redshift"),
            AdapterType::Snowflake => write!(f, "snowflake"),
            AdapterType::Bigquery => write!(f, "bigquery"),
            AdapterType::Databricks => write!(f, "databricks"),
            AdapterType::DuckDb => write!(f, "duckdb"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_known_adapters() {
        assert_eq!(AdapterType::parse("postgres"), Some(AdapterType::Postgres));
        assert_eq!(
            AdapterType::parse("postgresql"),
            Some(AdapterType::Postgres)
        );
        assert_eq!(AdapterType::parse("Snowflake"), Some(AdapterType::Snowflake));
        assert_eq!(AdapterType::parse("duckdb"), Some(AdapterType::DuckDb));
    }

    #[test]
    fn test_parse_unknown_adapter() {
        assert_eq!(AdapterType::parse("unknown_warehouse"), None);
        assert_eq!(AdapterType::parse(""), None);
    }

    #[test]
    fn test_display_roundtrip() {
        for adapter in AdapterType::supported() {
            assert_eq!(AdapterType::parse(&adapter.to_string()), Some(*adapter));
        }
    }
}
