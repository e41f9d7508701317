//! Static catalog backend.
//!
//! Serves a warehouse catalog from a JSON file instead of a live
//! connection. Used by the CLI and by tests; real warehouse drivers live
//! outside this repository and implement [`WarehouseClient`] themselves.

use crate::error::{WarehouseError, WarehouseResult};
use crate::traits::{QueryRows, WarehouseClient};
use async_trait::async_trait;
use pf_core::{parse_sql_type, SqlType, TableRef, WarehouseCatalog};
use serde::Deserialize;
use std::collections::HashMap;
use std::path::Path;

/// Raw on-disk catalog file format:
///
/// ```json
/// {
///   "database": "analytics",
///   "tables": {
///     "analytics.prod.orders": { "order_id": "BIGINT", "status": "VARCHAR" }
///   }
/// }
/// ```
#[derive(Debug, Deserialize)]
struct CatalogFile {
    database: String,
    #[serde(default)]
    tables: HashMap<String, HashMap<String, String>>,
}

/// A [`WarehouseClient`] that answers catalog requests from an in-memory
/// table map.
#[derive(Debug)]
pub struct StaticWarehouse {
    database: String,
    tables: HashMap<TableRef, HashMap<String, SqlType>>,
}

impl StaticWarehouse {
    /// Create a backend from pre-resolved tables.
    pub fn new(
        database: impl Into<String>,
        tables: HashMap<TableRef, HashMap<String, SqlType>>,
    ) -> Self {
        Self {
            database: database.into(),
            tables,
        }
    }

    /// Create an empty backend (every catalog request resolves nothing).
    pub fn empty(database: impl Into<String>) -> Self {
        Self::new(database, HashMap::new())
    }

    /// Load a backend from a catalog JSON file.
    pub fn from_file(path: &Path) -> WarehouseResult<Self> {
        let content =
            std::fs::read_to_string(path).map_err(|e| WarehouseError::InvalidCatalogFile {
                path: path.display().to_string(),
                message: e.to_string(),
            })?;
        let raw: CatalogFile =
            serde_json::from_str(&content).map_err(|e| WarehouseError::InvalidCatalogFile {
                path: path.display().to_string(),
                message: e.to_string(),
            })?;

        let mut tables = HashMap::new();
        for (table_key, columns) in raw.tables {
            let table: TableRef =
                table_key
                    .parse()
                    .map_err(|_| WarehouseError::InvalidCatalogFile {
                        path: path.display().to_string(),
                        message: format!(
                            "table key '{}' is not of the form database.schema.table",
                            table_key
                        ),
                    })?;
            let columns = columns
                .into_iter()
                .map(|(name, raw_type)| (name, parse_sql_type(&raw_type)))
                .collect();
            tables.insert(table, columns);
        }

        Ok(Self::new(raw.database, tables))
    }

    /// Number of tables this backend can resolve.
    pub fn table_count(&self) -> usize {
        self.tables.len()
    }
}

#[async_trait]
impl WarehouseClient for StaticWarehouse {
    async fn get_catalog(&self, tables: &[TableRef]) -> WarehouseResult<WarehouseCatalog> {
        let mut catalog = WarehouseCatalog::new();
        for table in tables {
            match self.tables.get(table) {
                Some(columns) => {
                    catalog.insert_table(table.clone(), columns.clone());
                }
                None => {
                    log::debug!("static catalog has no entry for {}", table);
                }
            }
        }
        log::debug!(
            "resolved {} of {} requested tables from static catalog",
            catalog.table_count(),
            tables.len()
        );
        Ok(catalog)
    }

    async fn run_query(&self, _sql: &str) -> WarehouseResult<QueryRows> {
        Err(WarehouseError::NotSupported {
            backend: self.warehouse_type().to_string(),
            operation: "run_query".to_string(),
        })
    }

    async fn test_connection(&self) -> WarehouseResult<()> {
        Ok(())
    }

    fn active_database(&self) -> &str {
        &self.database
    }

    fn warehouse_type(&self) -> &'static str {
        "static"
    }
}

#[cfg(test)]
#[path = "static_backend_test.rs"]
mod tests;
