//! Warehouse client trait definition

use crate::error::WarehouseResult;
use async_trait::async_trait;
use pf_core::{TableRef, WarehouseCatalog};
use serde::{Deserialize, Serialize};

/// Rows returned by a pass-through query.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct QueryRows {
    /// Column names, in result order
    pub columns: Vec<String>,

    /// Row values, one vec per row
    pub rows: Vec<Vec<serde_json::Value>>,
}

/// Warehouse abstraction consumed by the compiler.
///
/// The compiler only calls [`get_catalog`](Self::get_catalog);
/// [`run_query`](Self::run_query) is a pass-through capability exposed to
/// callers of the adapter. Implementations must be Send + Sync for async
/// operation.
#[async_trait]
pub trait WarehouseClient: Send + Sync {
    /// Fetch column-name→type mappings for the given tables.
    ///
    /// Tables the warehouse does not know are simply absent from the
    /// result; they are not an error at this layer.
    async fn get_catalog(&self, tables: &[TableRef]) -> WarehouseResult<WarehouseCatalog>;

    /// Execute a query and return its rows.
    async fn run_query(&self, sql: &str) -> WarehouseResult<QueryRows>;

    /// Cheap connectivity check.
    async fn test_connection(&self) -> WarehouseResult<()>;

    /// The database new models land in when a node declares none.
    fn active_database(&self) -> &str;

    /// Warehouse type identifier for logging
    fn warehouse_type(&self) -> &'static str;
}
