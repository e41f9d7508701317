//! Catalog resolution - scoping and fetching warehouse catalog entries.

use pf_core::{ModelNode, TableRef, WarehouseCatalog};
use pf_warehouse::{WarehouseClient, WarehouseResult};
use std::collections::BTreeSet;

/// Fetch column types for exactly the tables the given models reference.
///
/// The request set is the deduplicated `(database, schema, table)` triples
/// across all models, in sorted order so repeated runs issue identical
/// requests. Warehouse errors propagate unwrapped; the retry policy lives
/// in the orchestrator, not here.
pub async fn resolve_catalog(
    client: &dyn WarehouseClient,
    models: &[ModelNode],
) -> WarehouseResult<WarehouseCatalog> {
    let tables: BTreeSet<TableRef> = models.iter().map(ModelNode::table_ref).collect();
    let tables: Vec<TableRef> = tables.into_iter().collect();
    log::debug!(
        "fetching catalog for {} tables from {} warehouse",
        tables.len(),
        client.warehouse_type()
    );
    client.get_catalog(&tables).await
}
