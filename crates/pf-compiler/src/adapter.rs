//! Compilation orchestration.
//!
//! [`SemanticAdapter`] owns one manifest, one warehouse client, and the
//! cached warehouse catalog. Compilation runs an explicit two-state
//! machine: an optimistic Lazy pass against the cached catalog, and - only
//! when that pass signals a missing catalog entry - a single refresh
//! followed by one Strict pass. A miss that survives the refresh is fatal;
//! there is never a second fetch in one invocation.

use crate::attach::{attach_types, AttachMode};
use crate::builder::build_explores;
use crate::catalog::resolve_catalog;
use crate::error::{CompileError, CompileResult};
use crate::validate::{validate_metrics, validate_models};
use pf_core::{
    AdapterType, CompiledExplore, Manifest, ModelGraph, ModelName, WarehouseCatalog,
};
use pf_schema::SchemaStore;
use pf_warehouse::{QueryRows, WarehouseClient};
use std::sync::{Arc, RwLock};

/// The two type-resolution passes of one compilation invocation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Pass {
    /// Optimistic attempt against the cached catalog
    Lazy,
    /// Terminal attempt after the single catalog refresh
    Strict,
}

/// Compiles a manifest into Explores against one warehouse.
///
/// The catalog cache outlives individual compilations and is shared via
/// immutable snapshots: readers take an `Arc` snapshot, a refresh swaps in
/// a merged replacement. Concurrent compilations against the same adapter
/// therefore never observe a torn catalog.
pub struct SemanticAdapter {
    manifest: Manifest,
    adapter_type: AdapterType,
    schemas: SchemaStore,
    warehouse: Arc<dyn WarehouseClient>,
    catalog: RwLock<Arc<WarehouseCatalog>>,
}

impl std::fmt::Debug for SemanticAdapter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SemanticAdapter")
            .field("adapter_type", &self.adapter_type)
            .finish_non_exhaustive()
    }
}

impl SemanticAdapter {
    /// Create an adapter with the embedded schema documents.
    ///
    /// Rejects unsupported adapter types before any validation work.
    pub fn new(manifest: Manifest, warehouse: Arc<dyn WarehouseClient>) -> CompileResult<Self> {
        let schemas = SchemaStore::embedded()?;
        Self::with_schemas(manifest, warehouse, schemas)
    }

    /// Create an adapter with caller-supplied schema documents.
    pub fn with_schemas(
        manifest: Manifest,
        warehouse: Arc<dyn WarehouseClient>,
        schemas: SchemaStore,
    ) -> CompileResult<Self> {
        let adapter_type = AdapterType::parse(&manifest.metadata.adapter_type).ok_or_else(|| {
            CompileError::UnsupportedAdapter {
                adapter_type: manifest.metadata.adapter_type.clone(),
            }
        })?;
        Ok(Self {
            manifest,
            adapter_type,
            schemas,
            warehouse,
            catalog: RwLock::new(Arc::new(WarehouseCatalog::new())),
        })
    }

    /// The warehouse dialect this adapter compiles for.
    pub fn adapter_type(&self) -> AdapterType {
        self.adapter_type
    }

    /// The manifest this adapter compiles.
    pub fn manifest(&self) -> &Manifest {
        &self.manifest
    }

    /// Current snapshot of the cached catalog.
    pub fn catalog_snapshot(&self) -> Arc<WarehouseCatalog> {
        // A poisoned lock still holds a consistent snapshot; swapping is
        // the only write and it is a single assignment.
        match self.catalog.read() {
            Ok(guard) => Arc::clone(&guard),
            Err(poisoned) => Arc::clone(&poisoned.into_inner()),
        }
    }

    /// Merge freshly fetched entries into the cache and swap the snapshot.
    fn store_catalog(&self, fetched: WarehouseCatalog) {
        let mut guard = match self.catalog.write() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };
        let mut merged = (**guard).clone();
        merged.merge(fetched);
        *guard = Arc::new(merged);
    }

    /// Compile every model node into an Explore or an ExploreError.
    ///
    /// The result mixes both outcomes and is deterministic: converted
    /// models in input order, then validation failures. Fatal conditions
    /// (unsupported adapter, invalid metric, warehouse failure, a catalog
    /// miss that survives the refresh) raise instead.
    pub async fn compile_all_explores(
        &self,
        load_sources: bool,
    ) -> CompileResult<Vec<CompiledExplore>> {
        log::info!(
            "compiling {} nodes for {} ({} adapter)",
            self.manifest.nodes.len(),
            self.manifest.metadata.project_name,
            self.adapter_type
        );

        let (valid, invalid) = validate_models(
            &self.schemas,
            self.adapter_type,
            self.warehouse.active_database(),
            &self.manifest.nodes,
        );
        let metrics = validate_metrics(&self.schemas, &self.manifest.metrics)?;

        let entries: Vec<(&ModelName, &[ModelName])> = valid
            .iter()
            .map(|model| (&model.name, model.depends_on.as_slice()))
            .collect();
        ModelGraph::build(entries).validate()?;

        let mut pass = Pass::Lazy;
        loop {
            let snapshot = self.catalog_snapshot();
            let mode = match pass {
                Pass::Lazy => AttachMode::Lazy,
                Pass::Strict => AttachMode::Strict,
            };
            let attempt = attach_types(&valid, &snapshot, mode)
                .and_then(|typed| build_explores(&typed, &metrics, load_sources));

            match attempt {
                Ok(mut outcomes) => {
                    outcomes.extend(invalid.iter().cloned().map(CompiledExplore::Error));
                    log::info!(
                        "compiled {} explores ({} with errors)",
                        outcomes.len(),
                        outcomes.iter().filter(|o| o.is_error()).count()
                    );
                    return Ok(outcomes);
                }
                Err(CompileError::MissingCatalogEntry { table, column })
                    if pass == Pass::Lazy =>
                {
                    log::info!(
                        "catalog miss for column '{}' of {}; refreshing warehouse catalog",
                        column,
                        table
                    );
                    let fetched = resolve_catalog(self.warehouse.as_ref(), &valid).await?;
                    self.store_catalog(fetched);
                    pass = Pass::Strict;
                }
                // In the Strict pass a recurring miss is fatal, as is any
                // other error in either pass.
                Err(e) => return Err(e),
            }
        }
    }

    /// Health check against the warehouse client.
    pub async fn test_connection(&self) -> CompileResult<()> {
        self.warehouse.test_connection().await?;
        Ok(())
    }

    /// Pass-through query execution for adapter callers; unused by the
    /// compiler itself.
    pub async fn run_query(&self, sql: &str) -> CompileResult<QueryRows> {
        Ok(self.warehouse.run_query(sql).await?)
    }
}
