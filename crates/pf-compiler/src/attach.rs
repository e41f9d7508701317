//! Type attachment - merging declared columns with catalog-resolved types.
//!
//! Attachment rewrites validated nodes into [`TypedModel`] payloads without
//! mutating the originals; join declarations and model references carry
//! over untouched.

use crate::error::{CompileError, CompileResult};
use pf_core::{
    parse_sql_type, ColumnDef, FieldSource, JoinDef, ModelName, ModelNode, SqlType, TableRef,
    WarehouseCatalog,
};

/// How missing catalog entries are treated during attachment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AttachMode {
    /// Tolerate misses: fall back to the declared type, or leave the
    /// column unresolved. Only usable for an optimistic first attempt.
    Lazy,
    /// Every column must resolve from the catalog; the first miss raises
    /// `MissingCatalogEntry`.
    Strict,
}

/// A column with its resolved type, when one could be determined.
#[derive(Debug, Clone, PartialEq)]
pub struct TypedColumn {
    /// The declared column
    pub def: ColumnDef,

    /// Resolved type; `None` marks a lazily-unresolved column
    pub sql_type: Option<SqlType>,
}

impl TypedColumn {
    /// Whether the dimension built from this column is hidden.
    pub fn is_hidden(&self) -> bool {
        self.def
            .meta
            .dimension
            .as_ref()
            .is_some_and(|d| d.hidden)
    }

    /// Dimension label: column metadata label, falling back to the name.
    pub fn label(&self) -> &str {
        self.def
            .meta
            .dimension
            .as_ref()
            .and_then(|d| d.label.as_deref())
            .unwrap_or(&self.def.name)
    }
}

/// A validated model with every column carried through type resolution.
#[derive(Debug, Clone, PartialEq)]
pub struct TypedModel {
    /// Model name
    pub name: ModelName,

    /// Display label
    pub label: String,

    /// Physical table
    pub table: TableRef,

    /// Model description
    pub description: Option<String>,

    /// Join declarations, preserved verbatim from the node
    pub joins: Vec<JoinDef>,

    /// Names of models this model depends on
    pub depends_on: Vec<ModelName>,

    /// Columns with attached types, in declared order
    pub columns: Vec<TypedColumn>,

    /// Source declaration of the model, when the manifest carries one
    pub source: Option<FieldSource>,
}

impl TypedModel {
    /// Look up a column by name.
    pub fn column(&self, name: &str) -> Option<&TypedColumn> {
        self.columns.iter().find(|c| c.def.name == name)
    }

    /// Count of columns without a resolved type.
    pub fn unresolved_count(&self) -> usize {
        self.columns.iter().filter(|c| c.sql_type.is_none()).count()
    }
}

/// Attach catalog-resolved types to every column of every model.
///
/// In [`AttachMode::Lazy`], a column missing from the catalog falls back
/// to its declared type, or stays unresolved; consumers that then need
/// such a type must signal `MissingCatalogEntry` rather than defaulting.
/// In [`AttachMode::Strict`], the first catalog miss raises immediately.
pub fn attach_types(
    models: &[ModelNode],
    catalog: &WarehouseCatalog,
    mode: AttachMode,
) -> CompileResult<Vec<TypedModel>> {
    models
        .iter()
        .map(|node| attach_model(node, catalog, mode))
        .collect()
}

fn attach_model(
    node: &ModelNode,
    catalog: &WarehouseCatalog,
    mode: AttachMode,
) -> CompileResult<TypedModel> {
    let table = node.table_ref();
    let mut columns = Vec::with_capacity(node.columns.len());

    for def in &node.columns {
        let resolved = catalog.get(&table, &def.name).cloned();
        let sql_type = match (resolved, mode) {
            (Some(t), _) => Some(t),
            (None, AttachMode::Strict) => {
                return Err(CompileError::MissingCatalogEntry {
                    table,
                    column: def.name.clone(),
                });
            }
            (None, AttachMode::Lazy) => def.data_type.as_deref().map(parse_sql_type),
        };
        columns.push(TypedColumn {
            def: def.clone(),
            sql_type,
        });
    }

    let typed = TypedModel {
        name: node.name.clone(),
        label: node.label().to_string(),
        table,
        description: node.description.clone(),
        joins: node.meta.joins.clone(),
        depends_on: node.depends_on.clone(),
        columns,
        source: node.original_file_path.as_ref().map(|path| FieldSource {
            path: path.clone(),
            excerpt: node.raw_code.clone(),
        }),
    };
    if typed.unresolved_count() > 0 {
        log::debug!(
            "model '{}' has {} unresolved column types after lazy attachment",
            typed.name,
            typed.unresolved_count()
        );
    }
    Ok(typed)
}

#[cfg(test)]
#[path = "attach_test.rs"]
mod tests;
