//! Warehouse catalog value types.
//!
//! A [`WarehouseCatalog`] maps fully-qualified tables to column-name→type
//! mappings. It is the cacheable product of a catalog fetch and the input
//! to type attachment.

use crate::error::CoreError;
use crate::types::SqlType;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

/// A fully-qualified `(database, schema, table)` reference.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct TableRef {
    /// Database (catalog) name
    pub database: String,
    /// Schema name
    pub schema: String,
    /// Table name
    pub table: String,
}

impl TableRef {
    /// Create a new table reference.
    pub fn new(
        database: impl Into<String>,
        schema: impl Into<String>,
        table: impl Into<String>,
    ) -> Self {
        Self {
            database: database.into(),
            schema: schema.into(),
            table: table.into(),
        }
    }
}

impl fmt::Display for TableRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}.{}", self.database, self.schema, self.table)
    }
}

impl FromStr for TableRef {
    type Err = CoreError;

    /// Parse a `database.schema.table` string.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let parts: Vec<&str> = s.split('.').collect();
        match parts.as_slice() {
            [database, schema, table]
                if !database.is_empty() && !schema.is_empty() && !table.is_empty() =>
            {
                Ok(TableRef::new(*database, *schema, *table))
            }
            _ => Err(CoreError::InvalidTableRef {
                value: s.to_string(),
            }),
        }
    }
}

/// Column-name→type mappings keyed by fully-qualified table.
///
/// The catalog is treated as a monotonically-populated cache: entries are
/// only ever added or overwritten by [`merge`](Self::merge), never
/// invalidated.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct WarehouseCatalog {
    tables: HashMap<TableRef, HashMap<String, SqlType>>,
}

impl WarehouseCatalog {
    /// Create an empty catalog.
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert (or replace) the column types for a table.
    pub fn insert_table(&mut self, table: TableRef, columns: HashMap<String, SqlType>) {
        self.tables.insert(table, columns);
    }

    /// Look up the resolved type of a column, if present.
    pub fn get(&self, table: &TableRef, column: &str) -> Option<&SqlType> {
        self.tables.get(table).and_then(|cols| cols.get(column))
    }

    /// Whether the catalog has any entry for the given table.
    pub fn contains_table(&self, table: &TableRef) -> bool {
        self.tables.contains_key(table)
    }

    /// All column types for a table, if present.
    pub fn table_columns(&self, table: &TableRef) -> Option<&HashMap<String, SqlType>> {
        self.tables.get(table)
    }

    /// Fold another catalog into this one. Tables present in `other`
    /// replace this catalog's entry for the same table wholesale.
    pub fn merge(&mut self, other: WarehouseCatalog) {
        self.tables.extend(other.tables);
    }

    /// Number of tables with at least one resolved column.
    pub fn table_count(&self) -> usize {
        self.tables.len()
    }

    /// True when no table has been resolved yet.
    pub fn is_empty(&self) -> bool {
        self.tables.is_empty()
    }
}

impl FromIterator<(TableRef, HashMap<String, SqlType>)> for WarehouseCatalog {
    fn from_iter<I: IntoIterator<Item = (TableRef, HashMap<String, SqlType>)>>(iter: I) -> Self {
        Self {
            tables: iter.into_iter().collect(),
        }
    }
}
