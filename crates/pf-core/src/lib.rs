//! pf-core - Core library for Prismflow
//!
//! This crate provides the shared types used across all Prismflow
//! components: the manifest format, strongly-typed name wrappers, the SQL
//! type system, warehouse catalog values, Explore artifacts, and the model
//! reference graph.

pub mod adapter_type;
pub mod catalog;
pub mod config;
pub mod error;
pub mod explore;
pub mod graph;
pub mod manifest;
pub mod metric;
pub mod metric_name;
pub mod model_name;
mod newtype_string;
pub mod types;

pub use adapter_type::AdapterType;
pub use catalog::{TableRef, WarehouseCatalog};
pub use config::Config;
pub use error::{CoreError, CoreResult};
pub use explore::{
    CompiledExplore, Dimension, Explore, ExploreError, ExploreJoin, FieldSource, InlineError,
    InlineErrorKind, MetricField,
};
pub use graph::ModelGraph;
pub use manifest::{
    ColumnDef, ColumnMeta, DimensionMeta, InlineMetric, JoinDef, Manifest, ManifestMetadata,
    ModelMeta, ModelNode, ResourceKind,
};
pub use metric::{Metric, MetricCalculation};
pub use metric_name::MetricName;
pub use model_name::ModelName;
pub use types::{parse_sql_type, FieldType, FloatBitWidth, IntBitWidth, SqlType};
