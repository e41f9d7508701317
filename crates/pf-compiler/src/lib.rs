//! pf-compiler - Manifest-to-Explore compiler for Prismflow
//!
//! This crate sequences validation, lazy/strict type attachment, and
//! explore building, with a single reactive catalog refresh between the
//! two attachment passes.

pub mod adapter;
pub mod attach;
pub mod builder;
pub mod catalog;
pub mod error;
pub mod validate;

pub use adapter::SemanticAdapter;
pub use attach::{attach_types, AttachMode, TypedColumn, TypedModel};
pub use builder::build_explores;
pub use catalog::resolve_catalog;
pub use error::{CompileError, CompileResult};
pub use validate::{validate_metrics, validate_models};
