//! Manifest node validation.
//!
//! Model validation is tolerant: each node is checked independently and a
//! failing node becomes an `ExploreError` outcome without blocking the
//! others. Metric validation is strict: the first failing metric aborts
//! the whole compilation. The asymmetry is deliberate.

use crate::error::{CompileError, CompileResult};
use pf_core::manifest::is_model_node;
use pf_core::{
    AdapterType, ExploreError, InlineErrorKind, Metric, ModelName, ModelNode,
};
use pf_schema::{join_diagnostics, SchemaStore};

/// Validate raw nodes against the model schema document.
///
/// Nodes whose `resource_type` is not `model` are filtered out and yield
/// no outcome at all. For the rest, the partition is total:
/// `valid.len() + invalid.len()` equals the number of model-kind nodes.
///
/// A passing node is normalized (a missing or null `database` is rewritten
/// to the adapter's active database) before being deserialized.
pub fn validate_models(
    store: &SchemaStore,
    adapter: AdapterType,
    default_database: &str,
    nodes: &[serde_json::Value],
) -> (Vec<ModelNode>, Vec<ExploreError>) {
    let validator = store.model_validator(adapter);
    let mut valid = Vec::new();
    let mut invalid = Vec::new();

    for (index, node) in nodes.iter().filter(|n| is_model_node(n)).enumerate() {
        let diagnostics = validator.diagnostics(node);
        if !diagnostics.is_empty() {
            invalid.push(ExploreError::single(
                node_identity(node, index),
                InlineErrorKind::SchemaValidation,
                join_diagnostics(&diagnostics),
            ));
            continue;
        }

        let mut normalized = node.clone();
        normalize_database(&mut normalized, default_database);
        match serde_json::from_value::<ModelNode>(normalized) {
            Ok(model) => valid.push(model),
            // The schema document passed but the typed form did not; keep
            // the tolerant contract and report it on the node.
            Err(e) => invalid.push(ExploreError::single(
                node_identity(node, index),
                InlineErrorKind::SchemaValidation,
                format!("/ {}", e),
            )),
        }
    }

    log::debug!(
        "model validation: {} valid, {} invalid",
        valid.len(),
        invalid.len()
    );
    (valid, invalid)
}

/// Validate raw metrics against the metric schema document.
///
/// Strict: any invalid metric aborts with `[C002]` naming that metric;
/// there is no partial metric result.
pub fn validate_metrics(
    store: &SchemaStore,
    metrics: &[serde_json::Value],
) -> CompileResult<Vec<Metric>> {
    let validator = store.metric_validator();
    metrics
        .iter()
        .map(|raw| {
            let diagnostics = validator.diagnostics(raw);
            if !diagnostics.is_empty() {
                return Err(CompileError::MetricValidation {
                    metric: metric_identity(raw),
                    diagnostics: join_diagnostics(&diagnostics),
                });
            }
            serde_json::from_value::<Metric>(raw.clone()).map_err(|e| {
                CompileError::MetricValidation {
                    metric: metric_identity(raw),
                    diagnostics: format!("/ {}", e),
                }
            })
        })
        .collect()
}

/// Rewrite a missing or null `database` field to the adapter's active
/// database.
fn normalize_database(node: &mut serde_json::Value, default_database: &str) {
    if let Some(obj) = node.as_object_mut() {
        let needs_default = match obj.get("database") {
            None | Some(serde_json::Value::Null) => true,
            Some(_) => false,
        };
        if needs_default {
            obj.insert(
                "database".to_string(),
                serde_json::Value::String(default_database.to_string()),
            );
        }
    }
}

/// Best-effort identity for a node that may have failed validation: the
/// `name` field, then the tail of `unique_id`, then a positional fallback.
fn node_identity(node: &serde_json::Value, index: usize) -> ModelName {
    let from_name = node
        .get("name")
        .and_then(|v| v.as_str())
        .and_then(ModelName::try_new);
    if let Some(name) = from_name {
        return name;
    }
    let from_unique_id = node
        .get("unique_id")
        .and_then(|v| v.as_str())
        .and_then(|id| id.rsplit('.').next())
        .and_then(ModelName::try_new);
    if let Some(name) = from_unique_id {
        return name;
    }
    ModelName::new(format!("<node {}>", index))
}

/// Identity for a metric error message: `name`, then `unique_id`, then a
/// placeholder.
fn metric_identity(metric: &serde_json::Value) -> String {
    metric
        .get("name")
        .or_else(|| metric.get("unique_id"))
        .and_then(|v| v.as_str())
        .unwrap_or("<unnamed metric>")
        .to_string()
}

#[cfg(test)]
#[path = "validate_test.rs"]
mod tests;
