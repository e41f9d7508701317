//! Explore building - converting typed models and metrics into Explores.
//!
//! Per-model conversion failures (unknown join targets, incompatible join
//! keys, dangling metric references) are recorded as `ExploreError`
//! outcomes, never raised. The single exception is a needed-but-unresolved
//! column type, which signals `MissingCatalogEntry` and must bubble past
//! this module unmodified so the orchestrator can refresh the catalog.

use crate::attach::{TypedColumn, TypedModel};
use crate::error::{CompileError, CompileResult};
use pf_core::{
    CompiledExplore, Dimension, Explore, ExploreError, ExploreJoin, FieldSource, InlineError,
    InlineErrorKind, JoinDef, Metric, MetricField, SqlType,
};
use std::collections::HashMap;

/// Convert typed models and validated metrics into compiled outcomes.
///
/// Outcomes are emitted in model input order: one `Explore` or one
/// `ExploreError` per model, never both.
pub fn build_explores(
    models: &[TypedModel],
    metrics: &[Metric],
    load_sources: bool,
) -> CompileResult<Vec<CompiledExplore>> {
    let index: HashMap<&str, &TypedModel> = models
        .iter()
        .map(|model| (model.name.as_str(), model))
        .collect();

    models
        .iter()
        .map(|model| convert_model(model, &index, metrics, load_sources))
        .collect()
}

fn convert_model(
    model: &TypedModel,
    index: &HashMap<&str, &TypedModel>,
    metrics: &[Metric],
    load_sources: bool,
) -> CompileResult<CompiledExplore> {
    let mut errors: Vec<InlineError> = Vec::new();

    let mut dimensions = visible_dimensions(model, load_sources)?;
    if dimensions.is_empty() {
        errors.push(InlineError {
            kind: InlineErrorKind::NoDimensions,
            message: format!("model '{}' has no visible dimensions", model.name),
        });
    }

    let mut joins = Vec::new();
    for join in &model.joins {
        match resolve_join(model, join, index, load_sources)? {
            JoinOutcome::Resolved(explore_join, joined_dimensions) => {
                joins.push(explore_join);
                dimensions.extend(joined_dimensions);
            }
            JoinOutcome::Failed(error) => errors.push(error),
        }
    }

    let metric_fields = collect_metrics(model, metrics, load_sources, &mut errors);

    if !errors.is_empty() {
        return Ok(CompiledExplore::Error(ExploreError {
            name: model.name.clone(),
            label: Some(model.label.clone()),
            errors,
        }));
    }

    Ok(CompiledExplore::Explore(Explore {
        name: model.name.clone(),
        label: model.label.clone(),
        base_table: model.table.clone(),
        joins,
        dimensions,
        metrics: metric_fields,
    }))
}

/// Dimensions for a model's visible columns, in declared order.
///
/// A visible column without a resolved type is exactly the "needs a type
/// that was never resolved" condition: signal it, do not default.
fn visible_dimensions(
    model: &TypedModel,
    load_sources: bool,
) -> CompileResult<Vec<Dimension>> {
    let mut dimensions = Vec::new();
    for column in &model.columns {
        if column.is_hidden() {
            continue;
        }
        let sql_type = required_type(model, column)?;
        dimensions.push(Dimension {
            name: column.def.name.clone(),
            model: model.name.clone(),
            field_type: sql_type.field_type(),
            sql_type: sql_type.clone(),
            label: column.label().to_string(),
            description: column.def.description.clone(),
            source: field_source(model, load_sources),
        });
    }
    Ok(dimensions)
}

/// The resolved type of a column the explore genuinely needs.
fn required_type<'a>(
    model: &TypedModel,
    column: &'a TypedColumn,
) -> CompileResult<&'a SqlType> {
    column
        .sql_type
        .as_ref()
        .ok_or_else(|| CompileError::MissingCatalogEntry {
            table: model.table.clone(),
            column: column.def.name.clone(),
        })
}

enum JoinOutcome {
    Resolved(ExploreJoin, Vec<Dimension>),
    Failed(InlineError),
}

fn resolve_join(
    model: &TypedModel,
    join: &JoinDef,
    index: &HashMap<&str, &TypedModel>,
    load_sources: bool,
) -> CompileResult<JoinOutcome> {
    let failed = |message: String| {
        Ok(JoinOutcome::Failed(InlineError {
            kind: InlineErrorKind::JoinResolution,
            message,
        }))
    };

    let Some(target) = index.get(join.model.as_str()).copied() else {
        return failed(format!(
            "join references unknown model '{}'",
            join.model
        ));
    };
    let Some(left) = model.column(&join.left_column) else {
        return failed(format!(
            "join key '{}' is not a column of '{}'",
            join.left_column, model.name
        ));
    };
    let Some(right) = target.column(&join.right_column) else {
        return failed(format!(
            "join key '{}' is not a column of '{}'",
            join.right_column, target.name
        ));
    };

    // Join keys are needed types: an unresolved one is a whole-run signal,
    // not a local failure.
    let left_type = required_type(model, left)?;
    let right_type = required_type(target, right)?;
    if !left_type.is_compatible_with(right_type) {
        return failed(format!(
            "join keys {}.{} ({}) and {}.{} ({}) have incompatible types",
            model.name, join.left_column, left_type, target.name, join.right_column, right_type
        ));
    }

    // Joined models contribute their own visible dimensions to the explore.
    let joined_dimensions = visible_dimensions(target, load_sources)?;
    Ok(JoinOutcome::Resolved(
        ExploreJoin {
            model: target.name.clone(),
            table: target.table.clone(),
            left_column: join.left_column.clone(),
            right_column: join.right_column.clone(),
        },
        joined_dimensions,
    ))
}

/// Inline column metrics (declared order) followed by top-level metrics
/// owned by this model (input order).
fn collect_metrics(
    model: &TypedModel,
    metrics: &[Metric],
    load_sources: bool,
    errors: &mut Vec<InlineError>,
) -> Vec<MetricField> {
    let mut fields = Vec::new();

    for column in &model.columns {
        for inline in &column.def.meta.metrics {
            fields.push(MetricField {
                name: inline.name.clone(),
                model: model.name.clone(),
                calculation: inline.calculation,
                column: column.def.name.clone(),
                label: inline
                    .label
                    .clone()
                    .unwrap_or_else(|| inline.name.to_string()),
                description: None,
                source: field_source(model, load_sources),
            });
        }
    }

    for metric in metrics.iter().filter(|m| m.model == model.name) {
        if model.column(&metric.column).is_none() {
            errors.push(InlineError {
                kind: InlineErrorKind::MetricReference,
                message: format!(
                    "metric '{}' references unknown column '{}' of model '{}'",
                    metric.name, metric.column, model.name
                ),
            });
            continue;
        }
        fields.push(MetricField {
            name: metric.name.clone(),
            model: model.name.clone(),
            calculation: metric.calculation,
            column: metric.column.clone(),
            label: metric.display_label().to_string(),
            description: metric.description.clone(),
            source: field_source(model, load_sources),
        });
    }

    fields
}

fn field_source(model: &TypedModel, load_sources: bool) -> Option<FieldSource> {
    if load_sources {
        model.source.clone()
    } else {
        None
    }
}

#[cfg(test)]
#[path = "builder_test.rs"]
mod tests;
