use super::*;
use crate::attach::{attach_types, AttachMode};
use pf_core::{ModelNode, WarehouseCatalog};
use serde_json::json;

fn typed_models(nodes: Vec<serde_json::Value>) -> Vec<TypedModel> {
    let nodes: Vec<ModelNode> = nodes
        .into_iter()
        .map(|n| serde_json::from_value(n).unwrap())
        .collect();
    attach_types(&nodes, &WarehouseCatalog::new(), AttachMode::Lazy).unwrap()
}

fn orders_node() -> serde_json::Value {
    json!({
        "unique_id": "model.jaffle.fct_orders",
        "name": "fct_orders",
        "resource_type": "model",
        "database": "analytics",
        "schema": "prod",
        "columns": [
            {"name": "order_id", "data_type": "BIGINT"},
            {"name": "customer_id", "data_type": "BIGINT"},
            {"name": "status", "data_type": "VARCHAR"}
        ],
        "meta": {
            "joins": [
                {"model": "dim_customers", "left_column": "customer_id", "right_column": "id"}
            ]
        }
    })
}

fn customers_node() -> serde_json::Value {
    json!({
        "unique_id": "model.jaffle.dim_customers",
        "name": "dim_customers",
        "resource_type": "model",
        "database": "analytics",
        "schema": "prod",
        "columns": [
            {"name": "id", "data_type": "BIGINT"},
            {"name": "segment", "data_type": "VARCHAR"}
        ]
    })
}

#[test]
fn test_join_resolution_and_joined_dimensions() {
    let models = typed_models(vec![orders_node(), customers_node()]);
    let outcomes = build_explores(&models, &[], false).unwrap();
    assert_eq!(outcomes.len(), 2);

    let orders = outcomes[0].as_explore().unwrap();
    assert_eq!(orders.joins.len(), 1);
    assert_eq!(orders.joins[0].model, "dim_customers");
    assert_eq!(
        orders.joins[0].table.to_string(),
        "analytics.prod.dim_customers"
    );
    // Base dimensions first, then the joined model's.
    let dimension_names: Vec<(&str, &str)> = orders
        .dimensions
        .iter()
        .map(|d| (d.model.as_str(), d.name.as_str()))
        .collect();
    assert_eq!(
        dimension_names,
        vec![
            ("fct_orders", "order_id"),
            ("fct_orders", "customer_id"),
            ("fct_orders", "status"),
            ("dim_customers", "id"),
            ("dim_customers", "segment"),
        ]
    );
}

#[test]
fn test_unknown_join_model_is_a_local_failure() {
    let mut node = orders_node();
    node["meta"]["joins"][0]["model"] = json!("dim_ghosts");
    let models = typed_models(vec![node, customers_node()]);

    let outcomes = build_explores(&models, &[], false).unwrap();
    let error = outcomes[0].as_error().unwrap();
    assert_eq!(error.errors.len(), 1);
    assert_eq!(error.errors[0].kind, InlineErrorKind::JoinResolution);
    assert!(error.errors[0].message.contains("dim_ghosts"));
    // The other model still converts.
    assert!(!outcomes[1].is_error());
}

#[test]
fn test_incompatible_join_keys_are_a_local_failure() {
    let mut customers = customers_node();
    customers["columns"][0]["data_type"] = json!("VARCHAR");
    let models = typed_models(vec![orders_node(), customers]);

    let outcomes = build_explores(&models, &[], false).unwrap();
    let error = outcomes[0].as_error().unwrap();
    assert_eq!(error.errors[0].kind, InlineErrorKind::JoinResolution);
    assert!(error.errors[0].message.contains("incompatible types"));
}

#[test]
fn test_unknown_join_column_is_a_local_failure() {
    let mut node = orders_node();
    node["meta"]["joins"][0]["left_column"] = json!("not_a_column");
    let models = typed_models(vec![node, customers_node()]);

    let outcomes = build_explores(&models, &[], false).unwrap();
    let error = outcomes[0].as_error().unwrap();
    assert!(error.errors[0].message.contains("not_a_column"));
}

#[test]
fn test_unresolved_needed_type_signals_missing_catalog_entry() {
    let mut node = orders_node();
    // `status` loses its declared type and the catalog is empty.
    node["columns"][2] = json!({"name": "status"});
    let models = typed_models(vec![node, customers_node()]);

    let err = build_explores(&models, &[], false).unwrap_err();
    match err {
        CompileError::MissingCatalogEntry { table, column } => {
            assert_eq!(table.to_string(), "analytics.prod.fct_orders");
            assert_eq!(column, "status");
        }
        other => panic!("expected MissingCatalogEntry, got {other}"),
    }
}

#[test]
fn test_hidden_columns_do_not_need_types() {
    let mut node = orders_node();
    node["columns"][2] = json!({
        "name": "status",
        "meta": {"dimension": {"hidden": true}}
    });
    let models = typed_models(vec![node, customers_node()]);

    let outcomes = build_explores(&models, &[], false).unwrap();
    let orders = outcomes[0].as_explore().unwrap();
    assert!(orders.dimensions.iter().all(|d| d.name != "status"));
}

#[test]
fn test_model_without_visible_dimensions_errors() {
    let node = json!({
        "unique_id": "model.jaffle.empty",
        "name": "empty",
        "resource_type": "model",
        "database": "analytics",
        "schema": "prod",
        "columns": []
    });
    let models = typed_models(vec![node]);
    let outcomes = build_explores(&models, &[], false).unwrap();
    let error = outcomes[0].as_error().unwrap();
    assert_eq!(error.errors[0].kind, InlineErrorKind::NoDimensions);
}

#[test]
fn test_metrics_attach_to_owning_columns() {
    let mut node = orders_node();
    node["columns"][0]["meta"] = json!({
        "metrics": [{"name": "order_count", "calculation": "count"}]
    });
    let models = typed_models(vec![node, customers_node()]);

    let metrics = vec![serde_json::from_value::<Metric>(json!({
        "unique_id": "metric.jaffle.distinct_statuses",
        "name": "distinct_statuses",
        "model": "fct_orders",
        "calculation": "count_distinct",
        "column": "status",
        "label": "Distinct Statuses"
    }))
    .unwrap()];

    let outcomes = build_explores(&models, &metrics, false).unwrap();
    let orders = outcomes[0].as_explore().unwrap();
    // Inline metric first, then the top-level one.
    assert_eq!(orders.metrics.len(), 2);
    assert_eq!(orders.metrics[0].name, "order_count");
    assert_eq!(orders.metrics[0].column, "order_id");
    assert_eq!(orders.metrics[1].name, "distinct_statuses");
    assert_eq!(orders.metrics[1].label, "Distinct Statuses");
    // Metrics owned by other models do not leak in.
    let customers = outcomes[1].as_explore().unwrap();
    assert!(customers.metrics.is_empty());
}

#[test]
fn test_metric_referencing_unknown_column_is_a_local_failure() {
    let models = typed_models(vec![orders_node(), customers_node()]);
    let metrics = vec![serde_json::from_value::<Metric>(json!({
        "unique_id": "metric.jaffle.bad",
        "name": "bad_metric",
        "model": "fct_orders",
        "calculation": "sum",
        "column": "no_such_column"
    }))
    .unwrap()];

    let outcomes = build_explores(&models, &metrics, false).unwrap();
    let error = outcomes[0].as_error().unwrap();
    assert_eq!(error.errors[0].kind, InlineErrorKind::MetricReference);
    assert!(error.errors[0].message.contains("no_such_column"));
}

#[test]
fn test_load_sources_attaches_field_sources() {
    let mut node = orders_node();
    node["original_file_path"] = json!("models/fct_orders.yml");
    node["raw_code"] = json!("select * from staging");
    let models = typed_models(vec![node, customers_node()]);

    let without = build_explores(&models, &[], false).unwrap();
    assert!(without[0].as_explore().unwrap().dimensions[0]
        .source
        .is_none());

    let with = build_explores(&models, &[], true).unwrap();
    let source = with[0].as_explore().unwrap().dimensions[0]
        .source
        .as_ref()
        .unwrap();
    assert_eq!(source.path, "models/fct_orders.yml");
    assert_eq!(source.excerpt.as_deref(), Some("select * from staging"));
}
