use super::*;
use serde_json::json;

fn sample_manifest_json() -> serde_json::Value {
    json!({
        "metadata": {
            "project_name": "jaffle",
            "adapter_type": "duckdb",
            "generated_at": "2026-05-01T12:00:00Z",
            "schema_version": 1
        },
        "nodes": [
            {
                "unique_id": "model.jaffle.fct_orders",
                "name": "fct_orders",
                "resource_type": "model",
                "database": "analytics",
                "schema": "prod",
                "columns": [
                    {"name": "order_id", "data_type": "BIGINT"},
                    {"name": "status"}
                ]
            },
            {
                "unique_id": "seed.jaffle.country_codes",
                "name": "country_codes",
                "resource_type": "seed",
                "schema": "prod"
            }
        ],
        "metrics": [
            {
                "unique_id": "metric.jaffle.order_count",
                "name": "order_count",
                "model": "fct_orders",
                "calculation": "count",
                "column": "order_id"
            }
        ]
    })
}

#[test]
fn test_manifest_roundtrip_and_model_filter() {
    let manifest: Manifest = serde_json::from_value(sample_manifest_json()).unwrap();
    assert_eq!(manifest.metadata.project_name, "jaffle");
    assert_eq!(manifest.metadata.adapter_type, "duckdb");
    assert_eq!(manifest.nodes.len(), 2);
    // Only the model-kind node participates in compilation.
    assert_eq!(manifest.model_nodes().len(), 1);
    assert_eq!(manifest.metrics.len(), 1);
}

#[test]
fn test_manifest_load_save() {
    let temp = tempfile::TempDir::new().unwrap();
    let path = temp.path().join("target").join("manifest.json");

    let manifest: Manifest = serde_json::from_value(sample_manifest_json()).unwrap();
    manifest.save(&path).unwrap();

    let loaded = Manifest::load(&path).unwrap();
    assert_eq!(loaded.metadata.project_name, "jaffle");
    assert_eq!(loaded.nodes.len(), 2);
    assert_eq!(loaded.checksum(), manifest.checksum());
}

#[test]
fn test_manifest_load_missing_file() {
    let temp = tempfile::TempDir::new().unwrap();
    let err = Manifest::load(&temp.path().join("nope.json")).unwrap_err();
    assert!(err.to_string().contains("[E003]"));
}

#[test]
fn test_manifest_rejects_unsupported_version() {
    let temp = tempfile::TempDir::new().unwrap();
    let path = temp.path().join("manifest.json");
    let mut value = sample_manifest_json();
    value["metadata"]["schema_version"] = json!(99);
    std::fs::write(&path, serde_json::to_string(&value).unwrap()).unwrap();

    let err = Manifest::load(&path).unwrap_err();
    assert!(err.to_string().contains("[E005]"));
    assert!(err.to_string().contains("99"));
}

#[test]
fn test_model_node_typed_form() {
    let value = json!({
        "unique_id": "model.jaffle.fct_orders",
        "name": "fct_orders",
        "resource_type": "model",
        "database": "analytics",
        "schema": "prod",
        "table": "orders",
        "columns": [
            {
                "name": "order_id",
                "data_type": "BIGINT",
                "meta": {
                    "metrics": [
                        {"name": "order_count", "calculation": "count"}
                    ]
                }
            },
            {
                "name": "internal_flag",
                "meta": {"dimension": {"hidden": true}}
            }
        ],
        "meta": {
            "label": "Orders",
            "joins": [
                {"model": "dim_customers", "left_column": "customer_id", "right_column": "id"}
            ]
        },
        "depends_on": ["stg_orders"]
    });

    let node: ModelNode = serde_json::from_value(value).unwrap();
    assert_eq!(node.name, "fct_orders");
    assert!(node.resource_type.is_model());
    assert_eq!(node.table_name(), "orders");
    assert_eq!(node.table_ref().to_string(), "analytics.prod.orders");
    assert_eq!(node.label(), "Orders");
    assert_eq!(node.meta.joins.len(), 1);
    assert_eq!(node.meta.joins[0].model, "dim_customers");
    assert_eq!(node.depends_on, vec![ModelName::new("stg_orders")]);

    let order_id = node.column("order_id").unwrap();
    assert_eq!(order_id.meta.metrics.len(), 1);
    assert_eq!(order_id.meta.metrics[0].name, "order_count");

    let hidden = node.column("internal_flag").unwrap();
    assert!(hidden.meta.dimension.as_ref().unwrap().hidden);
}

#[test]
fn test_column_def_type_alias() {
    // Manifests written by older tool versions use `type` instead of
    // `data_type`.
    let col: ColumnDef =
        serde_json::from_value(json!({"name": "amount", "type": "DECIMAL(10,2)"})).unwrap();
    assert_eq!(col.data_type.as_deref(), Some("DECIMAL(10,2)"));
}

#[test]
fn test_resource_kind_other_catchall() {
    let kind: ResourceKind = serde_json::from_value(json!("exposure")).unwrap();
    assert_eq!(kind, ResourceKind::Other);
    assert!(!kind.is_model());
}

#[test]
fn test_table_name_falls_back_to_model_name() {
    let node: ModelNode = serde_json::from_value(json!({
        "unique_id": "model.jaffle.dim_users",
        "name": "dim_users",
        "resource_type": "model",
        "database": "analytics",
        "schema": "prod"
    }))
    .unwrap();
    assert_eq!(node.table_name(), "dim_users");
    assert!(node.columns.is_empty());
}
