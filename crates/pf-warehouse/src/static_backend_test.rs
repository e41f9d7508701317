use super::*;

fn write_catalog_file(dir: &Path, content: &str) -> std::path::PathBuf {
    let path = dir.join("catalog.json");
    std::fs::write(&path, content).unwrap();
    path
}

#[tokio::test]
async fn test_get_catalog_filters_to_requested_tables() {
    let temp = tempfile::TempDir::new().unwrap();
    let path = write_catalog_file(
        temp.path(),
        r#"{
            "database": "analytics",
            "tables": {
                "analytics.prod.orders": {"order_id": "BIGINT", "status": "VARCHAR"},
                "analytics.prod.customers": {"id": "BIGINT"}
            }
        }"#,
    );
    let warehouse = StaticWarehouse::from_file(&path).unwrap();
    assert_eq!(warehouse.table_count(), 2);
    assert_eq!(warehouse.active_database(), "analytics");

    let orders = TableRef::new("analytics", "prod", "orders");
    let catalog = warehouse.get_catalog(std::slice::from_ref(&orders)).await.unwrap();
    assert_eq!(catalog.table_count(), 1);
    assert_eq!(
        catalog.get(&orders, "order_id"),
        Some(&parse_sql_type("BIGINT"))
    );
}

#[tokio::test]
async fn test_unknown_tables_are_absent_not_errors() {
    let warehouse = StaticWarehouse::empty("analytics");
    let ghost = TableRef::new("analytics", "prod", "ghost");
    let catalog = warehouse.get_catalog(std::slice::from_ref(&ghost)).await.unwrap();
    assert!(catalog.is_empty());
}

#[tokio::test]
async fn test_run_query_is_not_supported() {
    let warehouse = StaticWarehouse::empty("analytics");
    let err = warehouse.run_query("select 1").await.unwrap_err();
    assert!(err.to_string().contains("[W004]"));
}

#[test]
fn test_from_file_rejects_bad_table_key() {
    let temp = tempfile::TempDir::new().unwrap();
    let path = write_catalog_file(
        temp.path(),
        r#"{"database": "analytics", "tables": {"just_a_table": {}}}"#,
    );
    let err = StaticWarehouse::from_file(&path).unwrap_err();
    assert!(err.to_string().contains("[W005]"));
    assert!(err.to_string().contains("just_a_table"));
}

#[test]
fn test_from_file_rejects_bad_json() {
    let temp = tempfile::TempDir::new().unwrap();
    let path = write_catalog_file(temp.path(), "{broken");
    assert!(StaticWarehouse::from_file(&path).is_err());
}
