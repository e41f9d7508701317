//! Test command implementation

use anyhow::{Context, Result};

use crate::cli::{GlobalArgs, TestArgs};
use crate::commands::common::{build_warehouse, load_config};

/// Execute the test command
pub async fn execute(args: &TestArgs, global: &GlobalArgs) -> Result<()> {
    let config = load_config(global)?;
    let warehouse = build_warehouse(global, &config, args.catalog.as_ref())?;

    warehouse
        .test_connection()
        .await
        .context("Warehouse connection check failed")?;

    println!(
        "Connection OK ({} warehouse, active database '{}')",
        warehouse.warehouse_type(),
        warehouse.active_database()
    );
    Ok(())
}
