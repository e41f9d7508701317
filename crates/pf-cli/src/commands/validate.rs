//! Validate command implementation

use anyhow::{bail, Context, Result};
use pf_compiler::{validate_metrics, validate_models};
use pf_core::AdapterType;
use pf_schema::SchemaStore;

use crate::cli::{GlobalArgs, ValidateArgs};
use crate::commands::common::{load_config, load_manifest};

/// Database placeholder for normalization; validation does not touch a
/// warehouse.
const VALIDATION_DATABASE: &str = "main";

/// Execute the validate command
pub async fn execute(args: &ValidateArgs, global: &GlobalArgs) -> Result<()> {
    let config = load_config(global)?;
    let manifest = load_manifest(global, &config, args.manifest.as_ref())?;

    let adapter_type = match AdapterType::parse(&manifest.metadata.adapter_type) {
        Some(adapter) => adapter,
        None => bail!(
            "Unsupported adapter type '{}' (supported: {})",
            manifest.metadata.adapter_type,
            AdapterType::supported()
                .iter()
                .map(ToString::to_string)
                .collect::<Vec<_>>()
                .join(", ")
        ),
    };

    let store = SchemaStore::embedded().context("Failed to compile schema documents")?;
    let (valid, invalid) = validate_models(
        &store,
        adapter_type,
        VALIDATION_DATABASE,
        &manifest.nodes,
    );

    println!(
        "Validated {} model nodes: {} ok, {} invalid\n",
        valid.len() + invalid.len(),
        valid.len(),
        invalid.len()
    );
    for error in &invalid {
        println!("  \u{2717} {}", error.name);
        for inline in &error.errors {
            for line in inline.message.lines() {
                println!("      {}", line);
            }
        }
    }

    match validate_metrics(&store, &manifest.metrics) {
        Ok(metrics) => println!("Validated {} metrics: all ok", metrics.len()),
        Err(e) => bail!(e),
    }

    if !invalid.is_empty() {
        bail!("{} model nodes failed validation", invalid.len());
    }
    Ok(())
}
