//! Compile command implementation

use anyhow::{Context, Result};
use pf_compiler::SemanticAdapter;
use pf_core::CompiledExplore;

use crate::cli::{CompileArgs, GlobalArgs, OutputFormat};
use crate::commands::common::{build_warehouse, load_config, load_manifest};

/// Execute the compile command
pub async fn execute(args: &CompileArgs, global: &GlobalArgs) -> Result<()> {
    let config = load_config(global)?;
    let manifest = load_manifest(global, &config, args.manifest.as_ref())?;
    let warehouse = build_warehouse(global, &config, args.catalog.as_ref())?;

    let load_sources = args.load_sources || config.load_sources;
    let model_count = manifest.model_nodes().len();
    if args.format == OutputFormat::Summary {
        println!("Compiling {} models...\n", model_count);
    }

    let adapter = SemanticAdapter::new(manifest, warehouse)
        .context("Failed to create compilation adapter")?;
    let outcomes = adapter
        .compile_all_explores(load_sources)
        .await
        .context("Compilation failed")?;

    if global.verbose {
        eprintln!(
            "[verbose] Catalog cache holds {} tables after compilation",
            adapter.catalog_snapshot().table_count()
        );
    }

    match args.format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&outcomes)?);
        }
        OutputFormat::Summary => print_summary(&outcomes),
    }
    Ok(())
}

fn print_summary(outcomes: &[CompiledExplore]) {
    for outcome in outcomes {
        match outcome {
            CompiledExplore::Explore(explore) => {
                println!(
                    "  \u{2713} {} ({} dimensions, {} metrics, {} joins)",
                    explore.name,
                    explore.dimensions.len(),
                    explore.metrics.len(),
                    explore.joins.len()
                );
            }
            CompiledExplore::Error(error) => {
                println!("  \u{2717} {}", error.name);
                for inline in &error.errors {
                    println!("      [{}] {}", inline.kind, inline.message);
                }
            }
        }
    }

    let failures = outcomes.iter().filter(|o| o.is_error()).count();
    println!(
        "\nCompiled {} explores: {} ok, {} with errors",
        outcomes.len(),
        outcomes.len() - failures,
        failures
    );
}
