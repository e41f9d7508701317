//! Shared helpers for command implementations

use crate::cli::GlobalArgs;
use anyhow::{Context, Result};
use pf_core::{Config, Manifest};
use pf_warehouse::{StaticWarehouse, WarehouseClient};
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// Database name used when no catalog file supplies one.
const DEFAULT_DATABASE: &str = "main";

/// Load project configuration, honoring a `--config` override.
pub fn load_config(global: &GlobalArgs) -> Result<Config> {
    match &global.config {
        Some(path) => Config::load(Path::new(path))
            .with_context(|| format!("Failed to load config '{}'", path)),
        None => Config::load_or_default(Path::new(&global.project_dir))
            .context("Failed to load project config"),
    }
}

/// Resolve a path from the config file or an override, relative to the
/// project directory.
pub fn resolve_path(global: &GlobalArgs, configured: &str, flag: Option<&String>) -> PathBuf {
    let raw = flag.map(String::as_str).unwrap_or(configured);
    let path = Path::new(raw);
    if path.is_absolute() {
        path.to_path_buf()
    } else {
        Path::new(&global.project_dir).join(path)
    }
}

/// Load the manifest named by config/flags.
pub fn load_manifest(
    global: &GlobalArgs,
    config: &Config,
    manifest_flag: Option<&String>,
) -> Result<Manifest> {
    let path = resolve_path(global, &config.manifest_path, manifest_flag);
    let manifest = Manifest::load(&path)
        .with_context(|| format!("Failed to load manifest '{}'", path.display()))?;
    if global.verbose {
        eprintln!(
            "[verbose] Loaded manifest '{}' (checksum {})",
            path.display(),
            manifest.checksum()
        );
    }
    Ok(manifest)
}

/// Build the warehouse client from the configured static catalog file, or
/// an empty one when no catalog is configured.
pub fn build_warehouse(
    global: &GlobalArgs,
    config: &Config,
    catalog_flag: Option<&String>,
) -> Result<Arc<dyn WarehouseClient>> {
    let configured = catalog_flag.or(config.catalog_path.as_ref());
    match configured {
        Some(raw) => {
            let path = resolve_path(global, raw, None);
            let warehouse = StaticWarehouse::from_file(&path)
                .with_context(|| format!("Failed to load catalog '{}'", path.display()))?;
            if global.verbose {
                eprintln!(
                    "[verbose] Loaded static catalog '{}' ({} tables)",
                    path.display(),
                    warehouse.table_count()
                );
            }
            Ok(Arc::new(warehouse))
        }
        None => Ok(Arc::new(StaticWarehouse::empty(DEFAULT_DATABASE))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn global(project_dir: &str) -> GlobalArgs {
        GlobalArgs {
            verbose: false,
            project_dir: project_dir.to_string(),
            config: None,
        }
    }

    #[test]
    fn test_resolve_path_joins_project_dir() {
        let global = global("/proj");
        let path = resolve_path(&global, "target/manifest.json", None);
        assert_eq!(path, PathBuf::from("/proj/target/manifest.json"));
    }

    #[test]
    fn test_resolve_path_flag_overrides_config() {
        let global = global("/proj");
        let flag = "other/manifest.json".to_string();
        let path = resolve_path(&global, "target/manifest.json", Some(&flag));
        assert_eq!(path, PathBuf::from("/proj/other/manifest.json"));
    }

    #[test]
    fn test_resolve_path_keeps_absolute_paths() {
        let global = global("/proj");
        let path = resolve_path(&global, "/abs/manifest.json", None);
        assert_eq!(path, PathBuf::from("/abs/manifest.json"));
    }

    #[test]
    fn test_build_warehouse_defaults_to_empty() {
        let global = global(".");
        let config = Config::default();
        let warehouse = build_warehouse(&global, &config, None).unwrap();
        assert_eq!(warehouse.active_database(), "main");
    }

    #[test]
    fn test_config_and_catalog_load_from_project_dir() {
        let temp = tempfile::TempDir::new().unwrap();
        std::fs::write(
            temp.path().join("prismflow.yml"),
            "name: jaffle\ncatalog_path: catalog.json\n",
        )
        .unwrap();
        std::fs::write(
            temp.path().join("catalog.json"),
            r#"{"database": "analytics", "tables": {}}"#,
        )
        .unwrap();

        let global = global(temp.path().to_str().unwrap());
        let config = load_config(&global).unwrap();
        assert_eq!(config.name, "jaffle");

        let warehouse = build_warehouse(&global, &config, None).unwrap();
        assert_eq!(warehouse.active_database(), "analytics");
    }
}
