//! Project configuration (`prismflow.yml`).

use crate::error::{CoreError, CoreResult};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Project-level configuration for the CLI.
///
/// Every field has a default so a missing config file is not an error;
/// command-line flags override file values.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Project name
    #[serde(default = "default_name")]
    pub name: String,

    /// Path to the manifest JSON produced by the transformation tool
    #[serde(default = "default_manifest_path")]
    pub manifest_path: String,

    /// Path to a static warehouse catalog file, if one is used
    #[serde(default)]
    pub catalog_path: Option<String>,

    /// Attach source declarations to compiled fields by default
    #[serde(default)]
    pub load_sources: bool,
}

fn default_name() -> String {
    "prismflow".to_string()
}

fn default_manifest_path() -> String {
    "target/manifest.json".to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            name: default_name(),
            manifest_path: default_manifest_path(),
            catalog_path: None,
            load_sources: false,
        }
    }
}

impl Config {
    /// Load configuration from a YAML file.
    pub fn load(path: &Path) -> CoreResult<Self> {
        if !path.exists() {
            return Err(CoreError::ConfigNotFound {
                path: path.display().to_string(),
            });
        }
        let content = std::fs::read_to_string(path).map_err(|e| CoreError::IoWithPath {
            path: path.display().to_string(),
            source: e,
        })?;
        serde_yaml::from_str(&content).map_err(|e| CoreError::ConfigParseError {
            message: format!("{}: {}", path.display(), e),
        })
    }

    /// Load `prismflow.yml` from a project directory, falling back to
    /// defaults when the file does not exist.
    pub fn load_or_default(project_dir: &Path) -> CoreResult<Self> {
        let path = project_dir.join("prismflow.yml");
        if path.exists() {
            Self::load(&path)
        } else {
            log::debug!("no prismflow.yml in {}, using defaults", project_dir.display());
            Ok(Self::default())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.name, "prismflow");
        assert_eq!(config.manifest_path, "target/manifest.json");
        assert!(config.catalog_path.is_none());
        assert!(!config.load_sources);
    }

    #[test]
    fn test_load_from_yaml() {
        let temp = tempfile::TempDir::new().unwrap();
        let path = temp.path().join("prismflow.yml");
        std::fs::write(
            &path,
            r#"
name: jaffle
manifest_path: out/manifest.json
catalog_path: out/catalog.json
load_sources: true
"#,
        )
        .unwrap();

        let config = Config::load(&path).unwrap();
        assert_eq!(config.name, "jaffle");
        assert_eq!(config.manifest_path, "out/manifest.json");
        assert_eq!(config.catalog_path.as_deref(), Some("out/catalog.json"));
        assert!(config.load_sources);
    }

    #[test]
    fn test_load_or_default_without_file() {
        let temp = tempfile::TempDir::new().unwrap();
        let config = Config::load_or_default(temp.path()).unwrap();
        assert_eq!(config.name, "prismflow");
    }

    #[test]
    fn test_load_missing_file_is_an_error() {
        let temp = tempfile::TempDir::new().unwrap();
        let err = Config::load(&temp.path().join("prismflow.yml")).unwrap_err();
        assert!(err.to_string().contains("[E001]"));
    }

    #[test]
    fn test_partial_yaml_uses_defaults() {
        let temp = tempfile::TempDir::new().unwrap();
        let path = temp.path().join("prismflow.yml");
        std::fs::write(&path, "name: jaffle\n").unwrap();

        let config = Config::load(&path).unwrap();
        assert_eq!(config.name, "jaffle");
        assert_eq!(config.manifest_path, "target/manifest.json");
    }
}
