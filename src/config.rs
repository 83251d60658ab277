use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Deserialize;

use crate::evaluator::ApplicationType;

/// Root configuration structure, deserialized from `.attribution-report/config.toml`.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub application: ApplicationConfig,
    pub proprietary: ProprietaryConfig,
    pub overrides: OverridesConfig,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct ApplicationConfig {
    /// Where the scanned application runs. Defaults to `external`.
    #[serde(rename = "type")]
    pub kind: ApplicationType,
}

/// Packages excluded from the report as internally owned.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct ProprietaryConfig {
    /// Added to the built-in proprietary package list.
    pub packages: Vec<String>,
    /// YAML list of further package names.
    pub file: Option<PathBuf>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct OverridesConfig {
    /// YAML map of `name` or `name@version` to SPDX identifiers.
    pub file: Option<PathBuf>,
}

impl Config {
    /// Parse a config file. Relative file paths inside it are taken relative
    /// to the directory containing the config file.
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config file {}", path.display()))?;
        let mut config: Config = toml::from_str(&content)
            .with_context(|| format!("invalid config file {}", path.display()))?;

        if let Some(base) = path.parent() {
            for file in [&mut config.proprietary.file, &mut config.overrides.file] {
                if let Some(p) = file.as_mut() {
                    if p.is_relative() {
                        *p = base.join(&*p);
                    }
                }
            }
        }

        Ok(config)
    }
}

/// Load the configuration, searching in order:
///
/// 1. `config_override`: path passed via `--config`
/// 2. `<project_path>/.attribution-report/config.toml`
/// 3. `~/.config/attribution-report/config.toml`
/// 4. Built-in [`Config::default`]
pub fn load_config(project_path: &Path, config_override: Option<&Path>) -> Result<Config> {
    if let Some(path) = config_override {
        return Config::from_file(path);
    }

    let project_config = project_path.join(".attribution-report").join("config.toml");
    if project_config.exists() {
        return Config::from_file(&project_config);
    }

    if let Some(home) = dirs::home_dir() {
        let home_config = home
            .join(".config")
            .join("attribution-report")
            .join("config.toml");
        if home_config.exists() {
            return Config::from_file(&home_config);
        }
    }

    Ok(Config::default())
}

#[cfg(test)]
mod tests {
    use std::fs;

    use tempfile::TempDir;

    use super::*;

    #[test]
    fn test_empty_config_uses_defaults() {
        let config: Config = toml::from_str("").unwrap();
        assert_eq!(config.application.kind, ApplicationType::External);
        assert!(config.proprietary.packages.is_empty());
        assert!(config.overrides.file.is_none());
    }

    #[test]
    fn test_full_config() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(
            &path,
            r#"
[application]
type = "internal"

[proprietary]
packages = ["github.com/acme/internal-lib"]
file = "proprietary.yaml"

[overrides]
file = "/etc/attribution-report/unparsable-packages.yaml"
"#,
        )
        .unwrap();

        let config = load_config(dir.path(), Some(&path)).unwrap();
        assert_eq!(config.application.kind, ApplicationType::Internal);
        assert_eq!(config.proprietary.packages, vec!["github.com/acme/internal-lib"]);
        assert_eq!(
            config.proprietary.file,
            Some(dir.path().join("proprietary.yaml"))
        );
        assert_eq!(
            config.overrides.file,
            Some(PathBuf::from("/etc/attribution-report/unparsable-packages.yaml"))
        );
    }

    #[test]
    fn test_project_config_is_discovered() {
        let dir = TempDir::new().unwrap();
        let config_dir = dir.path().join(".attribution-report");
        fs::create_dir(&config_dir).unwrap();
        fs::write(config_dir.join("config.toml"), "[application]\ntype = \"internal\"\n").unwrap();

        let config = load_config(dir.path(), None).unwrap();
        assert_eq!(config.application.kind, ApplicationType::Internal);
    }

    #[test]
    fn test_explicit_config_must_exist() {
        let dir = TempDir::new().unwrap();
        let missing = dir.path().join("missing.toml");
        assert!(load_config(dir.path(), Some(&missing)).is_err());
    }

    #[test]
    fn test_invalid_application_type_is_rejected() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "[application]\ntype = \"saas\"\n").unwrap();
        assert!(Config::from_file(&path).is_err());
    }
}
