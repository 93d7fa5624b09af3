//! CLI configuration

use std::path::{Path, PathBuf};

use anyhow::Context;
use linkwork_core::limits::{self, DEFAULT_LOAD_FACTOR, DEFAULT_TABLE_CAPACITY};
use linkwork_core::TableConfig;
use serde::{Deserialize, Serialize};

/// Get default config file path
pub fn config_file_path() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("linkwork")
        .join("config.toml")
}

/// Configuration for the CLI
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Initial bucket count for `table`
    pub table_capacity: usize,
    /// Resize threshold for `table`
    pub load_factor: f64,
    /// Whether `graph` treats edges as one-way
    pub graph_directed: bool,
    /// Output format when `--format` is not given
    pub format: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            table_capacity: DEFAULT_TABLE_CAPACITY,
            load_factor: DEFAULT_LOAD_FACTOR,
            graph_directed: false,
            format: "table".to_string(),
        }
    }
}

impl Config {
    /// Load config from `path`, falling back to defaults if it does not exist
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        let config: Self = toml::from_str(&raw)
            .with_context(|| format!("Invalid config file {}", path.display()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn save(&self, path: &Path) -> anyhow::Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, toml::to_string_pretty(self)?)
            .with_context(|| format!("Failed to write config file {}", path.display()))?;
        tracing::info!("Saved config to {}", path.display());
        Ok(())
    }

    pub fn validate(&self) -> anyhow::Result<()> {
        self.table_config().validate()?;
        match self.format.as_str() {
            "table" | "json" => Ok(()),
            other => anyhow::bail!("Unknown output format: {} (expected table or json)", other),
        }
    }

    pub fn table_config(&self) -> TableConfig {
        TableConfig::new(self.table_capacity).with_load_factor(self.load_factor)
    }

    pub fn keys() -> &'static [&'static str] {
        &["table_capacity", "load_factor", "graph_directed", "format"]
    }

    pub fn get(&self, key: &str) -> Option<String> {
        match key {
            "table_capacity" => Some(self.table_capacity.to_string()),
            "load_factor" => Some(self.load_factor.to_string()),
            "graph_directed" => Some(self.graph_directed.to_string()),
            "format" => Some(self.format.clone()),
            _ => None,
        }
    }

    pub fn set(&mut self, key: &str, value: &str) -> anyhow::Result<()> {
        match key {
            "table_capacity" => {
                let capacity = value.parse().context("table_capacity must be an integer")?;
                limits::validate_capacity(capacity)?;
                self.table_capacity = capacity;
            }
            "load_factor" => {
                let load_factor = value.parse().context("load_factor must be a number")?;
                limits::validate_load_factor(load_factor)?;
                self.load_factor = load_factor;
            }
            "graph_directed" => {
                self.graph_directed = value.parse().context("graph_directed must be true or false")?;
            }
            "format" => {
                let previous = std::mem::replace(&mut self.format, value.to_lowercase());
                if let Err(e) = self.validate() {
                    self.format = previous;
                    return Err(e);
                }
            }
            _ => anyhow::bail!(
                "Unknown config key: {} (available: {})",
                key,
                Self::keys().join(", ")
            ),
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_file_gives_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::load(&dir.path().join("absent.toml")).unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_save_and_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.toml");

        let mut config = Config::default();
        config.set("table_capacity", "32").unwrap();
        config.set("graph_directed", "true").unwrap();
        config.save(&path).unwrap();

        let loaded = Config::load(&path).unwrap();
        assert_eq!(loaded.table_capacity, 32);
        assert!(loaded.graph_directed);
        assert_eq!(loaded.load_factor, DEFAULT_LOAD_FACTOR);
    }

    #[test]
    fn test_partial_file_uses_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "load_factor = 0.5\n").unwrap();

        let config = Config::load(&path).unwrap();
        assert_eq!(config.load_factor, 0.5);
        assert_eq!(config.table_capacity, DEFAULT_TABLE_CAPACITY);
    }

    #[test]
    fn test_rejects_invalid_values() {
        let mut config = Config::default();
        assert!(config.set("table_capacity", "0").is_err());
        assert!(config.set("load_factor", "nan").is_err());
        assert!(config.set("format", "yaml").is_err());
        assert_eq!(config.format, "table");
        assert!(config.set("colour", "blue").is_err());
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_malformed_file_is_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "table_capacity = \"lots\"\n").unwrap();
        assert!(Config::load(&path).is_err());
    }
}
