use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::ToolkitError;

const DEFAULT_CONFIG: &str = include_str!("../../config/default.toml");

#[derive(Debug, Clone, Deserialize)]
pub struct ToolkitConfig {
    pub general: GeneralConfig,
    pub install: InstallConfig,
    pub list: ListConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct GeneralConfig {
    pub namespace: String,
    pub host_name: String,
    pub plugins_dir: String,
    #[serde(default)]
    pub project_root: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct InstallConfig {
    pub readme_file: String,
    pub readme_preview_lines: usize,
    #[serde(default)]
    pub host_plugins_dir: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ListConfig {
    pub rule_width: usize,
}

impl ToolkitConfig {
    /// Load configuration with layering: defaults → user config.
    pub fn load() -> Result<Self, ToolkitError> {
        let user_path = directories::ProjectDirs::from("", "", "agent-toolkit")
            .map(|dirs| dirs.config_dir().join("config.toml"));

        match user_path {
            Some(path) if path.exists() => Self::load_layered(Some(&path)),
            _ => Self::load_layered(None),
        }
    }

    /// Parse the embedded defaults and merge `user_path` over them table by table.
    pub fn load_layered(user_path: Option<&Path>) -> Result<Self, ToolkitError> {
        let mut merged: toml::Table = parse_table(DEFAULT_CONFIG, Path::new("default.toml"))?;

        if let Some(path) = user_path {
            let raw = fs::read_to_string(path).map_err(|source| ToolkitError::Config {
                path: path.to_path_buf(),
                message: source.to_string(),
            })?;
            let user = parse_table(&raw, path)?;
            merge_tables(&mut merged, user);
            tracing::debug!("merged user config from {}", path.display());
        }

        toml::Value::Table(merged)
            .try_into()
            .map_err(|err: toml::de::Error| ToolkitError::Config {
                path: user_path.map_or_else(|| PathBuf::from("default.toml"), Path::to_path_buf),
                message: err.to_string(),
            })
    }

    /// Directory inside each plugin that holds `plugin.json`.
    pub fn metadata_dir_name(&self) -> String {
        format!(".{}-plugin", self.general.namespace)
    }

    /// Host directory relative to the home directory, e.g. `.claude/plugins`.
    pub fn host_plugins_relative(&self) -> PathBuf {
        PathBuf::from(format!(".{}", self.general.namespace)).join("plugins")
    }
}

fn parse_table(raw: &str, path: &Path) -> Result<toml::Table, ToolkitError> {
    raw.parse::<toml::Table>().map_err(|err| ToolkitError::Config {
        path: path.to_path_buf(),
        message: err.to_string(),
    })
}

fn merge_tables(base: &mut toml::Table, overlay: toml::Table) {
    for (key, value) in overlay {
        let toml::Value::Table(incoming) = value else {
            base.insert(key, value);
            continue;
        };

        if let Some(toml::Value::Table(existing)) = base.get_mut(&key) {
            merge_tables(existing, incoming);
            continue;
        }

        base.insert(key, toml::Value::Table(incoming));
    }
}
