use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use crate::error::ToolkitError;

/// One entry directly under the plugins root.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PluginEntry {
    pub name: String,
    pub path: PathBuf,
}

/// Enumerate every entry under `plugins_root`, sorted by name.
///
/// A missing or unreadable root is an error; the caller decides whether an
/// entry is a reportable plugin.
pub fn discover_plugins(plugins_root: &Path) -> Result<Vec<PluginEntry>, ToolkitError> {
    let read_err = |source: io::Error| ToolkitError::ReadPluginsDir {
        path: plugins_root.to_path_buf(),
        source,
    };

    let mut entries = Vec::new();
    for entry in fs::read_dir(plugins_root).map_err(read_err)? {
        let entry = entry.map_err(read_err)?;
        let name = entry.file_name().to_string_lossy().into_owned();
        entries.push(PluginEntry {
            name,
            path: entry.path(),
        });
    }

    entries.sort_by(|a, b| a.name.cmp(&b.name));
    tracing::debug!(
        "discovered {} entries under {}",
        entries.len(),
        plugins_root.display()
    );
    Ok(entries)
}

pub fn plugin_names(plugins_root: &Path) -> Result<Vec<String>, ToolkitError> {
    Ok(discover_plugins(plugins_root)?
        .into_iter()
        .map(|entry| entry.name)
        .collect())
}
