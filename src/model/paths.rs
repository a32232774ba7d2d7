use std::path::{Path, PathBuf};

use crate::error::ToolkitError;
use crate::model::config::ToolkitConfig;

const METADATA_FILE: &str = "plugin.json";

/// Where plugin sources live for one invocation.
#[derive(Debug, Clone)]
pub struct ToolkitPaths {
    pub project_root: PathBuf,
    pub plugins_root: PathBuf,
    metadata_dir: String,
}

impl ToolkitPaths {
    /// Resolve the project root from, in order: the explicit override, the
    /// configured `project_root`, the executable's location, the working directory.
    pub fn resolve(config: &ToolkitConfig, root_override: Option<&Path>) -> Self {
        let project_root = match (root_override, config.general.project_root.as_deref()) {
            (Some(root), _) => expand_tilde(root),
            (None, Some(configured)) => expand_tilde(Path::new(configured)),
            (None, None) => locate_project_root(&config.general.plugins_dir),
        };

        Self::from_project_root(config, project_root)
    }

    pub fn from_project_root(config: &ToolkitConfig, project_root: PathBuf) -> Self {
        let plugins_root = project_root.join(&config.general.plugins_dir);
        Self {
            project_root,
            plugins_root,
            metadata_dir: config.metadata_dir_name(),
        }
    }

    pub fn plugin_source(&self, name: &str) -> PathBuf {
        self.plugins_root.join(name)
    }

    /// `<plugin_dir>/.<namespace>-plugin/plugin.json`
    pub fn metadata_path(&self, plugin_dir: &Path) -> PathBuf {
        plugin_dir.join(&self.metadata_dir).join(METADATA_FILE)
    }
}

/// `~/.<namespace>/plugins` unless overridden on the command line or in config.
pub fn host_plugins_dir(
    config: &ToolkitConfig,
    host_override: Option<&Path>,
) -> Result<PathBuf, ToolkitError> {
    if let Some(dir) = host_override {
        return Ok(expand_tilde(dir));
    }

    if let Some(configured) = config.install.host_plugins_dir.as_deref() {
        return Ok(expand_tilde(Path::new(configured)));
    }

    let home = home_dir().ok_or(ToolkitError::HomeDirUnavailable)?;
    Ok(home.join(config.host_plugins_relative()))
}

fn home_dir() -> Option<PathBuf> {
    directories::BaseDirs::new().map(|dirs| dirs.home_dir().to_path_buf())
}

/// First ancestor of the executable's directory holding `plugins_dir`, else the cwd.
fn locate_project_root(plugins_dir: &str) -> PathBuf {
    let from_exe = std::env::current_exe().ok().and_then(|exe| {
        exe.ancestors()
            .skip(1)
            .find(|dir| dir.join(plugins_dir).is_dir())
            .map(Path::to_path_buf)
    });

    from_exe
        .or_else(|| std::env::current_dir().ok())
        .unwrap_or_else(|| PathBuf::from("."))
}

/// Expand a leading `~` component; `~user` forms are left untouched.
pub fn expand_tilde(path: &Path) -> PathBuf {
    let Ok(rest) = path.strip_prefix("~") else {
        return path.to_path_buf();
    };

    match home_dir() {
        Some(home) if rest.as_os_str().is_empty() => home,
        Some(home) => home.join(rest),
        None => path.to_path_buf(),
    }
}
