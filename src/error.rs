//! Error types shared by the lister and the installer.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Errors produced while discovering, describing or installing plugins.
#[derive(Error, Debug)]
pub enum ToolkitError {
    /// No plugin name was given to the installer.
    #[error("missing plugin name")]
    MissingPluginName,

    /// The requested plugin has no source directory.
    #[error("Plugin '{name}' not found at {}", path.display())]
    PluginNotFound { name: String, path: PathBuf },

    /// Something already occupies the installation target.
    #[error("Plugin '{name}' is already installed at {}", target.display())]
    AlreadyInstalled { name: String, target: PathBuf },

    #[error("failed to read plugins directory {}", path.display())]
    ReadPluginsDir {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to read plugin metadata {}", path.display())]
    ReadMetadata {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// Metadata exists but is not valid JSON for the expected shape.
    #[error("invalid plugin metadata {}", path.display())]
    ParseMetadata {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("failed to create host plugin directory {}", path.display())]
    CreateHostDir {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to link {} -> {}", target.display(), source_dir.display())]
    CreateLink {
        source_dir: PathBuf,
        target: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to read {}", path.display())]
    ReadReadme {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to write output")]
    Output(#[from] io::Error),

    #[error("cannot determine home directory")]
    HomeDirUnavailable,

    #[error("invalid configuration {}: {message}", path.display())]
    Config { path: PathBuf, message: String },
}

impl ToolkitError {
    /// Usage, not-found and conflict errors: reported with guidance rather than a trace.
    pub fn is_user_error(&self) -> bool {
        matches!(
            self,
            Self::MissingPluginName | Self::PluginNotFound { .. } | Self::AlreadyInstalled { .. }
        )
    }
}
