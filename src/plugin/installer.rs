use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use crate::error::ToolkitError;
use crate::model::config::ToolkitConfig;
use crate::model::paths::ToolkitPaths;
use crate::plugin::discovery::plugin_names;
use crate::plugin::manifest::is_absent;

/// A link created by [`PluginInstaller::install`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Installation {
    pub name: String,
    pub source: PathBuf,
    pub target: PathBuf,
}

/// Links plugin sources into the host plugin directory.
///
/// Never overwrites: anything already at `<host_dir>/<name>`, including a
/// dangling link, is reported as [`ToolkitError::AlreadyInstalled`].
pub struct PluginInstaller<'a> {
    paths: &'a ToolkitPaths,
    host_dir: PathBuf,
    host_name: String,
    readme_file: String,
    readme_lines: usize,
}

impl<'a> PluginInstaller<'a> {
    pub fn new(config: &ToolkitConfig, paths: &'a ToolkitPaths, host_dir: PathBuf) -> Self {
        Self {
            paths,
            host_dir,
            host_name: config.general.host_name.clone(),
            readme_file: config.install.readme_file.clone(),
            readme_lines: config.install.readme_preview_lines,
        }
    }

    pub fn host_dir(&self) -> &Path {
        &self.host_dir
    }

    /// Validate `name`, ensure the host directory, then create the link.
    pub fn install(&self, name: Option<&str>) -> Result<Installation, ToolkitError> {
        let name = name
            .filter(|name| !name.is_empty())
            .ok_or(ToolkitError::MissingPluginName)?;

        let source = self.paths.plugin_source(name);
        if !source.exists() {
            tracing::warn!("plugin {name} not found at {}", source.display());
            return Err(ToolkitError::PluginNotFound {
                name: name.to_string(),
                path: source,
            });
        }

        self.ensure_host_dir()?;

        let target = self.host_dir.join(name);
        if fs::symlink_metadata(&target).is_ok() {
            tracing::warn!("plugin {name} already present at {}", target.display());
            return Err(ToolkitError::AlreadyInstalled {
                name: name.to_string(),
                target,
            });
        }

        let link_err = |source_dir: &Path, target: &Path, source: io::Error| {
            ToolkitError::CreateLink {
                source_dir: source_dir.to_path_buf(),
                target: target.to_path_buf(),
                source,
            }
        };

        let source = std::path::absolute(&source).map_err(|err| link_err(&source, &target, err))?;
        create_dir_link(&source, &target).map_err(|err| link_err(&source, &target, err))?;

        tracing::info!("linked {} -> {}", target.display(), source.display());
        Ok(Installation {
            name: name.to_string(),
            source,
            target,
        })
    }

    /// First lines of the plugin's readme, `None` when it has none (or the
    /// source is a plain file).
    pub fn readme_preview(&self, installation: &Installation) -> Result<Option<String>, ToolkitError> {
        let path = installation.source.join(&self.readme_file);
        let bytes = match fs::read(&path) {
            Ok(bytes) => bytes,
            Err(err) if is_absent(&err) => return Ok(None),
            Err(source) => return Err(ToolkitError::ReadReadme { path, source }),
        };

        let text = String::from_utf8_lossy(&bytes);
        let preview: Vec<&str> = text.split('\n').take(self.readme_lines).collect();
        Ok(Some(preview.join("\n")))
    }

    pub fn available_plugins(&self) -> Result<Vec<String>, ToolkitError> {
        plugin_names(&self.paths.plugins_root)
    }

    pub fn write_confirmation(
        &self,
        out: &mut impl Write,
        installation: &Installation,
    ) -> Result<(), ToolkitError> {
        writeln!(
            out,
            "✓ Installed {} to {}",
            installation.name,
            installation.target.display()
        )?;
        writeln!(out, "\nPlugin is now available in {}!", self.host_name)?;
        Ok(())
    }

    pub fn write_readme(&self, out: &mut impl Write, preview: &str) -> Result<(), ToolkitError> {
        writeln!(out, "\n=== Plugin Information ===")?;
        writeln!(out, "{preview}")?;
        Ok(())
    }

    /// Guidance for usage, not-found and conflict errors.
    ///
    /// Returns the error back when it is not one of those.
    pub fn write_user_error(
        &self,
        err: ToolkitError,
        out: &mut impl Write,
        err_out: &mut impl Write,
        program: &str,
    ) -> Result<(), ToolkitError> {
        match err {
            ToolkitError::MissingPluginName => {
                writeln!(err_out, "Usage: {program} <plugin-name>")?;
                self.write_available(out)?;
            }
            ToolkitError::PluginNotFound { .. } => {
                writeln!(err_out, "Error: {err}")?;
                self.write_available(out)?;
            }
            ToolkitError::AlreadyInstalled { .. } => {
                writeln!(out, "{err}")?;
                writeln!(out, "Remove it first or use a different name.")?;
            }
            other => return Err(other),
        }
        Ok(())
    }

    fn write_available(&self, out: &mut impl Write) -> Result<(), ToolkitError> {
        writeln!(out, "\nAvailable plugins:")?;
        for name in self.available_plugins()? {
            writeln!(out, "  - {name}")?;
        }
        Ok(())
    }

    fn ensure_host_dir(&self) -> Result<(), ToolkitError> {
        if self.host_dir.exists() {
            return Ok(());
        }

        fs::create_dir_all(&self.host_dir).map_err(|source| ToolkitError::CreateHostDir {
            path: self.host_dir.clone(),
            source,
        })?;
        tracing::info!("created host plugin directory {}", self.host_dir.display());
        Ok(())
    }
}

#[cfg(unix)]
fn create_dir_link(source: &Path, target: &Path) -> io::Result<()> {
    std::os::unix::fs::symlink(source, target)
}

#[cfg(windows)]
fn create_dir_link(source: &Path, target: &Path) -> io::Result<()> {
    std::os::windows::fs::symlink_dir(source, target)
}

#[cfg(not(any(unix, windows)))]
fn create_dir_link(_source: &Path, _target: &Path) -> io::Result<()> {
    Err(io::Error::new(
        io::ErrorKind::Unsupported,
        "symbolic links are not supported on this platform",
    ))
}
