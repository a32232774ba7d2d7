use std::io::{self, Write};
use std::path::PathBuf;
use std::process::ExitCode;

use agent_toolkit::model::paths::host_plugins_dir;
use agent_toolkit::plugin::PluginInstaller;
use agent_toolkit::{ToolkitConfig, ToolkitPaths, logging};
use anyhow::{Context, Result};
use clap::Parser;

const PROGRAM: &str = "install-plugin";

/// Link a plugin from the project's plugins directory into the host plugin directory.
#[derive(Parser)]
#[command(name = PROGRAM, version, about)]
struct Cli {
    /// Name of the plugin directory to install.
    plugin_name: Option<String>,

    /// Project root holding the `plugins/` directory.
    #[arg(long)]
    root: Option<PathBuf>,

    /// Host plugin directory (defaults to `~/.claude/plugins`).
    #[arg(long)]
    host_dir: Option<PathBuf>,
}

fn main() -> Result<ExitCode> {
    let cli = Cli::parse();
    let _guard = logging::init(PROGRAM);

    let config = ToolkitConfig::load()?;
    let paths = ToolkitPaths::resolve(&config, cli.root.as_deref());
    let host_dir = host_plugins_dir(&config, cli.host_dir.as_deref())?;
    let installer = PluginInstaller::new(&config, &paths, host_dir);

    let stdout = io::stdout();
    let mut out = stdout.lock();

    let installation = match installer.install(cli.plugin_name.as_deref()) {
        Ok(installation) => installation,
        Err(err) if err.is_user_error() => {
            installer.write_user_error(err, &mut out, &mut io::stderr(), PROGRAM)?;
            out.flush()?;
            return Ok(ExitCode::FAILURE);
        }
        Err(err) => {
            return Err(err).with_context(|| {
                format!("installing into {}", installer.host_dir().display())
            });
        }
    };

    installer.write_confirmation(&mut out, &installation)?;

    if let Some(preview) = installer.readme_preview(&installation)? {
        installer.write_readme(&mut out, &preview)?;
    }

    out.flush()?;
    Ok(ExitCode::SUCCESS)
}
