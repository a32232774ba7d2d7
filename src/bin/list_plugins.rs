use std::io::{self, Write};
use std::path::PathBuf;

use agent_toolkit::plugin::PluginLister;
use agent_toolkit::{ToolkitConfig, ToolkitPaths, logging};
use anyhow::{Context, Result};
use clap::Parser;

/// List every plugin under the project's plugins directory with its metadata.
#[derive(Parser)]
#[command(name = "list-plugins", version, about)]
struct Cli {
    /// Project root holding the `plugins/` directory.
    #[arg(long)]
    root: Option<PathBuf>,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let _guard = logging::init("list-plugins");

    let config = ToolkitConfig::load()?;
    let paths = ToolkitPaths::resolve(&config, cli.root.as_deref());
    tracing::debug!("plugins root: {}", paths.plugins_root.display());

    let stdout = io::stdout();
    let mut out = stdout.lock();
    let count = PluginLister::new(&config, &paths)
        .write_report(&mut out)
        .with_context(|| format!("listing plugins in {}", paths.plugins_root.display()))?;
    out.flush()?;

    tracing::info!("listed {count} plugins");
    Ok(())
}
