//! Discover and install local agent-toolkit plugins.
//!
//! `list-plugins` prints the metadata of every plugin under the project's
//! `plugins/` directory. `install-plugin <name>` links one of them into the
//! host plugin directory (`~/.claude/plugins` by default).

pub mod error;
pub mod logging;
pub mod model;
pub mod plugin;

pub use error::ToolkitError;
pub use model::config::ToolkitConfig;
pub use model::paths::ToolkitPaths;
