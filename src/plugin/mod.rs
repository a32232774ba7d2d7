pub mod discovery;
pub mod installer;
pub mod manifest;
pub mod report;

pub use installer::{Installation, PluginInstaller};
pub use manifest::PluginMetadata;
pub use report::PluginLister;
