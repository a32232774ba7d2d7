use std::io::Write;

use crate::error::ToolkitError;
use crate::model::config::ToolkitConfig;
use crate::model::paths::ToolkitPaths;
use crate::plugin::discovery::discover_plugins;
use crate::plugin::manifest::PluginMetadata;

const TITLE: &str = "Agent Toolkit Plugins";
const INSTALL_HINTS: [&str; 2] = [
    "  install-plugin <plugin-name>",
    "  cargo run --bin install-plugin -- <plugin-name>",
];

/// Prints one block per plugin that carries a metadata file.
pub struct PluginLister<'a> {
    paths: &'a ToolkitPaths,
    rule_width: usize,
}

impl<'a> PluginLister<'a> {
    pub fn new(config: &ToolkitConfig, paths: &'a ToolkitPaths) -> Self {
        Self {
            paths,
            rule_width: config.list.rule_width,
        }
    }

    /// Write the full report and return how many plugins were described.
    ///
    /// Stops at the first unreadable or malformed metadata file; blocks
    /// already written stay written.
    pub fn write_report(&self, out: &mut impl Write) -> Result<usize, ToolkitError> {
        writeln!(out, "{TITLE}\n")?;
        writeln!(out, "{}", "=".repeat(self.rule_width))?;

        let mut reported = 0;
        for entry in discover_plugins(&self.paths.plugins_root)? {
            let metadata_path = self.paths.metadata_path(&entry.path);
            let Some(metadata) = PluginMetadata::load(&metadata_path)? else {
                tracing::debug!("skipping {}: no metadata", entry.name);
                continue;
            };

            self.write_block(out, &entry.name, &metadata)?;
            reported += 1;
        }

        writeln!(out, "\nInstallation:")?;
        for hint in INSTALL_HINTS {
            writeln!(out, "{hint}")?;
        }

        Ok(reported)
    }

    pub fn write_block(
        &self,
        out: &mut impl Write,
        dir_name: &str,
        metadata: &PluginMetadata,
    ) -> Result<(), ToolkitError> {
        let name = metadata.name.as_deref().unwrap_or(dir_name);
        match metadata.version.as_deref() {
            Some(version) => writeln!(out, "\n📦 {name} v{version}")?,
            None => writeln!(out, "\n📦 {name}")?,
        }

        if let Some(description) = metadata.description.as_deref() {
            writeln!(out, "   {description}")?;
        }

        if !metadata.commands.is_empty() {
            writeln!(out, "   Commands: /{}", metadata.commands.join(", /"))?;
        }

        if !metadata.skills.is_empty() {
            writeln!(out, "   Skills: {}", metadata.skills.join(", "))?;
        }

        if !metadata.agents.is_empty() {
            writeln!(out, "   Agents: {} specialized agents", metadata.agents.len())?;
        }

        if !metadata.tags.is_empty() {
            writeln!(out, "   Tags: {}", metadata.tags.join(", "))?;
        }

        writeln!(out, "{}", "-".repeat(self.rule_width))?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use std::path::Path;

    fn write_metadata(root: &Path, plugin: &str, json: &str) {
        let dir = root.join("plugins").join(plugin).join(".claude-plugin");
        fs::create_dir_all(&dir).unwrap();
        fs::write(dir.join("plugin.json"), json).unwrap();
    }

    fn render(root: &Path) -> Result<(usize, String), ToolkitError> {
        let config = ToolkitConfig::load_layered(None).unwrap();
        let paths = ToolkitPaths::from_project_root(&config, root.to_path_buf());
        let mut out = Vec::new();
        let count = PluginLister::new(&config, &paths).write_report(&mut out)?;
        Ok((count, String::from_utf8(out).unwrap()))
    }

    #[test]
    fn block_omits_empty_sections() {
        let dir = tempfile::tempdir().unwrap();
        write_metadata(
            dir.path(),
            "demo",
            r#"{"name":"demo","version":"1.0.0","description":"test","commands":["run"],"tags":["a","b"]}"#,
        );

        let (count, text) = render(dir.path()).unwrap();
        assert_eq!(count, 1);
        assert!(text.contains("📦 demo v1.0.0\n   test\n"));
        assert!(text.contains("   Commands: /run\n"));
        assert!(text.contains("   Tags: a, b\n"));
        assert!(!text.contains("Skills:"));
        assert!(!text.contains("Agents:"));
    }

    #[test]
    fn all_sections_are_formatted() {
        let dir = tempfile::tempdir().unwrap();
        write_metadata(
            dir.path(),
            "full",
            r#"{"name":"full","version":"2.1.0","description":"everything",
                "commands":["a","b"],"skills":["x","y"],"agents":[{},{},{}],"tags":["t"]}"#,
        );

        let (_, text) = render(dir.path()).unwrap();
        let expected = format!(
            "\n📦 full v2.1.0\n   everything\n   Commands: /a, /b\n   Skills: x, y\n   Agents: 3 specialized agents\n   Tags: t\n{}\n",
            "-".repeat(80)
        );
        assert!(text.contains(&expected), "{text}");
    }

    #[test]
    fn header_and_footer() {
        let dir = tempfile::tempdir().unwrap();
        fs::create_dir_all(dir.path().join("plugins")).unwrap();

        let (count, text) = render(dir.path()).unwrap();
        assert_eq!(count, 0);
        assert!(text.starts_with(&format!("Agent Toolkit Plugins\n\n{}\n", "=".repeat(80))));
        assert!(text.ends_with(&format!(
            "\nInstallation:\n{}\n{}\n",
            INSTALL_HINTS[0], INSTALL_HINTS[1]
        )));
    }

    #[test]
    fn directory_without_metadata_is_skipped() {
        let dir = tempfile::tempdir().unwrap();
        fs::create_dir_all(dir.path().join("plugins").join("bare")).unwrap();
        write_metadata(dir.path(), "real", r#"{"name":"real","version":"0.1.0"}"#);

        let (count, text) = render(dir.path()).unwrap();
        assert_eq!(count, 1);
        assert!(!text.contains("bare"));
        assert!(text.contains("📦 real v0.1.0"));
    }

    #[test]
    fn file_entries_are_skipped() {
        let dir = tempfile::tempdir().unwrap();
        write_metadata(dir.path(), "demo", r#"{"name":"demo","version":"1.0.0"}"#);
        fs::write(dir.path().join("plugins").join(".DS_Store"), "junk").unwrap();
        fs::write(dir.path().join("plugins").join("README.md"), "# plugins").unwrap();

        let (count, text) = render(dir.path()).unwrap();
        assert_eq!(count, 1);
        assert!(text.contains("📦 demo v1.0.0"));
    }

    #[test]
    fn numeric_version_is_printed() {
        let dir = tempfile::tempdir().unwrap();
        write_metadata(dir.path(), "demo", r#"{"name":"demo","version":1,"description":"d"}"#);

        let (count, text) = render(dir.path()).unwrap();
        assert_eq!(count, 1);
        assert!(text.contains("📦 demo v1\n   d\n"));
    }

    #[test]
    fn missing_fields_fall_back() {
        let dir = tempfile::tempdir().unwrap();
        write_metadata(dir.path(), "anon", "{}");

        let (_, text) = render(dir.path()).unwrap();
        assert!(text.contains(&format!("\n📦 anon\n{}", "-".repeat(80))));
    }

    #[test]
    fn malformed_metadata_stops_the_report() {
        let dir = tempfile::tempdir().unwrap();
        write_metadata(dir.path(), "a-good", r#"{"name":"good","version":"1.0.0"}"#);
        write_metadata(dir.path(), "b-bad", "{ nope");
        write_metadata(dir.path(), "c-late", r#"{"name":"late","version":"1.0.0"}"#);

        let err = render(dir.path()).unwrap_err();
        assert!(matches!(err, ToolkitError::ParseMetadata { .. }));
    }

    #[test]
    fn missing_plugins_root_is_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = render(dir.path()).unwrap_err();
        assert!(matches!(err, ToolkitError::ReadPluginsDir { .. }));
    }
}
