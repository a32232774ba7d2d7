use serde_json::Value;
use std::fs;
use std::io;
use std::path::Path;

use crate::error::ToolkitError;

/// Displayable attributes from `.<namespace>-plugin/plugin.json`.
///
/// The file is not checked against a schema: any valid JSON is accepted.
/// Non-string scalars are shown as JSON text, and a list field that is
/// missing or not an array is empty and omitted from the report.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PluginMetadata {
    pub name: Option<String>,
    pub version: Option<String>,
    pub description: Option<String>,
    pub commands: Vec<String>,
    pub skills: Vec<String>,
    /// Only the count is reported, so descriptors stay untyped.
    pub agents: Vec<Value>,
    pub tags: Vec<String>,
}

impl PluginMetadata {
    /// Read the metadata file, `Ok(None)` when there is none.
    ///
    /// A plugins entry that is a plain file has no metadata either, so
    /// `NotADirectory` counts as absent.
    pub fn load(path: &Path) -> Result<Option<Self>, ToolkitError> {
        let raw = match fs::read_to_string(path) {
            Ok(raw) => raw,
            Err(err) if is_absent(&err) => return Ok(None),
            Err(source) => {
                return Err(ToolkitError::ReadMetadata {
                    path: path.to_path_buf(),
                    source,
                });
            }
        };

        Self::parse(&raw)
            .map(Some)
            .map_err(|source| ToolkitError::ParseMetadata {
                path: path.to_path_buf(),
                source,
            })
    }

    pub fn parse(raw: &str) -> Result<Self, serde_json::Error> {
        let value: Value = serde_json::from_str(raw)?;
        Ok(Self::from_value(&value))
    }

    pub fn from_value(value: &Value) -> Self {
        Self {
            name: scalar(value.get("name")),
            version: scalar(value.get("version")),
            description: scalar(value.get("description")),
            commands: list(value.get("commands")),
            skills: list(value.get("skills")),
            agents: value
                .get("agents")
                .and_then(Value::as_array)
                .cloned()
                .unwrap_or_default(),
            tags: list(value.get("tags")),
        }
    }
}

pub(crate) fn is_absent(err: &io::Error) -> bool {
    matches!(
        err.kind(),
        io::ErrorKind::NotFound | io::ErrorKind::NotADirectory
    )
}

fn scalar(value: Option<&Value>) -> Option<String> {
    match value? {
        Value::Null => None,
        other => Some(render(other)),
    }
}

fn list(value: Option<&Value>) -> Vec<String> {
    value
        .and_then(Value::as_array)
        .map(|items| items.iter().map(render).collect())
        .unwrap_or_default()
}

fn render(value: &Value) -> String {
    match value {
        Value::String(text) => text.clone(),
        other => other.to_string(),
    }
}
