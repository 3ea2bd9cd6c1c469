//! Rendering options with TOML preset support.
//!
//! Geometry sizes, render style and colors are consolidated here. Options
//! serialize to/from TOML so view presets can be stored as plain files.

mod colors;
mod geometry;

use std::path::Path;

pub use colors::{ColorOptions, TintedElements, DEFAULT_BOND_COLOR};
pub use geometry::GeometryOptions;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::error::LigviewError;

/// Top-level options container. All sub-structs use `#[serde(default)]` so
/// partial TOML files (e.g. only overriding `[geometry]`) work correctly.
#[derive(
    Debug, Clone, Serialize, Deserialize, PartialEq, Default, JsonSchema,
)]
#[serde(default)]
pub struct Options {
    /// Primitive sizes and style.
    pub geometry: GeometryOptions,
    /// Color palette options.
    #[schemars(skip)]
    pub colors: ColorOptions,
}

impl Options {
    /// Generate JSON Schema describing the UI-exposed options.
    #[must_use]
    pub fn json_schema() -> schemars::Schema {
        schemars::schema_for!(Options)
    }

    /// Load options from a TOML file. Missing fields use defaults.
    pub fn load(path: &Path) -> Result<Self, LigviewError> {
        let content = std::fs::read_to_string(path).map_err(LigviewError::Io)?;
        toml::from_str(&content)
            .map_err(|e| LigviewError::OptionsParse(e.to_string()))
    }

    /// Save options to a TOML file (pretty-printed).
    pub fn save(&self, path: &Path) -> Result<(), LigviewError> {
        let content = toml::to_string_pretty(self)
            .map_err(|e| LigviewError::OptionsParse(e.to_string()))?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(LigviewError::Io)?;
        }
        std::fs::write(path, content).map_err(LigviewError::Io)
    }

    /// List available preset names (TOML file stems) in a directory.
    #[must_use]
    pub fn list_presets(dir: &Path) -> Vec<String> {
        let mut names = Vec::new();
        if let Ok(entries) = std::fs::read_dir(dir) {
            for entry in entries.flatten() {
                let path = entry.path();
                if path.extension().is_some_and(|ext| ext == "toml") {
                    if let Some(stem) =
                        path.file_stem().and_then(|s| s.to_str())
                    {
                        names.push(stem.to_owned());
                    }
                }
            }
        }
        names.sort();
        names
    }
}
