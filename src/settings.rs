//! Project settings (psdui.yaml) parsing.
//!
//! The settings record configures the whole pipeline: whether the listener is
//! active, where layered artwork lives, which asset directory imported
//! textures land in, and how font names resolve to font assets. It is
//! constructed explicitly and passed by reference into the components that
//! need it.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{PsduiError, Result};

/// Default settings file name, looked up in the working directory.
pub const SETTINGS_FILENAME: &str = "psdui.yaml";

/// Pipeline settings loaded from psdui.yaml.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Whether re-imports trigger blueprint regeneration at all.
    pub enabled: bool,

    /// Directory holding the layered source artwork.
    pub texture_src_dir: PathBuf,

    /// Asset directory imported UI textures land in (virtual `/Game/...` path).
    pub texture_asset_dir: String,

    /// Font name to font asset path mapping.
    pub font_map: BTreeMap<String, String>,

    /// Fallback font asset for names missing from the map.
    pub default_font: Option<String>,

    /// Generator command prefix the listener dispatches.
    pub script: String,

    /// Directory compiled blueprint documents are written to.
    pub output: PathBuf,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            enabled: true,
            texture_src_dir: PathBuf::from("Art/UI/Texture"),
            texture_asset_dir: "/Game/Widgets/Texture".to_string(),
            font_map: BTreeMap::new(),
            default_font: None,
            script: "psdui generate".to_string(),
            output: PathBuf::from("dist/widgets"),
        }
    }
}

impl Settings {
    /// Load settings from a psdui.yaml file.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| PsduiError::Io {
            path: path.to_path_buf(),
            message: format!("Failed to read settings: {}", e),
        })?;

        Self::parse(&content)
    }

    /// Parse settings from a YAML string.
    pub fn parse(content: &str) -> Result<Self> {
        serde_yaml::from_str(content).map_err(|e| PsduiError::Parse {
            message: format!("Invalid settings: {}", e),
            help: Some("Check psdui.yaml syntax".to_string()),
        })
    }

    /// Resolve settings for a CLI invocation: an explicit path must load, the
    /// conventional psdui.yaml loads when present, anything else falls back to
    /// defaults.
    pub fn load_or_default(explicit: Option<&Path>) -> Result<Self> {
        if let Some(path) = explicit {
            return Self::load(path);
        }
        let conventional = Path::new(SETTINGS_FILENAME);
        if conventional.exists() {
            return Self::load(conventional);
        }
        Ok(Self::default())
    }

    /// Resolve a font name to a font asset path through the map, falling back
    /// to the default font.
    pub fn resolve_font(&self, name: Option<&str>) -> Option<String> {
        name.and_then(|n| self.font_map.get(n).cloned())
            .or_else(|| self.default_font.clone())
    }
}
