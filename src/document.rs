//! Layer document model.
//!
//! The exporter decomposes a layered PSD into this intermediate tree before
//! any blueprint is touched; the document (JSON or YAML) is the contract
//! between the exporter and the generator. Layer kinds map one-to-one onto
//! widget classes: groups become canvases, pixel layers become images, type
//! layers become text blocks, and specially named groups become buttons,
//! progress bars, and list/tile views.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::blueprint::{Color, Shadow, Stroke, TextAlign};
use crate::error::{PsduiError, Result};

/// One layer in the exported tree.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LayerNode {
    #[serde(default)]
    pub name: String,

    /// Position relative to the parent layer, in pixels.
    #[serde(default)]
    pub x: f32,
    #[serde(default)]
    pub y: f32,

    #[serde(default)]
    pub width: f32,
    #[serde(default)]
    pub height: f32,

    #[serde(flatten)]
    pub kind: LayerKind,
}

/// Kind-specific layer payload.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum LayerKind {
    /// A group layer; its children keep their own positions relative to it.
    Canvas {
        #[serde(default)]
        children: Vec<LayerNode>,
    },

    /// A flattened pixel layer exported to an image file.
    Image {
        /// Path of the exported image on disk; rewritten to the imported
        /// asset path before widgets are built.
        link: String,
        #[serde(default)]
        tint: Option<Color>,
    },

    /// A type layer.
    Text {
        text: String,
        #[serde(default)]
        font: Option<String>,
        #[serde(default = "default_font_size")]
        size: f32,
        #[serde(default)]
        color: Color,
        #[serde(default)]
        align: TextAlign,
        #[serde(default)]
        stroke: Option<Stroke>,
        #[serde(default)]
        shadow: Option<Shadow>,
    },

    /// A button group with one exported image per visual state.
    Button {
        #[serde(default)]
        normal: Option<String>,
        #[serde(default)]
        hovered: Option<String>,
        #[serde(default)]
        pressed: Option<String>,
        #[serde(default)]
        disabled: Option<String>,
        #[serde(default)]
        children: Vec<LayerNode>,
    },

    /// A progress bar group with background and fill images.
    ProgressBar {
        #[serde(default)]
        background: Option<String>,
        #[serde(default)]
        fill: Option<String>,
    },

    /// A list view whose entry layer becomes its own blueprint.
    ListView {
        #[serde(default)]
        entry: Option<Box<LayerNode>>,
    },

    /// A tile view whose entry layer becomes its own blueprint.
    TileView {
        #[serde(default)]
        entry: Option<Box<LayerNode>>,
    },
}

fn default_font_size() -> f32 {
    16.0
}

impl LayerKind {
    /// Child layers of this node, including a view's entry layer.
    pub fn children(&self) -> Vec<&LayerNode> {
        match self {
            LayerKind::Canvas { children } | LayerKind::Button { children, .. } => {
                children.iter().collect()
            }
            LayerKind::ListView { entry } | LayerKind::TileView { entry } => {
                entry.as_deref().into_iter().collect()
            }
            _ => Vec::new(),
        }
    }

    /// Mutable child layers of this node, including a view's entry layer.
    pub fn children_mut(&mut self) -> Vec<&mut LayerNode> {
        match self {
            LayerKind::Canvas { children } | LayerKind::Button { children, .. } => {
                children.iter_mut().collect()
            }
            LayerKind::ListView { entry } | LayerKind::TileView { entry } => {
                entry.as_deref_mut().into_iter().collect()
            }
            _ => Vec::new(),
        }
    }

    /// Every image link carried by this node (not its children).
    pub fn image_links(&self) -> Vec<&String> {
        match self {
            LayerKind::Image { link, .. } => vec![link],
            LayerKind::Button {
                normal,
                hovered,
                pressed,
                disabled,
                ..
            } => [normal, hovered, pressed, disabled]
                .into_iter()
                .flatten()
                .collect(),
            LayerKind::ProgressBar { background, fill } => {
                [background, fill].into_iter().flatten().collect()
            }
            _ => Vec::new(),
        }
    }

    /// Mutable references to every image link carried by this node.
    pub fn image_links_mut(&mut self) -> Vec<&mut String> {
        match self {
            LayerKind::Image { link, .. } => vec![link],
            LayerKind::Button {
                normal,
                hovered,
                pressed,
                disabled,
                ..
            } => [normal, hovered, pressed, disabled]
                .into_iter()
                .flatten()
                .collect(),
            LayerKind::ProgressBar { background, fill } => {
                [background, fill].into_iter().flatten().collect()
            }
            _ => Vec::new(),
        }
    }
}

/// Load a layer document, resolving a `.psd` input to its exported sidecar
/// document first.
pub fn load_document(input: &Path) -> Result<LayerNode> {
    let path = resolve_document_path(input);

    let content = std::fs::read_to_string(&path).map_err(|e| PsduiError::Io {
        path: path.clone(),
        message: format!("Failed to read layer document: {}", e),
    })?;

    parse_document(&content, &path)
}

/// Parse a layer document from JSON or YAML, picked by file extension.
pub fn parse_document(content: &str, path: &Path) -> Result<LayerNode> {
    let is_json = path
        .extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case("json"));

    if is_json {
        serde_json::from_str(content).map_err(|e| PsduiError::Parse {
            message: format!("Invalid layer document {}: {}", path.display(), e),
            help: Some("The exporter writes one root layer object per document".to_string()),
        })
    } else {
        serde_yaml::from_str(content).map_err(|e| PsduiError::Parse {
            message: format!("Invalid layer document {}: {}", path.display(), e),
            help: Some("The exporter writes one root layer object per document".to_string()),
        })
    }
}

/// Map a `.psd` path to the sidecar document the exporter writes next to it
/// (`Icon.psd` → `Icon.layers.json`, falling back to `Icon.layers.yaml`).
/// Any other input is taken as a document path already.
pub fn resolve_document_path(input: &Path) -> PathBuf {
    let is_psd = input
        .extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case("psd"));

    if !is_psd {
        return input.to_path_buf();
    }

    let json = input.with_extension("layers.json");
    if json.exists() {
        return json;
    }
    let yaml = input.with_extension("layers.yaml");
    if yaml.exists() {
        return yaml;
    }
    json
}
