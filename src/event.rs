//! Re-import event payload.
//!
//! Events arrive from whatever drives the pipeline (the file watcher, the
//! `reimport` command, or an embedding editor) and describe a just-reimported
//! asset: its virtual asset path, its kind, and the original source files
//! recorded in its import metadata.

use std::path::Path;

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

/// Kind of an imported asset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "snake_case")]
pub enum AssetKind {
    #[value(name = "texture2d")]
    #[serde(rename = "texture2d")]
    Texture2D,
    Material,
    Mesh,
    Sound,
    Other,
}

impl AssetKind {
    /// Classify an asset by its source file extension, the way an import
    /// pipeline would route the file.
    pub fn from_source_path(path: &Path) -> Self {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_ascii_lowercase());

        match ext.as_deref() {
            Some("psd" | "png" | "tga" | "jpg" | "jpeg" | "bmp") => AssetKind::Texture2D,
            Some("fbx" | "obj") => AssetKind::Mesh,
            Some("wav" | "ogg" | "mp3") => AssetKind::Sound,
            _ => AssetKind::Other,
        }
    }
}

/// A single asset re-import notification.
#[derive(Debug, Clone)]
pub struct ReimportEvent {
    /// Virtual asset path of the imported object, e.g.
    /// `/Game/Widgets/Texture/Icon.Icon`.
    pub asset_path: String,

    /// Kind of the imported object.
    pub kind: AssetKind,

    /// Original source files recorded in the asset's import metadata,
    /// in import order.
    pub source_files: Vec<String>,
}

impl ReimportEvent {
    /// Synthesize the event a texture re-import would produce for a source
    /// file on disk. The asset lands in `texture_asset_dir` under its stem,
    /// with the usual `Name.Name` object path shape.
    pub fn from_source_file(source: &Path, texture_asset_dir: &str) -> Self {
        let stem = source
            .file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or_default();
        let dir = texture_asset_dir.trim_end_matches('/');

        Self {
            asset_path: format!("{dir}/{stem}.{stem}"),
            kind: AssetKind::from_source_path(source),
            source_files: vec![source.to_string_lossy().replace('\\', "/")],
        }
    }
}
