//! Layer document validation.
//!
//! Checks a document for the problems the generator would otherwise paper
//! over silently: colliding widget names, image links whose exported files
//! are missing, font names that resolve to nothing, and views without an
//! entry layer.

use std::collections::HashSet;
use std::fmt;
use std::path::Path;

use crate::document::{LayerKind, LayerNode};
use crate::settings::Settings;

/// Severity level for a diagnostic.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Warning,
    Error,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Severity::Warning => write!(f, "warning"),
            Severity::Error => write!(f, "error"),
        }
    }
}

/// A single validation diagnostic.
#[derive(Debug, Clone)]
pub struct Diagnostic {
    pub severity: Severity,
    /// Machine-readable diagnostic code (e.g. "psdui::check::duplicate-name").
    pub code: String,
    pub message: String,
    /// Optional help text suggesting how to fix the issue.
    pub help: Option<String>,
}

impl Diagnostic {
    pub fn error(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Error,
            code: code.into(),
            message: message.into(),
            help: None,
        }
    }

    pub fn warning(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Warning,
            code: code.into(),
            message: message.into(),
            help: None,
        }
    }

    pub fn with_help(mut self, help: impl Into<String>) -> Self {
        self.help = Some(help.into());
        self
    }
}

/// Collects diagnostics from validation checks.
#[derive(Debug, Clone, Default)]
pub struct ValidationResult {
    diagnostics: Vec<Diagnostic>,
}

impl ValidationResult {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, diagnostic: Diagnostic) {
        self.diagnostics.push(diagnostic);
    }

    pub fn has_errors(&self) -> bool {
        self.diagnostics
            .iter()
            .any(|d| d.severity == Severity::Error)
    }

    pub fn error_count(&self) -> usize {
        self.diagnostics
            .iter()
            .filter(|d| d.severity == Severity::Error)
            .count()
    }

    pub fn warning_count(&self) -> usize {
        self.diagnostics
            .iter()
            .filter(|d| d.severity == Severity::Warning)
            .count()
    }

    pub fn is_ok(&self) -> bool {
        self.diagnostics.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Diagnostic> {
        self.diagnostics.iter()
    }
}

/// Validate a layer document against the settings it will be built with.
pub fn validate_document(root: &LayerNode, settings: &Settings) -> ValidationResult {
    let mut result = ValidationResult::new();
    let mut seen = HashSet::new();
    walk(root, settings, &mut seen, &mut result);
    result
}

fn walk(
    node: &LayerNode,
    settings: &Settings,
    seen: &mut HashSet<String>,
    result: &mut ValidationResult,
) {
    if !node.name.is_empty() && !seen.insert(node.name.clone()) {
        result.push(
            Diagnostic::warning(
                "psdui::check::duplicate-name",
                format!("Duplicate layer name '{}'", node.name),
            )
            .with_help("The generator renames duplicates with a numeric suffix".to_string()),
        );
    }

    for link in node.kind.image_links() {
        if !link.is_empty() && !Path::new(link.as_str()).exists() {
            result.push(
                Diagnostic::error(
                    "psdui::check::missing-image",
                    format!("Image file not found: {}", link),
                )
                .with_help("Re-export the layered artwork or fix the link".to_string()),
            );
        }
    }

    if let LayerKind::Text { font, .. } = &node.kind {
        if settings.resolve_font(font.as_deref()).is_none() {
            let shown = font.as_deref().unwrap_or("<unset>");
            result.push(
                Diagnostic::warning(
                    "psdui::check::unresolved-font",
                    format!("Font '{}' resolves to no font asset", shown),
                )
                .with_help("Add it to font_map or set default_font in psdui.yaml".to_string()),
            );
        }
    }

    if let LayerKind::ListView { entry: None } | LayerKind::TileView { entry: None } = &node.kind {
        result.push(Diagnostic::warning(
            "psdui::check::empty-view",
            format!("View '{}' has no entry layer", node.name),
        ));
    }

    for child in node.kind.children() {
        walk(child, settings, seen, result);
    }
}
