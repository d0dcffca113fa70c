//! Widget blueprint model.
//!
//! A blueprint owns a widget tree (one designated root), a list of
//! implemented interfaces, and, once compiled, a generated class. The model
//! lives entirely in this crate; hosts (see [`host`]) decide where blueprints
//! are stored and what compile-and-save means.

pub mod builder;
pub mod host;

use serde::{Deserialize, Serialize};

pub use builder::{BlueprintBuilder, BuildReport};
pub use host::{MemoryHost, WidgetHost};

/// Handle to a blueprint inside a host.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BlueprintId(pub usize);

/// Handle to a widget inside a blueprint's tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct WidgetId(pub usize);

/// An RGBA colour with components in `0.0..=1.0`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl Default for Color {
    fn default() -> Self {
        // opaque white
        Self {
            r: 1.0,
            g: 1.0,
            b: 1.0,
            a: 1.0,
        }
    }
}

/// Horizontal text justification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TextAlign {
    #[default]
    Left,
    Center,
    Right,
}

/// Text outline settings.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Stroke {
    pub color: Color,
    pub size: f32,
}

/// Drop shadow settings.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Shadow {
    pub color: Color,
    pub offset_x: f32,
    pub offset_y: f32,
}

/// Per-state brushes of a button widget. Brushes are asset paths.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ButtonStyle {
    pub normal: Option<String>,
    pub hovered: Option<String>,
    pub pressed: Option<String>,
    pub disabled: Option<String>,
}

/// Widget class plus its class-specific properties.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "class", rename_all = "snake_case")]
pub enum WidgetKind {
    CanvasPanel,
    Image {
        /// Asset path of the brush texture.
        brush: Option<String>,
        tint: Option<Color>,
    },
    TextBlock {
        text: String,
        /// Resolved font asset path.
        font: Option<String>,
        size: f32,
        color: Color,
        align: TextAlign,
        stroke: Option<Stroke>,
        shadow: Option<Shadow>,
    },
    Button {
        style: ButtonStyle,
    },
    ProgressBar {
        background: Option<String>,
        fill: Option<String>,
    },
    ListView {
        entry_class: Option<GeneratedClass>,
    },
    TileView {
        entry_class: Option<GeneratedClass>,
        entry_width: f32,
        entry_height: f32,
    },
}

/// Placement of a widget inside its parent.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Slot {
    /// Positioned and sized explicitly inside a canvas panel.
    Anchored {
        x: f32,
        y: f32,
        width: f32,
        height: f32,
    },
    /// Fills the parent on both axes.
    Fill,
}

/// One widget in a blueprint's tree.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Widget {
    pub name: String,
    pub kind: WidgetKind,
    /// Set when the widget is attached to a parent; the root carries none.
    pub slot: Option<Slot>,
    pub children: Vec<WidgetId>,
}

/// The widget hierarchy owned by a blueprint.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct WidgetTree {
    pub widgets: Vec<Widget>,
    pub root: Option<WidgetId>,
}

impl WidgetTree {
    /// Add a detached widget to the tree.
    pub fn add(&mut self, kind: WidgetKind, name: &str) -> WidgetId {
        let id = WidgetId(self.widgets.len());
        self.widgets.push(Widget {
            name: name.to_string(),
            kind,
            slot: None,
            children: Vec::new(),
        });
        id
    }

    /// Attach `child` under `parent` with the given slot. Unknown handles are
    /// ignored.
    pub fn attach(&mut self, parent: WidgetId, child: WidgetId, slot: Slot) {
        if child.0 >= self.widgets.len() {
            return;
        }
        let Some(parent_widget) = self.widgets.get_mut(parent.0) else {
            return;
        };
        parent_widget.children.push(child);
        self.widgets[child.0].slot = Some(slot);
    }

    pub fn get(&self, id: WidgetId) -> Option<&Widget> {
        self.widgets.get(id.0)
    }
}

/// A blueprint interface, by class name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InterfaceClass(pub String);

impl InterfaceClass {
    /// The interface list/tile view entry blueprints must implement.
    pub fn list_entry() -> Self {
        Self("UserObjectListEntry".to_string())
    }
}

/// The class a blueprint compiles into, e.g.
/// `/Game/Widgets/WBP_Icon.WBP_Icon_C`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GeneratedClass(pub String);

/// A widget blueprint asset.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WidgetBlueprint {
    pub asset_path: String,
    pub tree: WidgetTree,
    /// Implemented interfaces. Applying an interface replaces this whole
    /// list with a single entry.
    pub interfaces: Vec<InterfaceClass>,
    /// Present once the blueprint has been compiled.
    pub generated_class: Option<GeneratedClass>,
}

impl WidgetBlueprint {
    pub fn new(asset_path: &str) -> Self {
        Self {
            asset_path: asset_path.to_string(),
            tree: WidgetTree::default(),
            interfaces: Vec::new(),
            generated_class: None,
        }
    }

    /// Base name of the asset path, e.g. `WBP_Icon` for
    /// `/Game/Widgets/WBP_Icon`.
    pub fn base_name(&self) -> &str {
        self.asset_path
            .rsplit('/')
            .next()
            .unwrap_or(&self.asset_path)
    }
}
