//! Blueprint generation from a layer document.
//!
//! Mirrors the exporter contract end to end: dedupe widget names, rewrite
//! image links from files on disk to imported asset paths, split list/tile
//! view entry layers into their own blueprints (with the list-entry
//! interface), then populate and compile the destination blueprint.

use std::collections::HashSet;
use std::path::Path;

use crate::blueprint::{
    BlueprintId, ButtonStyle, GeneratedClass, InterfaceClass, Slot, WidgetHost, WidgetId,
    WidgetKind,
};
use crate::document::{LayerKind, LayerNode};
use crate::error::{PsduiError, Result};
use crate::settings::Settings;

/// What a build produced.
#[derive(Debug, Default)]
pub struct BuildReport {
    /// Asset paths of every blueprint compiled and saved, entries first.
    pub blueprints: Vec<String>,
    /// Widgets constructed across all blueprints.
    pub widget_count: usize,
    /// Image links whose files were missing on disk. Their links are still
    /// rewritten; the widgets reference assets that may not exist yet.
    pub missing_images: Vec<String>,
}

/// Drives widget-blueprint assembly through a [`WidgetHost`].
pub struct BlueprintBuilder<'a, H: WidgetHost> {
    host: &'a mut H,
    settings: &'a Settings,
}

impl<'a, H: WidgetHost> BlueprintBuilder<'a, H> {
    pub fn new(host: &'a mut H, settings: &'a Settings) -> Self {
        Self { host, settings }
    }

    /// Build the blueprint at `asset_path` from a layer document root.
    pub fn build(&mut self, mut root: LayerNode, asset_path: &str) -> Result<BuildReport> {
        let mut report = BuildReport::default();

        let base = asset_path.rsplit('/').next().unwrap_or(asset_path);
        root.name = base.to_string();

        let mut seen = HashSet::new();
        fix_names(&mut root, &mut seen);
        rewrite_image_links(
            &mut root,
            &self.settings.texture_asset_dir,
            &mut report.missing_images,
        );

        let dst_dir = match asset_path.rfind('/') {
            Some(index) => &asset_path[..index],
            None => "",
        };

        // List/tile entry layers become their own blueprints, compiled before
        // the owning view so its entry class resolves.
        let mut entries = Vec::new();
        collect_view_entries(&root, &mut entries);
        for entry in entries {
            let entry_path = join_asset_path(dst_dir, &entry.name);
            let id = self.find_or_create(&entry_path)?;
            self.populate(id, &entry, dst_dir, &mut report)?;
            self.host.apply_interface(id, InterfaceClass::list_entry());
            self.host.compile_and_save(id)?;
            report.blueprints.push(entry_path);
        }

        let id = self.find_or_create(asset_path)?;
        self.populate(id, &root, dst_dir, &mut report)?;
        self.host.compile_and_save(id)?;
        report.blueprints.push(asset_path.to_string());

        Ok(report)
    }

    fn find_or_create(&mut self, asset_path: &str) -> Result<BlueprintId> {
        if let Some(id) = self.host.find_blueprint(asset_path) {
            return Ok(id);
        }
        self.host
            .create_blueprint(asset_path)
            .ok_or_else(|| PsduiError::Build {
                message: format!("Failed to create blueprint at {}", asset_path),
                help: None,
            })
    }

    fn populate(
        &mut self,
        blueprint: BlueprintId,
        root: &LayerNode,
        dst_dir: &str,
        report: &mut BuildReport,
    ) -> Result<()> {
        if let Some(widget) = self.create_widget(blueprint, root, None, dst_dir, report)? {
            self.host.set_root_widget(blueprint, widget);
        }
        Ok(())
    }

    fn create_widget(
        &mut self,
        blueprint: BlueprintId,
        node: &LayerNode,
        parent: Option<WidgetId>,
        dst_dir: &str,
        report: &mut BuildReport,
    ) -> Result<Option<WidgetId>> {
        let kind = self.widget_kind_for(node, dst_dir);
        let Some(widget) = self.host.construct_widget(blueprint, kind, &node.name) else {
            return Ok(None);
        };
        report.widget_count += 1;

        if let Some(parent) = parent {
            self.host.attach_child(
                blueprint,
                parent,
                widget,
                Slot::Anchored {
                    x: node.x,
                    y: node.y,
                    width: node.width,
                    height: node.height,
                },
            );
        }

        match &node.kind {
            LayerKind::Canvas { children } => {
                for child in children {
                    self.create_widget(blueprint, child, Some(widget), dst_dir, report)?;
                }
            }
            LayerKind::Button { children, .. } if !children.is_empty() => {
                // Button content sits on an intermediate canvas filling the
                // button; only the first child layer carries content.
                let canvas_name = format!("{}_canvas", node.name);
                if let Some(canvas) =
                    self.host
                        .construct_widget(blueprint, WidgetKind::CanvasPanel, &canvas_name)
                {
                    report.widget_count += 1;
                    self.host.attach_child(blueprint, widget, canvas, Slot::Fill);
                    self.create_widget(blueprint, &children[0], Some(canvas), dst_dir, report)?;
                }
            }
            _ => {}
        }

        Ok(Some(widget))
    }

    fn widget_kind_for(&self, node: &LayerNode, dst_dir: &str) -> WidgetKind {
        match &node.kind {
            LayerKind::Canvas { .. } => WidgetKind::CanvasPanel,
            LayerKind::Image { link, tint } => WidgetKind::Image {
                brush: Some(link.clone()),
                tint: *tint,
            },
            LayerKind::Text {
                text,
                font,
                size,
                color,
                align,
                stroke,
                shadow,
            } => WidgetKind::TextBlock {
                text: text.clone(),
                font: self.settings.resolve_font(font.as_deref()),
                size: *size,
                color: *color,
                align: *align,
                stroke: *stroke,
                shadow: *shadow,
            },
            LayerKind::Button {
                normal,
                hovered,
                pressed,
                disabled,
                ..
            } => WidgetKind::Button {
                style: ButtonStyle {
                    normal: normal.clone(),
                    hovered: hovered.clone(),
                    pressed: pressed.clone(),
                    disabled: disabled.clone(),
                },
            },
            LayerKind::ProgressBar { background, fill } => WidgetKind::ProgressBar {
                background: background.clone(),
                fill: fill.clone(),
            },
            LayerKind::ListView { entry } => WidgetKind::ListView {
                entry_class: self.entry_class(entry.as_deref(), dst_dir),
            },
            LayerKind::TileView { entry } => WidgetKind::TileView {
                entry_class: self.entry_class(entry.as_deref(), dst_dir),
                entry_width: entry.as_deref().map(|e| e.width).unwrap_or_default(),
                entry_height: entry.as_deref().map(|e| e.height).unwrap_or_default(),
            },
        }
    }

    fn entry_class(&self, entry: Option<&LayerNode>, dst_dir: &str) -> Option<GeneratedClass> {
        let entry = entry?;
        let path = join_asset_path(dst_dir, &entry.name);
        let id = self.host.find_blueprint(&path)?;
        self.host.generated_class(id)
    }
}

fn join_asset_path(dir: &str, name: &str) -> String {
    if dir.is_empty() {
        name.to_string()
    } else {
        format!("{}/{}", dir.trim_end_matches('/'), name)
    }
}

/// Ensure every layer carries a unique, non-empty name.
fn fix_names(node: &mut LayerNode, seen: &mut HashSet<String>) {
    if node.name.is_empty() {
        node.name = "Widget".to_string();
    }

    let mut candidate = node.name.clone();
    let mut index = 1;
    while !seen.insert(candidate.clone()) {
        candidate = format!("{}_{}", node.name, index);
        index += 1;
    }
    node.name = candidate;

    for child in node.kind.children_mut() {
        fix_names(child, seen);
    }
}

/// Rewrite every image link from its exported file path to the asset path it
/// imports to, recording links whose files are missing on disk.
fn rewrite_image_links(node: &mut LayerNode, asset_dir: &str, missing: &mut Vec<String>) {
    for link in node.kind.image_links_mut() {
        if link.is_empty() {
            continue;
        }
        if !Path::new(link.as_str()).exists() {
            missing.push(link.clone());
        }
        *link = asset_link(link, asset_dir);
    }

    for child in node.kind.children_mut() {
        rewrite_image_links(child, asset_dir, missing);
    }
}

/// Asset path an exported image file imports to: its base name (up to the
/// first dot) under the texture asset directory.
fn asset_link(file_path: &str, asset_dir: &str) -> String {
    let base = file_path
        .rsplit(['/', '\\'])
        .next()
        .unwrap_or(file_path)
        .split('.')
        .next()
        .unwrap_or_default();
    format!("{}/{}", asset_dir.trim_end_matches('/'), base)
}

/// Collect every list/tile view entry layer, depth first.
fn collect_view_entries(node: &LayerNode, entries: &mut Vec<LayerNode>) {
    for child in node.kind.children() {
        collect_view_entries(child, entries);
    }

    if let LayerKind::ListView { entry } | LayerKind::TileView { entry } = &node.kind {
        if let Some(entry) = entry {
            entries.push((**entry).clone());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::blueprint::MemoryHost;
    use pretty_assertions::assert_eq;

    fn canvas(name: &str, children: Vec<LayerNode>) -> LayerNode {
        LayerNode {
            name: name.to_string(),
            x: 0.0,
            y: 0.0,
            width: 100.0,
            height: 100.0,
            kind: LayerKind::Canvas { children },
        }
    }

    fn image(name: &str, link: &str) -> LayerNode {
        LayerNode {
            name: name.to_string(),
            x: 10.0,
            y: 20.0,
            width: 32.0,
            height: 32.0,
            kind: LayerKind::Image {
                link: link.to_string(),
                tint: None,
            },
        }
    }

    #[test]
    fn test_build_simple_canvas() {
        let settings = Settings::default();
        let mut host = MemoryHost::new();
        let doc = canvas("Menu", vec![image("Background", "/tmp/missing/bg.png")]);

        let report = BlueprintBuilder::new(&mut host, &settings)
            .build(doc, "/Game/UI/WBP_Menu")
            .unwrap();

        assert_eq!(report.blueprints, vec!["/Game/UI/WBP_Menu"]);
        assert_eq!(report.widget_count, 2);
        assert_eq!(report.missing_images, vec!["/tmp/missing/bg.png"]);

        let id = host.find_blueprint("/Game/UI/WBP_Menu").unwrap();
        let bp = host.blueprint(id).unwrap();

        // the root is named after the destination asset
        let root = bp.tree.get(bp.tree.root.unwrap()).unwrap();
        assert_eq!(root.name, "WBP_Menu");
        assert_eq!(root.children.len(), 1);

        // image link rewritten to the imported asset path
        let child = bp.tree.get(root.children[0]).unwrap();
        assert_eq!(
            child.kind,
            WidgetKind::Image {
                brush: Some("/Game/Widgets/Texture/bg".to_string()),
                tint: None,
            }
        );
        assert_eq!(
            child.slot,
            Some(Slot::Anchored {
                x: 10.0,
                y: 20.0,
                width: 32.0,
                height: 32.0
            })
        );
    }

    #[test]
    fn test_build_deduplicates_names() {
        let settings = Settings::default();
        let mut host = MemoryHost::new();
        let doc = canvas(
            "Menu",
            vec![
                image("Icon", "a.png"),
                image("Icon", "b.png"),
                image("Icon", "c.png"),
            ],
        );

        BlueprintBuilder::new(&mut host, &settings)
            .build(doc, "/Game/UI/WBP_Menu")
            .unwrap();

        let id = host.find_blueprint("/Game/UI/WBP_Menu").unwrap();
        let bp = host.blueprint(id).unwrap();
        let names: Vec<&str> = bp.tree.widgets.iter().map(|w| w.name.as_str()).collect();

        assert_eq!(names, vec!["WBP_Menu", "Icon", "Icon_1", "Icon_2"]);
    }

    #[test]
    fn test_build_list_view_entry_blueprint() {
        let settings = Settings::default();
        let mut host = MemoryHost::new();

        let entry = canvas("Slot", vec![image("SlotIcon", "slot.png")]);
        let doc = canvas(
            "Inventory",
            vec![LayerNode {
                name: "Items".to_string(),
                x: 0.0,
                y: 0.0,
                width: 400.0,
                height: 600.0,
                kind: LayerKind::ListView {
                    entry: Some(Box::new(entry)),
                },
            }],
        );

        let report = BlueprintBuilder::new(&mut host, &settings)
            .build(doc, "/Game/UI/WBP_Inventory")
            .unwrap();

        assert_eq!(
            report.blueprints,
            vec!["/Game/UI/Slot", "/Game/UI/WBP_Inventory"]
        );

        // the entry blueprint implements the list-entry interface
        let entry_id = host.find_blueprint("/Game/UI/Slot").unwrap();
        assert_eq!(
            host.blueprint(entry_id).unwrap().interfaces,
            vec![InterfaceClass::list_entry()]
        );

        // the view widget points at the entry's generated class
        let main_id = host.find_blueprint("/Game/UI/WBP_Inventory").unwrap();
        let bp = host.blueprint(main_id).unwrap();
        let view = bp
            .tree
            .widgets
            .iter()
            .find(|w| w.name == "Items")
            .unwrap();
        assert_eq!(
            view.kind,
            WidgetKind::ListView {
                entry_class: Some(GeneratedClass("/Game/UI/Slot.Slot_C".to_string())),
            }
        );
    }

    #[test]
    fn test_build_tile_view_entry_dimensions() {
        let settings = Settings::default();
        let mut host = MemoryHost::new();

        let mut entry = canvas("Cell", vec![]);
        entry.width = 64.0;
        entry.height = 48.0;
        let doc = canvas(
            "Grid",
            vec![LayerNode {
                name: "Tiles".to_string(),
                x: 0.0,
                y: 0.0,
                width: 400.0,
                height: 400.0,
                kind: LayerKind::TileView {
                    entry: Some(Box::new(entry)),
                },
            }],
        );

        BlueprintBuilder::new(&mut host, &settings)
            .build(doc, "/Game/UI/WBP_Grid")
            .unwrap();

        let id = host.find_blueprint("/Game/UI/WBP_Grid").unwrap();
        let bp = host.blueprint(id).unwrap();
        let view = bp.tree.widgets.iter().find(|w| w.name == "Tiles").unwrap();

        let WidgetKind::TileView {
            entry_class,
            entry_width,
            entry_height,
        } = &view.kind
        else {
            panic!("expected tile view");
        };
        assert!(entry_class.is_some());
        assert_eq!(*entry_width, 64.0);
        assert_eq!(*entry_height, 48.0);
    }

    #[test]
    fn test_build_button_child_canvas() {
        let settings = Settings::default();
        let mut host = MemoryHost::new();

        let doc = canvas(
            "Menu",
            vec![LayerNode {
                name: "Play".to_string(),
                x: 50.0,
                y: 50.0,
                width: 200.0,
                height: 60.0,
                kind: LayerKind::Button {
                    normal: Some("play_n.png".to_string()),
                    hovered: Some("play_h.png".to_string()),
                    pressed: None,
                    disabled: None,
                    children: vec![canvas("PlayContent", vec![])],
                },
            }],
        );

        BlueprintBuilder::new(&mut host, &settings)
            .build(doc, "/Game/UI/WBP_Menu")
            .unwrap();

        let id = host.find_blueprint("/Game/UI/WBP_Menu").unwrap();
        let bp = host.blueprint(id).unwrap();

        let button = bp.tree.widgets.iter().find(|w| w.name == "Play").unwrap();
        let WidgetKind::Button { style } = &button.kind else {
            panic!("expected button");
        };
        assert_eq!(
            style.normal.as_deref(),
            Some("/Game/Widgets/Texture/play_n")
        );
        assert_eq!(
            style.hovered.as_deref(),
            Some("/Game/Widgets/Texture/play_h")
        );

        // content hangs off an intermediate fill canvas
        let canvas_widget = bp
            .tree
            .widgets
            .iter()
            .find(|w| w.name == "Play_canvas")
            .unwrap();
        assert_eq!(canvas_widget.slot, Some(Slot::Fill));
        assert_eq!(canvas_widget.children.len(), 1);
    }

    #[test]
    fn test_build_resolves_fonts() {
        let mut settings = Settings::default();
        settings
            .font_map
            .insert("Roboto".to_string(), "/Game/Fonts/Roboto".to_string());
        settings.default_font = Some("/Game/Fonts/Fallback".to_string());

        let mut host = MemoryHost::new();
        let doc = canvas(
            "Menu",
            vec![
                LayerNode {
                    name: "Known".to_string(),
                    x: 0.0,
                    y: 0.0,
                    width: 100.0,
                    height: 20.0,
                    kind: LayerKind::Text {
                        text: "a".to_string(),
                        font: Some("Roboto".to_string()),
                        size: 16.0,
                        color: Default::default(),
                        align: Default::default(),
                        stroke: None,
                        shadow: None,
                    },
                },
                LayerNode {
                    name: "Unknown".to_string(),
                    x: 0.0,
                    y: 0.0,
                    width: 100.0,
                    height: 20.0,
                    kind: LayerKind::Text {
                        text: "b".to_string(),
                        font: Some("Mystery".to_string()),
                        size: 16.0,
                        color: Default::default(),
                        align: Default::default(),
                        stroke: None,
                        shadow: None,
                    },
                },
            ],
        );

        BlueprintBuilder::new(&mut host, &settings)
            .build(doc, "/Game/UI/WBP_Menu")
            .unwrap();

        let id = host.find_blueprint("/Game/UI/WBP_Menu").unwrap();
        let bp = host.blueprint(id).unwrap();

        let font_of = |name: &str| {
            let widget = bp.tree.widgets.iter().find(|w| w.name == name).unwrap();
            match &widget.kind {
                WidgetKind::TextBlock { font, .. } => font.clone(),
                _ => panic!("expected text block"),
            }
        };

        assert_eq!(font_of("Known").as_deref(), Some("/Game/Fonts/Roboto"));
        assert_eq!(font_of("Unknown").as_deref(), Some("/Game/Fonts/Fallback"));
    }

    #[test]
    fn test_build_reuses_existing_blueprint() {
        let settings = Settings::default();
        let mut host = MemoryHost::new();
        host.create_blueprint("/Game/UI/WBP_Menu").unwrap();

        let report = BlueprintBuilder::new(&mut host, &settings)
            .build(canvas("Menu", vec![]), "/Game/UI/WBP_Menu")
            .unwrap();

        assert_eq!(report.blueprints, vec!["/Game/UI/WBP_Menu"]);
        assert_eq!(host.blueprints().len(), 1);
    }

    #[test]
    fn test_asset_link() {
        assert_eq!(
            asset_link("C:/Art/UI/Texture/bg.9.png", "/Game/Widgets/Texture"),
            "/Game/Widgets/Texture/bg"
        );
        assert_eq!(
            asset_link("C:\\Art\\bg.png", "/Game/Widgets/Texture/"),
            "/Game/Widgets/Texture/bg"
        );
    }
}
