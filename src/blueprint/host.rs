//! Blueprint host seam.
//!
//! [`WidgetHost`] is the boundary between the generator and whatever owns
//! blueprint storage. Each operation is a single synchronous call with
//! host-defined failure semantics; the generator never retries and never
//! translates host failures.

use std::path::PathBuf;

use crate::blueprint::{
    BlueprintId, GeneratedClass, InterfaceClass, Slot, WidgetBlueprint, WidgetId, WidgetKind,
};
use crate::error::{PsduiError, Result};

/// Owns blueprint assets and carries out assembly operations on them.
pub trait WidgetHost {
    /// Create a new, empty blueprint at an asset path. `None` means the host
    /// refused (for instance because the path is already taken).
    fn create_blueprint(&mut self, asset_path: &str) -> Option<BlueprintId>;

    /// Look up an existing blueprint by asset path.
    fn find_blueprint(&self, asset_path: &str) -> Option<BlueprintId>;

    /// Instantiate a widget inside a blueprint's tree under the given name,
    /// returning the new widget handle.
    fn construct_widget(
        &mut self,
        blueprint: BlueprintId,
        kind: WidgetKind,
        name: &str,
    ) -> Option<WidgetId>;

    /// Attach `child` under `parent` with the given slot.
    fn attach_child(&mut self, blueprint: BlueprintId, parent: WidgetId, child: WidgetId, slot: Slot);

    /// Designate a widget as the root of a blueprint's tree. Overwrites any
    /// prior root.
    fn set_root_widget(&mut self, blueprint: BlueprintId, widget: WidgetId);

    /// Attach an interface to a blueprint's implemented-interface list. The
    /// list is replaced with the single entry, not extended.
    fn apply_interface(&mut self, blueprint: BlueprintId, interface: InterfaceClass) -> bool;

    /// Compile the blueprint and persist it. Failures surface through the
    /// returned result untranslated.
    fn compile_and_save(&mut self, blueprint: BlueprintId) -> Result<()>;

    /// Read back the class generated by compiling a blueprint.
    fn generated_class(&self, blueprint: BlueprintId) -> Option<GeneratedClass>;
}

/// In-process host: blueprints live in memory and compile-and-save writes
/// each one as a YAML document under an output root, with the virtual
/// `/Game/...` asset path mapped below it.
#[derive(Debug, Default)]
pub struct MemoryHost {
    blueprints: Vec<WidgetBlueprint>,
    output_root: Option<PathBuf>,
}

impl MemoryHost {
    pub fn new() -> Self {
        Self::default()
    }

    /// A host that persists compiled blueprints under `root`.
    pub fn with_output(root: PathBuf) -> Self {
        Self {
            blueprints: Vec::new(),
            output_root: Some(root),
        }
    }

    pub fn blueprint(&self, id: BlueprintId) -> Option<&WidgetBlueprint> {
        self.blueprints.get(id.0)
    }

    pub fn blueprints(&self) -> &[WidgetBlueprint] {
        &self.blueprints
    }

    /// File a compiled blueprint is saved to.
    fn save_path(&self, asset_path: &str) -> Option<PathBuf> {
        let root = self.output_root.as_ref()?;
        let relative = asset_path.trim_start_matches('/');
        Some(root.join(relative).with_extension("yaml"))
    }
}

impl WidgetHost for MemoryHost {
    fn create_blueprint(&mut self, asset_path: &str) -> Option<BlueprintId> {
        if self.find_blueprint(asset_path).is_some() {
            return None;
        }
        let id = BlueprintId(self.blueprints.len());
        self.blueprints.push(WidgetBlueprint::new(asset_path));
        Some(id)
    }

    fn find_blueprint(&self, asset_path: &str) -> Option<BlueprintId> {
        self.blueprints
            .iter()
            .position(|bp| bp.asset_path == asset_path)
            .map(BlueprintId)
    }

    fn construct_widget(
        &mut self,
        blueprint: BlueprintId,
        kind: WidgetKind,
        name: &str,
    ) -> Option<WidgetId> {
        let bp = self.blueprints.get_mut(blueprint.0)?;
        Some(bp.tree.add(kind, name))
    }

    fn attach_child(
        &mut self,
        blueprint: BlueprintId,
        parent: WidgetId,
        child: WidgetId,
        slot: Slot,
    ) {
        if let Some(bp) = self.blueprints.get_mut(blueprint.0) {
            bp.tree.attach(parent, child, slot);
        }
    }

    fn set_root_widget(&mut self, blueprint: BlueprintId, widget: WidgetId) {
        if let Some(bp) = self.blueprints.get_mut(blueprint.0) {
            bp.tree.root = Some(widget);
        }
    }

    fn apply_interface(&mut self, blueprint: BlueprintId, interface: InterfaceClass) -> bool {
        let Some(bp) = self.blueprints.get_mut(blueprint.0) else {
            return false;
        };
        bp.interfaces = vec![interface];
        true
    }

    fn compile_and_save(&mut self, blueprint: BlueprintId) -> Result<()> {
        let Some(bp) = self.blueprints.get_mut(blueprint.0) else {
            return Ok(());
        };

        let base = bp.base_name().to_string();
        bp.generated_class = Some(GeneratedClass(format!("{}.{}_C", bp.asset_path, base)));

        let document = serde_yaml::to_string(bp).map_err(|e| PsduiError::Build {
            message: format!("Failed to serialize blueprint {}: {}", bp.asset_path, e),
            help: None,
        })?;
        let asset_path = bp.asset_path.clone();

        if let Some(path) = self.save_path(&asset_path) {
            if let Some(parent) = path.parent() {
                std::fs::create_dir_all(parent).map_err(|e| PsduiError::Io {
                    path: parent.to_path_buf(),
                    message: format!("Failed to create output directory: {}", e),
                })?;
            }
            std::fs::write(&path, document).map_err(|e| PsduiError::Io {
                path,
                message: format!("Failed to save blueprint: {}", e),
            })?;
        }

        Ok(())
    }

    fn generated_class(&self, blueprint: BlueprintId) -> Option<GeneratedClass> {
        self.blueprints
            .get(blueprint.0)
            .and_then(|bp| bp.generated_class.clone())
    }
}
