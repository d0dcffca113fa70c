//! psdui - PSD to widget blueprint pipeline
//!
//! A library and CLI for regenerating UI widget blueprints from layered PSD
//! artwork: a watcher turns texture re-imports into generator dispatches, and
//! the generator turns exported layer documents into compiled widget
//! blueprints.

pub mod blueprint;
pub mod cli;
pub mod document;
pub mod error;
pub mod event;
pub mod listener;
pub mod output;
pub mod runner;
pub mod settings;
pub mod validation;

pub use blueprint::{
    BlueprintBuilder, BlueprintId, BuildReport, ButtonStyle, Color, GeneratedClass, InterfaceClass,
    MemoryHost, Shadow, Slot, Stroke, TextAlign, Widget, WidgetBlueprint, WidgetHost, WidgetId,
    WidgetKind, WidgetTree,
};
pub use document::{load_document, parse_document, LayerKind, LayerNode};
pub use error::{PsduiError, Result};
pub use event::{AssetKind, ReimportEvent};
pub use listener::{derive_blueprint_path, ImportListener, BLUEPRINT_PREFIX, LAYERED_SOURCE_EXT};
pub use runner::{EchoRunner, ProcessRunner, RecordingRunner, ScriptRunner};
pub use settings::{Settings, SETTINGS_FILENAME};
pub use validation::{validate_document, Diagnostic, Severity, ValidationResult};
