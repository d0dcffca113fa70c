//! Re-import listener.
//!
//! Filters re-import events down to UI textures whose original source is a
//! layered PSD file, derives the destination blueprint path from the texture
//! asset path, and dispatches the generator command. Every rejected event is
//! a silent no-op.

use crate::event::{AssetKind, ReimportEvent};
use crate::runner::ScriptRunner;
use crate::settings::Settings;

/// Extension a source file must carry to count as layered artwork.
/// Matched case-sensitively against the recorded source filename.
pub const LAYERED_SOURCE_EXT: &str = ".psd";

/// Prefix for generated widget blueprint asset names.
pub const BLUEPRINT_PREFIX: &str = "WBP_";

/// Listens for asset re-imports and triggers blueprint regeneration.
pub struct ImportListener<'a, R: ScriptRunner> {
    settings: &'a Settings,
    runner: R,
}

impl<'a, R: ScriptRunner> ImportListener<'a, R> {
    pub fn new(settings: &'a Settings, runner: R) -> Self {
        Self { settings, runner }
    }

    /// Handle one re-import notification. Dispatches the generator command
    /// when the event passes every filter and returns the command that was
    /// issued; returns `None` (and does nothing) otherwise.
    pub fn on_reimport(&mut self, event: &ReimportEvent) -> Option<String> {
        let command = self.plan(event)?;
        self.runner.run(&command);
        Some(command)
    }

    /// Take the runner back out of the listener.
    pub fn into_runner(self) -> R {
        self.runner
    }

    /// Compute the generator command for an event without dispatching it.
    pub fn plan(&self, event: &ReimportEvent) -> Option<String> {
        if !self.settings.enabled {
            return None;
        }
        if event.kind != AssetKind::Texture2D {
            return None;
        }
        let source = event.source_files.first()?;
        if !source.ends_with(LAYERED_SOURCE_EXT) {
            return None;
        }

        let destination = derive_blueprint_path(&event.asset_path);
        Some(format!(
            "{} -i {} -o {}",
            self.settings.script, source, destination
        ))
    }
}

/// Derive the widget blueprint asset path for a texture asset path: strip the
/// trailing `.Type` object suffix, keep the containing directory, and prefix
/// the base name with [`BLUEPRINT_PREFIX`].
///
/// `/Game/Widgets/Texture/Icon.Icon` → `/Game/Widgets/Texture/WBP_Icon`
pub fn derive_blueprint_path(texture_path: &str) -> String {
    let trimmed = match texture_path.rfind('.') {
        Some(index) => &texture_path[..index],
        None => texture_path,
    };

    match trimmed.rfind('/') {
        Some(index) => format!(
            "{}/{}{}",
            &trimmed[..index],
            BLUEPRINT_PREFIX,
            &trimmed[index + 1..]
        ),
        None => format!("{BLUEPRINT_PREFIX}{trimmed}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::runner::RecordingRunner;
    use pretty_assertions::assert_eq;

    fn texture_event() -> ReimportEvent {
        ReimportEvent {
            asset_path: "/Game/Widgets/Texture/Icon.Icon".to_string(),
            kind: AssetKind::Texture2D,
            source_files: vec!["C:/Art/UI/Texture/Icon.psd".to_string()],
        }
    }

    fn dispatched(settings: &Settings, event: &ReimportEvent) -> Vec<String> {
        let mut listener = ImportListener::new(settings, RecordingRunner::default());
        listener.on_reimport(event);
        listener.runner.commands
    }

    #[test]
    fn test_disabled_settings_dispatch_nothing() {
        let settings = Settings {
            enabled: false,
            ..Default::default()
        };

        assert!(dispatched(&settings, &texture_event()).is_empty());
    }

    #[test]
    fn test_non_texture_asset_dispatches_nothing() {
        let settings = Settings::default();
        let event = ReimportEvent {
            kind: AssetKind::Sound,
            ..texture_event()
        };

        assert!(dispatched(&settings, &event).is_empty());
    }

    #[test]
    fn test_no_source_files_dispatches_nothing() {
        let settings = Settings::default();
        let event = ReimportEvent {
            source_files: vec![],
            ..texture_event()
        };

        assert!(dispatched(&settings, &event).is_empty());
    }

    #[test]
    fn test_non_psd_source_dispatches_nothing() {
        let settings = Settings::default();
        let event = ReimportEvent {
            source_files: vec!["C:/Art/UI/Texture/Icon.png".to_string()],
            ..texture_event()
        };

        assert!(dispatched(&settings, &event).is_empty());
    }

    #[test]
    fn test_extension_match_is_case_sensitive() {
        let settings = Settings::default();
        let event = ReimportEvent {
            source_files: vec!["C:/Art/UI/Texture/Icon.PSD".to_string()],
            ..texture_event()
        };

        assert!(dispatched(&settings, &event).is_empty());
    }

    #[test]
    fn test_only_first_source_file_is_considered() {
        let settings = Settings::default();
        let event = ReimportEvent {
            source_files: vec![
                "C:/Art/UI/Texture/Icon.png".to_string(),
                "C:/Art/UI/Texture/Icon.psd".to_string(),
            ],
            ..texture_event()
        };

        assert!(dispatched(&settings, &event).is_empty());
    }

    #[test]
    fn test_matching_event_dispatches_exact_command() {
        let settings = Settings {
            script: "psdui generate".to_string(),
            ..Default::default()
        };

        let commands = dispatched(&settings, &texture_event());
        assert_eq!(
            commands,
            vec![
                "psdui generate -i C:/Art/UI/Texture/Icon.psd -o /Game/Widgets/Texture/WBP_Icon"
            ]
        );
    }

    #[test]
    fn test_on_reimport_returns_dispatched_command() {
        let settings = Settings::default();
        let mut listener = ImportListener::new(&settings, RecordingRunner::default());

        let command = listener.on_reimport(&texture_event());
        assert_eq!(
            command.as_deref(),
            Some("psdui generate -i C:/Art/UI/Texture/Icon.psd -o /Game/Widgets/Texture/WBP_Icon")
        );
        assert_eq!(listener.runner.commands.len(), 1);
    }

    #[test]
    fn test_derive_blueprint_path() {
        assert_eq!(
            derive_blueprint_path("/Game/Widgets/Texture/Icon.Icon"),
            "/Game/Widgets/Texture/WBP_Icon"
        );
    }

    #[test]
    fn test_derive_blueprint_path_without_suffix() {
        assert_eq!(
            derive_blueprint_path("/Game/Widgets/Icon"),
            "/Game/Widgets/WBP_Icon"
        );
    }

    #[test]
    fn test_derive_blueprint_path_bare_name() {
        assert_eq!(derive_blueprint_path("Icon.Icon"), "WBP_Icon");
    }
}
