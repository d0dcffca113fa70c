//! Watch command implementation.
//!
//! Watches the layered artwork directory and treats every created or
//! modified file as a texture re-import; the listener filters the noise down
//! to PSD-backed textures and dispatches the generator.

use std::path::{Path, PathBuf};
use std::sync::mpsc;

use clap::Args;
use notify::{EventKind, RecursiveMode, Watcher};
use walkdir::WalkDir;

use crate::error::{PsduiError, Result};
use crate::event::ReimportEvent;
use crate::listener::ImportListener;
use crate::output::{display_path, Printer};
use crate::runner::{EchoRunner, ProcessRunner, ScriptRunner};
use crate::settings::Settings;

/// Watch the texture source directory and dispatch the generator on PSD changes
#[derive(Args, Debug)]
pub struct WatchArgs {
    /// Directory to watch (default: the configured texture source directory)
    #[arg(long)]
    pub dir: Option<PathBuf>,

    /// Dispatch once for every layered source already on disk before watching
    #[arg(long)]
    pub full: bool,

    /// Print generator commands to stdout instead of spawning them
    #[arg(long)]
    pub dry_run: bool,
}

pub fn run(args: WatchArgs, settings: &Settings, printer: &Printer) -> Result<()> {
    let dir = args
        .dir
        .clone()
        .unwrap_or_else(|| settings.texture_src_dir.clone());

    if !dir.is_dir() {
        return Err(PsduiError::Build {
            message: format!("Watch directory does not exist: {}", dir.display()),
            help: Some("Set texture_src_dir in psdui.yaml or pass --dir".to_string()),
        });
    }

    if !settings.enabled {
        printer.warning("Disabled", "psdui is disabled; events will be ignored");
    }

    if args.dry_run {
        watch_loop(&dir, args.full, settings, EchoRunner, printer)
    } else {
        watch_loop(&dir, args.full, settings, ProcessRunner, printer)
    }
}

fn watch_loop<R: ScriptRunner>(
    dir: &Path,
    full: bool,
    settings: &Settings,
    runner: R,
    printer: &Printer,
) -> Result<()> {
    let mut listener = ImportListener::new(settings, runner);

    if full {
        for entry in WalkDir::new(dir)
            .into_iter()
            .filter_map(|e| e.ok())
            .filter(|e| e.file_type().is_file())
        {
            dispatch(&mut listener, entry.path(), settings, printer);
        }
    }

    let (tx, rx) = mpsc::channel();
    let mut watcher = notify::recommended_watcher(tx).map_err(watch_error)?;
    watcher
        .watch(dir, RecursiveMode::Recursive)
        .map_err(watch_error)?;

    printer.status("Watching", &display_path(dir));

    for result in rx {
        match result {
            Ok(event) if matches!(event.kind, EventKind::Create(_) | EventKind::Modify(_)) => {
                for path in &event.paths {
                    dispatch(&mut listener, path, settings, printer);
                }
            }
            Ok(_) => {}
            Err(e) => printer.warning("Watch", &e.to_string()),
        }
    }

    Ok(())
}

fn dispatch<R: ScriptRunner>(
    listener: &mut ImportListener<'_, R>,
    path: &Path,
    settings: &Settings,
    printer: &Printer,
) {
    let event = ReimportEvent::from_source_file(path, &settings.texture_asset_dir);
    if let Some(command) = listener.on_reimport(&event) {
        printer.status("Dispatching", &command);
    }
}

fn watch_error(e: notify::Error) -> PsduiError {
    PsduiError::Watch {
        message: e.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::runner::RecordingRunner;

    #[test]
    fn test_run_rejects_missing_directory() {
        let args = WatchArgs {
            dir: Some(PathBuf::from("/nonexistent/psdui-watch-dir")),
            full: false,
            dry_run: true,
        };

        let result = run(args, &Settings::default(), &Printer::new());
        assert!(result.is_err());
    }

    #[test]
    fn test_dispatch_filters_through_listener() {
        let settings = Settings::default();
        let printer = Printer::new();
        let mut listener = ImportListener::new(&settings, RecordingRunner::default());

        dispatch(&mut listener, Path::new("Art/UI/Icon.psd"), &settings, &printer);
        dispatch(&mut listener, Path::new("Art/UI/Icon.png"), &settings, &printer);
        dispatch(&mut listener, Path::new("Art/UI/notes.txt"), &settings, &printer);

        // only the PSD made it through
        let commands = listener.into_runner().commands;
        assert_eq!(
            commands,
            vec!["psdui generate -i Art/UI/Icon.psd -o /Game/Widgets/Texture/WBP_Icon"]
        );
    }
}
