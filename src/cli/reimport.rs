//! Reimport command implementation.
//!
//! Feeds a single hand-built re-import event through the listener, exactly as
//! the watcher would. Useful for wiring psdui into an editor's own import
//! hooks or for poking at the filters.

use clap::Args;

use crate::error::Result;
use crate::event::{AssetKind, ReimportEvent};
use crate::listener::ImportListener;
use crate::output::Printer;
use crate::runner::{EchoRunner, ProcessRunner, ScriptRunner};
use crate::settings::Settings;

/// Simulate a single asset re-import event
#[derive(Args, Debug)]
pub struct ReimportArgs {
    /// Virtual asset path of the reimported object, e.g. /Game/Widgets/Texture/Icon.Icon
    pub asset_path: String,

    /// Source files recorded in the asset's import metadata, in order
    #[arg(long = "source", required = true)]
    pub sources: Vec<String>,

    /// Kind of the reimported asset
    #[arg(long, value_enum, default_value = "texture2d")]
    pub kind: AssetKind,

    /// Print the generator command instead of spawning it
    #[arg(long)]
    pub dry_run: bool,
}

pub fn run(args: ReimportArgs, settings: &Settings, printer: &Printer) -> Result<()> {
    let event = ReimportEvent {
        asset_path: args.asset_path,
        kind: args.kind,
        source_files: args.sources,
    };

    let dispatched = if args.dry_run {
        handle(&event, settings, EchoRunner)
    } else {
        handle(&event, settings, ProcessRunner)
    };

    match dispatched {
        Some(command) => printer.status("Dispatched", &command),
        None => printer.info("Ignored", "event did not match the PSD texture filters"),
    }

    Ok(())
}

fn handle<R: ScriptRunner>(event: &ReimportEvent, settings: &Settings, runner: R) -> Option<String> {
    ImportListener::new(settings, runner).on_reimport(event)
}
