//! Generate command implementation.
//!
//! The generator half of the pipeline: loads an exported layer document and
//! builds the destination widget blueprint (plus any list/tile entry
//! blueprints) through the in-process host. This is the command the watcher
//! dispatches by default.

use std::path::PathBuf;

use clap::Args;

use crate::blueprint::{BlueprintBuilder, MemoryHost};
use crate::document::load_document;
use crate::error::Result;
use crate::output::{plural, Printer};
use crate::settings::Settings;

/// Build widget blueprints from an exported layer document
#[derive(Args, Debug)]
pub struct GenerateArgs {
    /// Layer document, or a .psd whose exported sidecar document sits next to it
    #[arg(short = 'i', long = "input")]
    pub input: PathBuf,

    /// Destination blueprint asset path, e.g. /Game/Widgets/Texture/WBP_Icon
    #[arg(short = 'o', long = "output")]
    pub output: String,
}

pub fn run(args: GenerateArgs, settings: &Settings, printer: &Printer) -> Result<()> {
    let document = load_document(&args.input)?;

    let mut host = MemoryHost::with_output(settings.output.clone());
    let report = BlueprintBuilder::new(&mut host, settings).build(document, &args.output)?;

    for missing in &report.missing_images {
        printer.warning("Missing", missing);
    }
    for blueprint in &report.blueprints {
        printer.info("Compiled", blueprint);
    }
    printer.success(
        "Generated",
        &format!(
            "{} ({}) in {}",
            plural(report.blueprints.len(), "blueprint", "blueprints"),
            plural(report.widget_count, "widget", "widgets"),
            settings.output.display()
        ),
    );

    Ok(())
}
