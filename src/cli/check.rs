//! Check command implementation.
//!
//! Validates layer documents against the active settings without building
//! anything.

use std::path::PathBuf;

use clap::Args;

use crate::document::load_document;
use crate::error::{PsduiError, Result};
use crate::output::{display_path, plural, Printer};
use crate::settings::Settings;
use crate::validation::validate_document;

/// Validate layer documents without building anything
#[derive(Args, Debug)]
pub struct CheckArgs {
    /// Layer documents to validate
    #[arg(required = true)]
    pub files: Vec<PathBuf>,
}

pub fn run(args: CheckArgs, settings: &Settings, printer: &Printer) -> Result<()> {
    let mut errors = 0;
    let mut warnings = 0;

    for file in &args.files {
        printer.status("Checking", &display_path(file));
        let document = load_document(file)?;
        let result = validate_document(&document, settings);

        for diagnostic in result.iter() {
            let is_error = diagnostic.severity == crate::validation::Severity::Error;
            eprintln!(
                "{}: {} [{}]",
                printer.severity(&diagnostic.severity.to_string(), is_error),
                diagnostic.message,
                diagnostic.code
            );
            if let Some(help) = &diagnostic.help {
                eprintln!("  help: {}", help);
            }
        }

        errors += result.error_count();
        warnings += result.warning_count();
    }

    if errors > 0 {
        return Err(PsduiError::Build {
            message: format!(
                "Validation failed with {} and {}",
                plural(errors, "error", "errors"),
                plural(warnings, "warning", "warnings")
            ),
            help: None,
        });
    }

    printer.success(
        "Checked",
        &format!(
            "{} ({})",
            plural(args.files.len(), "document", "documents"),
            plural(warnings, "warning", "warnings")
        ),
    );

    Ok(())
}
