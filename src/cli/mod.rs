pub mod check;
pub mod completions;
pub mod generate;
pub mod init;
pub mod reimport;
pub mod watch;

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// psdui - PSD to widget blueprint pipeline
#[derive(Parser, Debug)]
#[command(name = "psdui")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Settings file (default: psdui.yaml in the working directory)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Watch the texture source directory and dispatch the generator on PSD changes
    Watch(watch::WatchArgs),

    /// Simulate a single asset re-import event
    Reimport(reimport::ReimportArgs),

    /// Build widget blueprints from an exported layer document
    Generate(generate::GenerateArgs),

    /// Validate layer documents without building anything
    Check(check::CheckArgs),

    /// Initialize a psdui project (generates psdui.yaml)
    Init(init::InitArgs),

    /// Generate shell completions
    Completions(completions::CompletionsArgs),
}
