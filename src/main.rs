use clap::Parser;
use miette::Result;
use psdui::cli::{Cli, Commands};
use psdui::output::Printer;
use psdui::settings::Settings;

fn main() -> Result<()> {
    let cli = Cli::parse();
    let settings = Settings::load_or_default(cli.config.as_deref())?;
    let printer = Printer::new();

    match cli.command {
        Commands::Watch(args) => psdui::cli::watch::run(args, &settings, &printer)?,
        Commands::Reimport(args) => psdui::cli::reimport::run(args, &settings, &printer)?,
        Commands::Generate(args) => psdui::cli::generate::run(args, &settings, &printer)?,
        Commands::Check(args) => psdui::cli::check::run(args, &settings, &printer)?,
        Commands::Init(args) => psdui::cli::init::run(args, &printer)?,
        Commands::Completions(args) => psdui::cli::completions::run(args)?,
    }

    Ok(())
}
