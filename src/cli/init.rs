//! Init command implementation.
//!
//! Writes a starter `psdui.yaml` with the default settings spelled out.

use std::fs;
use std::path::PathBuf;

use clap::Args;

use crate::error::{PsduiError, Result};
use crate::output::Printer;
use crate::settings::{Settings, SETTINGS_FILENAME};

/// Initialize a psdui project by generating a psdui.yaml settings file
#[derive(Args, Debug)]
pub struct InitArgs {
    /// Directory to initialize (default: current directory)
    #[arg(default_value = ".")]
    pub path: PathBuf,

    /// Overwrite existing psdui.yaml
    #[arg(long)]
    pub force: bool,
}

pub fn run(args: InitArgs, printer: &Printer) -> Result<()> {
    let settings_path = args.path.join(SETTINGS_FILENAME);

    if settings_path.exists() && !args.force {
        return Err(PsduiError::Build {
            message: format!("{} already exists", SETTINGS_FILENAME),
            help: Some("Use --force to overwrite".to_string()),
        });
    }

    let defaults = Settings::default();

    // Build YAML manually for clean formatting
    let mut yaml = String::new();
    yaml.push_str(&format!("enabled: {}\n", defaults.enabled));
    yaml.push_str(&format!(
        "texture_src_dir: {}\n",
        defaults.texture_src_dir.display()
    ));
    yaml.push_str(&format!(
        "texture_asset_dir: {}\n",
        defaults.texture_asset_dir
    ));
    yaml.push_str(&format!("script: {}\n", defaults.script));
    yaml.push_str(&format!("output: {}\n", defaults.output.display()));
    yaml.push_str("font_map: {}\n");

    fs::write(&settings_path, &yaml).map_err(|e| PsduiError::Io {
        path: settings_path.clone(),
        message: format!("Failed to write settings: {}", e),
    })?;

    printer.success("Created", SETTINGS_FILENAME);

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_init_creates_settings() {
        let dir = tempdir().unwrap();

        let args = InitArgs {
            path: dir.path().to_path_buf(),
            force: false,
        };
        run(args, &Printer::new()).unwrap();

        let settings_path = dir.path().join("psdui.yaml");
        assert!(settings_path.exists());

        // the generated file parses back to the defaults
        let settings = Settings::load(&settings_path).unwrap();
        assert!(settings.enabled);
        assert_eq!(settings.texture_asset_dir, "/Game/Widgets/Texture");
        assert_eq!(settings.script, "psdui generate");
    }

    #[test]
    fn test_init_errors_if_settings_exist() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("psdui.yaml"), "enabled: false").unwrap();

        let args = InitArgs {
            path: dir.path().to_path_buf(),
            force: false,
        };
        assert!(run(args, &Printer::new()).is_err());
    }

    #[test]
    fn test_init_force_overwrites() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("psdui.yaml"), "enabled: false").unwrap();

        let args = InitArgs {
            path: dir.path().to_path_buf(),
            force: true,
        };
        run(args, &Printer::new()).unwrap();

        let settings = Settings::load(&dir.path().join("psdui.yaml")).unwrap();
        assert!(settings.enabled);
    }
}
