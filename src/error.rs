use miette::Diagnostic;
use thiserror::Error;

/// Main error type for psdui operations
#[derive(Error, Diagnostic, Debug)]
pub enum PsduiError {
    #[error("IO error: {0}")]
    #[diagnostic(code(psdui::io))]
    IoError(#[from] std::io::Error),

    #[error("IO error with {path}: {message}")]
    #[diagnostic(code(psdui::io))]
    Io {
        path: std::path::PathBuf,
        message: String,
    },

    #[error("Parse error: {message}")]
    #[diagnostic(code(psdui::parse))]
    Parse {
        message: String,
        #[help]
        help: Option<String>,
    },

    #[error("Build error: {message}")]
    #[diagnostic(code(psdui::build))]
    Build {
        message: String,
        #[help]
        help: Option<String>,
    },

    #[error("Watch error: {message}")]
    #[diagnostic(code(psdui::watch))]
    Watch { message: String },
}

pub type Result<T> = std::result::Result<T, PsduiError>;
