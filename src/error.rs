use miette::Diagnostic;
use thiserror::Error;

/// Main error type for cutout operations
#[derive(Error, Diagnostic, Debug)]
pub enum CutoutError {
    #[error("IO error with {path}: {message}")]
    #[diagnostic(code(cutout::io))]
    Io {
        path: std::path::PathBuf,
        message: String,
    },

    #[error("Invalid input: {message}")]
    #[diagnostic(code(cutout::input))]
    InvalidInput {
        message: String,
        #[help]
        help: Option<String>,
    },

    #[error("Invalid argument: {message}")]
    #[diagnostic(code(cutout::argument))]
    InvalidArgument {
        message: String,
        #[help]
        help: Option<String>,
    },

    #[error("Background removal failed: {message}")]
    #[diagnostic(code(cutout::upstream))]
    Upstream {
        message: String,
        #[help]
        help: Option<String>,
    },

    #[error("Parse error: {message}")]
    #[diagnostic(code(cutout::parse))]
    Parse {
        message: String,
        #[help]
        help: Option<String>,
    },

    #[error("Encode error: {message}")]
    #[diagnostic(code(cutout::encode))]
    Encode { message: String },
}

impl CutoutError {
    /// Shorthand for an `InvalidArgument` without help text.
    pub fn argument(message: impl Into<String>) -> Self {
        Self::InvalidArgument {
            message: message.into(),
            help: None,
        }
    }

    /// Shorthand for an `InvalidInput` without help text.
    pub fn input(message: impl Into<String>) -> Self {
        Self::InvalidInput {
            message: message.into(),
            help: None,
        }
    }
}

pub type Result<T> = std::result::Result<T, CutoutError>;
