//! Brush paint modes.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{CutoutError, Result};

/// What a brush stroke does to the pixels it covers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BrushMode {
    /// Make covered pixels fully transparent.
    #[default]
    Erase,
    /// Paint covered pixels back from the source image.
    Restore,
}

impl BrushMode {
    /// Lowercase name used in config files, scripts and the CLI.
    pub fn as_str(self) -> &'static str {
        match self {
            BrushMode::Erase => "erase",
            BrushMode::Restore => "restore",
        }
    }
}

impl FromStr for BrushMode {
    type Err = CutoutError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim() {
            "erase" => Ok(BrushMode::Erase),
            "restore" => Ok(BrushMode::Restore),
            other => Err(CutoutError::InvalidArgument {
                message: format!("Unknown brush mode: {:?}", other),
                help: Some("Use 'erase' or 'restore'".to_string()),
            }),
        }
    }
}

impl fmt::Display for BrushMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
