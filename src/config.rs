//! Project configuration (cutout.yaml).
//!
//! Every field is optional; missing values fall back to the editor defaults.
//! Command-line flags override whatever the file says.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::editor::{DEFAULT_BRUSH_SIZE, DEFAULT_MAX_DIMENSION, DEFAULT_MAX_HISTORY};
use crate::error::{CutoutError, Result};
use crate::types::BrushMode;
use crate::workspace::{CommandRemover, WorkspaceOptions};

/// The name of the configuration file.
pub const CONFIG_FILENAME: &str = "cutout.yaml";

/// Default file name for exported images.
pub const DEFAULT_EXPORT_NAME: &str = "cutout-edited.png";

/// Configuration loaded from cutout.yaml.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Longest edge of the editing canvas.
    pub max_dimension: u32,

    /// Undo depth, counting the loaded image.
    pub max_history: usize,

    /// Initial brush diameter in canvas pixels.
    pub brush_size: f32,

    /// Initial brush mode.
    pub mode: BrushMode,

    /// Output directory for exports.
    #[serde(default = "default_output")]
    pub output: PathBuf,

    /// File name used for exports.
    #[serde(default = "default_export_name")]
    pub export_name: String,

    /// External background remover. Without one, uploads are edited as-is.
    pub remover: Option<CommandRemover>,
}

fn default_output() -> PathBuf {
    PathBuf::from("dist")
}

fn default_export_name() -> String {
    DEFAULT_EXPORT_NAME.to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            max_dimension: DEFAULT_MAX_DIMENSION,
            max_history: DEFAULT_MAX_HISTORY,
            brush_size: DEFAULT_BRUSH_SIZE,
            mode: BrushMode::default(),
            output: default_output(),
            export_name: default_export_name(),
            remover: None,
        }
    }
}

impl Config {
    /// Load configuration from a cutout.yaml file.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| CutoutError::Io {
            path: path.to_path_buf(),
            message: format!("Failed to read config: {}", e),
        })?;

        Self::parse(&content)
    }

    /// Parse configuration from a YAML string.
    pub fn parse(content: &str) -> Result<Self> {
        if content.trim().is_empty() {
            return Ok(Self::default());
        }

        let config: Self = serde_yaml::from_str(content).map_err(|e| CutoutError::Parse {
            message: format!("Invalid config: {}", e),
            help: Some(format!("Check {} syntax", CONFIG_FILENAME)),
        })?;
        config.validate()?;

        Ok(config)
    }

    /// Load an explicit config file, else `cutout.yaml` in `dir` if present,
    /// else the defaults.
    pub fn discover(explicit: Option<&Path>, dir: &Path) -> Result<Self> {
        if let Some(path) = explicit {
            return Self::load(path);
        }

        let candidate = dir.join(CONFIG_FILENAME);
        if candidate.is_file() {
            log::info!("Using {}", candidate.display());
            return Self::load(&candidate);
        }

        Ok(Self::default())
    }

    /// Reject values the editor would refuse.
    pub fn validate(&self) -> Result<()> {
        if self.max_dimension == 0 {
            return Err(CutoutError::argument("max_dimension must be at least 1"));
        }
        if self.max_history == 0 {
            return Err(CutoutError::argument("max_history must be at least 1"));
        }
        if !(self.brush_size > 0.0 && self.brush_size.is_finite()) {
            return Err(CutoutError::argument(format!(
                "brush_size must be a positive number, got {}",
                self.brush_size
            )));
        }
        if self.export_name.trim().is_empty() {
            return Err(CutoutError::argument("export_name must not be empty"));
        }
        Ok(())
    }

    /// Editor settings for a new workspace.
    pub fn workspace_options(&self) -> WorkspaceOptions {
        WorkspaceOptions {
            max_dimension: self.max_dimension,
            max_history: self.max_history,
            brush_size: self.brush_size,
            mode: self.mode,
        }
    }

    /// Full path of the export file.
    pub fn export_path(&self) -> PathBuf {
        self.output.join(&self.export_name)
    }
}
