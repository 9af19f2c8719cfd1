//! Edit command implementation.
//!
//! Uploads an image into a workspace, runs the background remover, replays
//! a stroke script and exports the canvas as PNG.

use std::fs;
use std::path::{Path, PathBuf};

use clap::Args;

use crate::config::Config;
use crate::error::{CutoutError, Result};
use crate::output::{display_path, plural, Printer};
use crate::script::Script;
use crate::types::BrushMode;
use crate::workspace::{PassthroughRemover, Workspace};

/// Remove the background, replay brush strokes and export a PNG
#[derive(Args, Debug)]
pub struct EditArgs {
    /// Image to edit
    #[arg(required = true)]
    pub input: PathBuf,

    /// Stroke script to replay (YAML, or JSON with a .json extension)
    #[arg(long, short)]
    pub script: Option<PathBuf>,

    /// Configuration file (default: ./cutout.yaml when present)
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Output directory
    #[arg(long, short)]
    pub output: Option<PathBuf>,

    /// Export file name
    #[arg(long)]
    pub name: Option<String>,

    /// Edit the upload as-is instead of running the remover
    #[arg(long)]
    pub skip_removal: bool,

    /// Start in manual mode, editing the original upload
    #[arg(long)]
    pub manual: bool,

    /// Longest canvas edge; larger images are scaled down
    #[arg(long)]
    pub max_dimension: Option<u32>,

    /// Undo depth, counting the loaded image
    #[arg(long)]
    pub max_history: Option<usize>,

    /// Initial brush diameter in canvas pixels
    #[arg(long)]
    pub brush_size: Option<f32>,

    /// Initial brush mode (erase or restore)
    #[arg(long)]
    pub mode: Option<BrushMode>,
}

pub fn run(args: EditArgs, printer: &Printer) -> Result<()> {
    let config = resolve_config(&args)?;

    let bytes = fs::read(&args.input).map_err(|e| CutoutError::Io {
        path: args.input.clone(),
        message: format!("Failed to read image: {}", e),
    })?;

    let options = config.workspace_options();
    let mut workspace = match (&config.remover, args.skip_removal) {
        (Some(remover), false) => {
            printer.status("Removing", &format!("background from {}", display_path(&args.input)));
            Workspace::new(remover.clone(), options)?
        }
        (None, false) => {
            printer.warning("Warning", "no remover configured; editing the image as-is");
            Workspace::new(PassthroughRemover, options)?
        }
        (_, true) => Workspace::new(PassthroughRemover, options)?,
    };

    if let Err(e) = workspace.upload(bytes) {
        printer.error("Failed", &format!("{} is back at the {} stage", display_path(&args.input), workspace.stage()));
        return Err(e);
    }

    if args.manual {
        workspace.set_manual(true)?;
    }

    if let Some((w, h)) = workspace.editor().dimensions() {
        printer.info("Loaded", &format!("{}x{} canvas", w, h));
    }

    if let Some(script_path) = &args.script {
        let script = Script::load(script_path)?;
        let summary = script.replay(&mut workspace)?;
        printer.status(
            "Replayed",
            &format!(
                "{}, {}, {} from {}",
                plural(summary.strokes, "stroke", "strokes"),
                plural(summary.undos, "undo", "undos"),
                plural(summary.redos, "redo", "redos"),
                display_path(script_path)
            ),
        );
    }

    let export_path = config.export_path();
    write_export(&workspace.export_png()?, &export_path)?;
    printer.status("Exported", &printer.cyan(&display_path(&export_path)));

    Ok(())
}

/// Merge the config file with command-line overrides.
fn resolve_config(args: &EditArgs) -> Result<Config> {
    let mut config = Config::discover(args.config.as_deref(), Path::new("."))?;

    if let Some(output) = &args.output {
        config.output = output.clone();
    }
    if let Some(name) = &args.name {
        config.export_name = name.clone();
    }
    if let Some(max_dimension) = args.max_dimension {
        config.max_dimension = max_dimension;
    }
    if let Some(max_history) = args.max_history {
        config.max_history = max_history;
    }
    if let Some(brush_size) = args.brush_size {
        config.brush_size = brush_size;
    }
    if let Some(mode) = args.mode {
        config.mode = mode;
    }

    config.validate()?;
    Ok(config)
}

/// Write PNG bytes, creating the parent directory if needed.
pub(crate) fn write_export(png: &[u8], path: &Path) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(|e| CutoutError::Io {
            path: parent.to_path_buf(),
            message: format!("Failed to create output directory: {}", e),
        })?;
    }

    fs::write(path, png).map_err(|e| CutoutError::Io {
        path: path.to_path_buf(),
        message: format!("Failed to write PNG: {}", e),
    })
}
