//! Remove command implementation.
//!
//! Runs the configured background remover once and writes its result as
//! PNG, without any brush editing.

use std::fs;
use std::io::Cursor;
use std::path::{Path, PathBuf};

use clap::Args;
use image::ImageFormat;

use crate::config::Config;
use crate::error::{CutoutError, Result};
use crate::output::{display_path, Printer};
use crate::workspace::{decode_image, BackgroundRemover, CommandRemover};

use super::edit::write_export;

/// Run only the background remover and write the result
#[derive(Args, Debug)]
pub struct RemoveArgs {
    /// Image to process
    #[arg(required = true)]
    pub input: PathBuf,

    /// Output file (default: <output dir>/<input stem>-nobg.png)
    #[arg(long, short)]
    pub output: Option<PathBuf>,

    /// Configuration file (default: ./cutout.yaml when present)
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Remover program, overriding the configured one
    #[arg(long)]
    pub command: Option<String>,

    /// Argument for --command (repeatable)
    #[arg(long = "arg", value_name = "ARG", allow_hyphen_values = true, requires = "command")]
    pub args: Vec<String>,
}

pub fn run(args: RemoveArgs, printer: &Printer) -> Result<()> {
    let config = Config::discover(args.config.as_deref(), Path::new("."))?;

    let remover = match (&args.command, config.remover) {
        (Some(command), _) => CommandRemover::new(command.as_str(), args.args.iter().cloned()),
        (None, Some(remover)) => remover,
        (None, None) => {
            return Err(CutoutError::InvalidArgument {
                message: "No background remover configured".to_string(),
                help: Some("Add a `remover:` section to cutout.yaml or pass --command".to_string()),
            })
        }
    };

    let bytes = fs::read(&args.input).map_err(|e| CutoutError::Io {
        path: args.input.clone(),
        message: format!("Failed to read image: {}", e),
    })?;
    decode_image(&bytes)?;

    printer.status("Removing", &format!("background from {}", display_path(&args.input)));
    let processed = remover.remove_background(&bytes)?;
    let image = decode_image(&processed).map_err(|e| CutoutError::Upstream {
        message: format!("Remover returned an unreadable image: {}", e),
        help: None,
    })?;

    let mut png = Vec::new();
    image
        .write_to(&mut Cursor::new(&mut png), ImageFormat::Png)
        .map_err(|e| CutoutError::Encode {
            message: format!("Failed to encode PNG: {}", e),
        })?;

    let output = args
        .output
        .unwrap_or_else(|| config.output.join(default_name(&args.input)));
    write_export(&png, &output)?;
    printer.status("Wrote", &printer.cyan(&display_path(&output)));

    Ok(())
}

fn default_name(input: &Path) -> String {
    let stem = input
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("image");
    format!("{}-nobg.png", stem)
}
