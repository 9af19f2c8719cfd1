//! Init command implementation.
//!
//! Writes a commented `cutout.yaml` with the default editor settings.

use std::fs;
use std::path::PathBuf;

use clap::Args;

use crate::config::CONFIG_FILENAME;
use crate::editor::{DEFAULT_BRUSH_SIZE, DEFAULT_MAX_DIMENSION, DEFAULT_MAX_HISTORY};
use crate::error::{CutoutError, Result};
use crate::output::{display_path, Printer};

/// Write a cutout.yaml configuration file
#[derive(Args, Debug)]
pub struct InitArgs {
    /// Directory to write into (default: current directory)
    #[arg(default_value = ".")]
    pub path: PathBuf,

    /// Overwrite an existing cutout.yaml
    #[arg(long)]
    pub force: bool,

    /// Configure a remover that POSTs the image to this HTTP endpoint
    /// (multipart field `file`) using curl
    #[arg(long, value_name = "URL")]
    pub remover_url: Option<String>,
}

pub fn run(args: InitArgs, printer: &Printer) -> Result<()> {
    let config_path = args.path.join(CONFIG_FILENAME);

    if config_path.exists() && !args.force {
        return Err(CutoutError::InvalidArgument {
            message: format!("{} already exists", CONFIG_FILENAME),
            help: Some("Use --force to overwrite".to_string()),
        });
    }

    fs::write(&config_path, render_template(args.remover_url.as_deref())).map_err(|e| {
        CutoutError::Io {
            path: config_path.clone(),
            message: format!("Failed to write config: {}", e),
        }
    })?;

    printer.status("Created", &display_path(&config_path));
    if args.remover_url.is_none() {
        printer.info("Note", "no remover configured; uploads are edited as-is");
    }

    Ok(())
}

/// Build YAML by hand so the comments survive.
fn render_template(remover_url: Option<&str>) -> String {
    let mut yaml = String::new();

    yaml.push_str("# Longest canvas edge; larger images are scaled down.\n");
    yaml.push_str(&format!("max_dimension: {}\n\n", DEFAULT_MAX_DIMENSION));
    yaml.push_str("# Undo depth, counting the freshly loaded image.\n");
    yaml.push_str(&format!("max_history: {}\n\n", DEFAULT_MAX_HISTORY));
    yaml.push_str("# Starting brush: diameter in canvas pixels, erase or restore.\n");
    yaml.push_str(&format!("brush_size: {}\n", DEFAULT_BRUSH_SIZE));
    yaml.push_str("mode: erase\n\n");
    yaml.push_str("output: dist\n");
    yaml.push_str("export_name: cutout-edited.png\n");

    yaml.push_str("\n# The remover reads the upload on stdin and writes the result to stdout.\n");
    match remover_url {
        Some(url) => {
            yaml.push_str("remover:\n");
            yaml.push_str("  command: curl\n");
            yaml.push_str(&format!(
                "  args: [\"-sf\", \"-F\", \"file=@-\", \"{}\"]\n",
                url.replace('"', "\\\"")
            ));
        }
        None => {
            yaml.push_str("# remover:\n");
            yaml.push_str("#   command: rembg\n");
            yaml.push_str("#   args: [\"i\", \"-\", \"-\"]\n");
        }
    }

    yaml
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::workspace::CommandRemover;
    use tempfile::tempdir;

    fn args(path: PathBuf) -> InitArgs {
        InitArgs {
            path,
            force: false,
            remover_url: None,
        }
    }

    #[test]
    fn test_init_writes_default_config() {
        let dir = tempdir().unwrap();
        run(args(dir.path().to_path_buf()), &Printer::plain()).unwrap();

        let loaded = Config::load(&dir.path().join(CONFIG_FILENAME)).unwrap();
        assert_eq!(loaded, Config::default());
    }

    #[test]
    fn test_init_with_remover_url() {
        let dir = tempdir().unwrap();
        let mut init = args(dir.path().to_path_buf());
        init.remover_url = Some("http://localhost:8000/remove-bg".to_string());
        run(init, &Printer::plain()).unwrap();

        let loaded = Config::load(&dir.path().join(CONFIG_FILENAME)).unwrap();
        assert_eq!(
            loaded.remover,
            Some(CommandRemover::new(
                "curl",
                ["-sf", "-F", "file=@-", "http://localhost:8000/remove-bg"]
            ))
        );
    }

    #[test]
    fn test_init_errors_if_config_exists() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join(CONFIG_FILENAME), "output: build").unwrap();

        let result = run(args(dir.path().to_path_buf()), &Printer::plain());
        assert!(matches!(result, Err(CutoutError::InvalidArgument { .. })));

        let content = fs::read_to_string(dir.path().join(CONFIG_FILENAME)).unwrap();
        assert_eq!(content, "output: build");
    }

    #[test]
    fn test_init_force_overwrites() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join(CONFIG_FILENAME), "output: build").unwrap();

        let mut init = args(dir.path().to_path_buf());
        init.force = true;
        run(init, &Printer::plain()).unwrap();

        let content = fs::read_to_string(dir.path().join(CONFIG_FILENAME)).unwrap();
        assert!(content.contains("output: dist"));
    }
}
