pub mod completions;
pub mod edit;
pub mod init;
pub mod remove;

use clap::{ArgAction, Parser, Subcommand};

/// cutout - background removal with erase/restore touch-up
#[derive(Parser, Debug)]
#[command(name = "cutout")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// More log output (-v info, -vv debug). RUST_LOG takes precedence.
    #[arg(long, short, global = true, action = ArgAction::Count)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Commands,
}

impl Cli {
    /// Log specification for the requested verbosity.
    pub fn log_spec(&self) -> &'static str {
        match self.verbose {
            0 => "warn",
            1 => "info",
            _ => "debug",
        }
    }
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Remove the background, replay brush strokes and export a PNG
    Edit(edit::EditArgs),

    /// Run only the background remover and write the result
    Remove(remove::RemoveArgs),

    /// Write a cutout.yaml configuration file
    Init(init::InitArgs),

    /// Generate shell completions
    Completions(completions::CompletionsArgs),
}
