use clap::Parser;
use cutout::cli::{Cli, Commands};
use cutout::output::Printer;
use flexi_logger::Logger;
use miette::Result;

fn main() -> Result<()> {
    let cli = Cli::parse();

    let _logger = match Logger::try_with_env_or_str(cli.log_spec()).and_then(|l| l.log_to_stderr().start()) {
        Ok(handle) => Some(handle),
        Err(e) => {
            eprintln!("Failed to start logger: {}", e);
            None
        }
    };

    let printer = Printer::new();

    match cli.command {
        Commands::Edit(args) => cutout::cli::edit::run(args, &printer)?,
        Commands::Remove(args) => cutout::cli::remove::run(args, &printer)?,
        Commands::Init(args) => cutout::cli::init::run(args, &printer)?,
        Commands::Completions(args) => cutout::cli::completions::run(args)?,
    }

    Ok(())
}
