pub mod config;
pub mod scan;
pub mod strip;

use crate::errors::Result;
use clap::{Parser, Subcommand};

#[derive(Debug, Parser)]
#[command(
    name = "snack-deps",
    version,
    about = "Find the npm packages a JavaScript or TypeScript snack depends on"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Collect dependencies and version pins from every source file under a path
    Scan(scan::ScanArgs),
    /// Print a file with its version-pin comments removed
    Strip(strip::StripArgs),
    /// Inspect configuration
    Config(config::ConfigArgs),
}

/// Dispatch to the appropriate command handler.
pub fn dispatch(cli: Cli) -> Result<()> {
    match cli.command {
        Commands::Scan(args) => scan::run(&args),
        Commands::Strip(args) => strip::run(&args),
        Commands::Config(args) => config::run(&args),
    }
}
