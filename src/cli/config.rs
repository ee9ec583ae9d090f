use crate::config::resolve::{resolve_config, CliOverrides};
use crate::errors::{Result, SnackDepsError};
use clap::{Args, Subcommand};
use std::path::{Path, PathBuf};

#[derive(Debug, Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub action: ConfigAction,
}

#[derive(Debug, Subcommand)]
pub enum ConfigAction {
    /// Show resolved configuration with provenance
    Show {
        /// Working directory (defaults to current directory)
        #[arg(long)]
        path: Option<PathBuf>,
        /// Only print the config file that takes precedence
        #[arg(long)]
        file_only: bool,
    },
}

pub fn run(args: &ConfigArgs) -> Result<()> {
    match &args.action {
        ConfigAction::Show { path, file_only } => {
            let working_dir = working_dir(path.as_deref())?;
            let config = resolve_config(&working_dir, &CliOverrides::default())?;
            let mut stdout = std::io::stdout().lock();
            if *file_only {
                crate::config::show::render_path(&mut stdout, &config)?;
            } else {
                crate::config::show::render_show(&mut stdout, &config)?;
            }
        }
    }
    Ok(())
}

fn working_dir(path: Option<&Path>) -> Result<PathBuf> {
    let p = path.unwrap_or(Path::new("."));
    p.canonicalize()
        .map_err(|_| SnackDepsError::Config(format!("Invalid path: {}", p.display())))
}
