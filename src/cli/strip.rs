use crate::deps::find_dependencies;
use crate::errors::Result;
use crate::output::OutputFormat;
use clap::Args;
use std::io::Write;
use std::path::PathBuf;

#[derive(Debug, Args)]
pub struct StripArgs {
    /// Source file to read; it is never modified
    pub file: PathBuf,

    /// `text` prints the stripped code, `json` prints `{dependencies, code}`
    #[arg(long, default_value = "text")]
    pub format: OutputFormat,
}

pub fn run(args: &StripArgs) -> Result<()> {
    let source = std::fs::read_to_string(&args.file)?;
    let extraction = find_dependencies(&source, &args.file, true)?;

    let mut stdout = std::io::stdout().lock();
    match args.format {
        OutputFormat::Json => crate::output::json::write_json(&mut stdout, &extraction)?,
        OutputFormat::Text => {
            stdout.write_all(extraction.code.as_bytes())?;
            stdout.flush()?;
        }
    }
    Ok(())
}
