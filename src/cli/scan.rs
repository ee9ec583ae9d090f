use crate::config::resolve::{resolve_config, CliOverrides};
use crate::deps::{extract, DependencyMap, ExtractOptions};
use crate::errors::{Result, SnackDepsError};
use crate::output::json::{FileReport, Metadata, ScanOutput, SkippedFile};
use crate::output::OutputFormat;
use crate::walk;
use clap::Args;
use rayon::prelude::*;
use std::path::{Path, PathBuf};
use std::time::Instant;

#[derive(Debug, Args)]
pub struct ScanArgs {
    /// File or directory to scan
    pub path: PathBuf,

    /// Output format
    #[arg(long)]
    pub format: Option<OutputFormat>,

    /// Include glob patterns
    #[arg(long)]
    pub include: Vec<String>,

    /// Exclude glob patterns
    #[arg(long)]
    pub exclude: Vec<String>,

    /// Also scan files inside node_modules
    #[arg(long)]
    pub include_node_modules: bool,

    /// Report package names only, ignoring version comments
    #[arg(long)]
    pub names_only: bool,

    /// Suppress progress output
    #[arg(long)]
    pub quiet: bool,
}

/// Outcome of one file, produced by a parallel worker.
enum FileOutcome {
    Parsed(FileReport),
    Skipped(SkippedFile),
}

pub fn run(args: &ScanArgs) -> Result<()> {
    let start = Instant::now();

    let root = args
        .path
        .canonicalize()
        .map_err(|_| SnackDepsError::NoFiles {
            path: args.path.clone(),
        })?;
    let working_dir = if root.is_dir() {
        root.clone()
    } else {
        root.parent().map_or_else(|| root.clone(), Path::to_path_buf)
    };

    let config = resolve_config(
        &working_dir,
        &CliOverrides {
            format: args.format,
            quiet: args.quiet,
            include: args.include.clone(),
            exclude: args.exclude.clone(),
            names_only: args.names_only,
        },
    )?;

    let files = walk::discover_files(
        &root,
        &config.include,
        &config.all_excludes(),
        args.include_node_modules,
    )?;
    if files.is_empty() {
        return Err(SnackDepsError::NoFiles { path: root });
    }

    let progress = if !config.quiet {
        let pb = indicatif::ProgressBar::new(files.len() as u64);
        pb.set_style(
            indicatif::ProgressStyle::default_bar()
                .template("{spinner:.green} [{bar:40.cyan/blue}] {pos}/{len} files ({eta})")
                .unwrap_or_else(|_| indicatif::ProgressStyle::default_bar())
                .progress_chars("#>-"),
        );
        Some(pb)
    } else {
        None
    };

    let options = config.extract_options();

    // Each extraction builds its own parser, so workers share nothing.
    let outcomes: Vec<FileOutcome> = files
        .par_iter()
        .map(|file| {
            let outcome = scan_file(&root, file, &options);
            if let Some(ref pb) = progress {
                pb.inc(1);
            }
            outcome
        })
        .collect();

    if let Some(pb) = progress {
        pb.finish_and_clear();
    }

    let mut merged = DependencyMap::new();
    let mut reports = Vec::new();
    let mut skipped = Vec::new();
    for outcome in outcomes {
        match outcome {
            FileOutcome::Parsed(report) => {
                merged.merge(&report.dependencies);
                reports.push(report);
            }
            FileOutcome::Skipped(file) => skipped.push(file),
        }
    }

    let elapsed_ms = start.elapsed().as_millis() as u64;
    let output = ScanOutput {
        metadata: Metadata {
            root: root.clone(),
            files_parsed: reports.len(),
            files_skipped: skipped.len(),
            dependency_count: merged.len(),
            versions: options.extract_versions,
            elapsed_ms,
        },
        dependencies: merged,
        files: reports,
        skipped,
    };

    let mut stdout = std::io::stdout().lock();
    match config.format {
        OutputFormat::Json => crate::output::json::write_json(&mut stdout, &output)?,
        OutputFormat::Text => crate::output::text::write_scan_text(&mut stdout, &output)?,
    }

    if !config.quiet {
        eprintln!(
            "Scanned {} files ({} skipped) in {:.2}s, found {} dependencies",
            output.metadata.files_parsed + output.metadata.files_skipped,
            output.metadata.files_skipped,
            elapsed_ms as f64 / 1000.0,
            output.metadata.dependency_count
        );
    }

    Ok(())
}

fn scan_file(root: &Path, file: &Path, options: &ExtractOptions) -> FileOutcome {
    let display = display_path(root, file);

    let source = match std::fs::read_to_string(file) {
        Ok(s) => s,
        Err(e) => {
            tracing::warn!("Skipping {}: {e}", file.display());
            return FileOutcome::Skipped(SkippedFile {
                file: display,
                line: None,
                column: None,
                reason: e.to_string(),
            });
        }
    };

    match extract(&source, file, options) {
        Ok(extraction) => FileOutcome::Parsed(FileReport {
            file: display,
            dependencies: extraction.dependencies,
        }),
        Err(SnackDepsError::Parse(e)) => {
            tracing::warn!("Skipping {}: {e}", file.display());
            FileOutcome::Skipped(SkippedFile {
                file: display,
                line: Some(e.line),
                column: Some(e.column),
                reason: e.message,
            })
        }
        Err(e) => {
            tracing::warn!("Skipping {}: {e}", file.display());
            FileOutcome::Skipped(SkippedFile {
                file: display,
                line: None,
                column: None,
                reason: e.to_string(),
            })
        }
    }
}

/// Path relative to the scan root; a file root is shown by its name.
fn display_path(root: &Path, file: &Path) -> PathBuf {
    match file.strip_prefix(root) {
        Ok(rel) if !rel.as_os_str().is_empty() => rel.to_path_buf(),
        _ => file
            .file_name()
            .map_or_else(|| file.to_path_buf(), PathBuf::from),
    }
}
