use crate::deps::DependencyMap;
use crate::errors::Result;
use serde::Serialize;
use std::io::Write;
use std::path::PathBuf;

/// Everything a `scan` reports.
#[derive(Debug, Serialize)]
pub struct ScanOutput {
    pub metadata: Metadata,
    /// All files folded together, first pinned version wins
    pub dependencies: DependencyMap,
    pub files: Vec<FileReport>,
    pub skipped: Vec<SkippedFile>,
}

#[derive(Debug, Serialize)]
pub struct Metadata {
    pub root: PathBuf,
    pub files_parsed: usize,
    pub files_skipped: usize,
    pub dependency_count: usize,
    pub versions: bool,
    pub elapsed_ms: u64,
}

#[derive(Debug, Serialize)]
pub struct FileReport {
    pub file: PathBuf,
    pub dependencies: DependencyMap,
}

/// A file left out of the scan, to be retried on the next pass.
#[derive(Debug, Serialize)]
pub struct SkippedFile {
    pub file: PathBuf,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub line: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub column: Option<usize>,
    pub reason: String,
}

/// Write any serializable report as pretty JSON followed by a newline.
pub fn write_json<W: Write, T: Serialize>(writer: &mut W, value: &T) -> Result<()> {
    serde_json::to_writer_pretty(&mut *writer, value)?;
    writeln!(writer)?;
    Ok(())
}
