use crate::deps::DependencyMap;
use crate::errors::Result;
use crate::output::json::ScanOutput;
use std::io::Write;

/// Write scan output as a human-readable report.
pub fn write_scan_text<W: Write>(writer: &mut W, output: &ScanOutput) -> Result<()> {
    let metadata = &output.metadata;
    writeln!(writer, "Snack Dependency Report")?;
    writeln!(writer, "=======================")?;
    writeln!(writer)?;
    writeln!(writer, "Root:     {}", metadata.root.display())?;
    writeln!(writer, "Parsed:   {} files", metadata.files_parsed)?;
    writeln!(writer, "Skipped:  {} files", metadata.files_skipped)?;
    writeln!(
        writer,
        "Versions: {}",
        if metadata.versions { "read" } else { "ignored" }
    )?;
    writeln!(writer)?;

    let heading = format!("Dependencies ({})", output.dependencies.len());
    writeln!(writer, "{heading}")?;
    writeln!(writer, "{}", "-".repeat(heading.len()))?;
    write_map(writer, &output.dependencies, "  ")?;

    if !output.files.is_empty() {
        writeln!(writer)?;
        writeln!(writer, "Files")?;
        writeln!(writer, "-----")?;
        for report in &output.files {
            writeln!(writer, "  {}", report.file.display())?;
            write_map(writer, &report.dependencies, "    ")?;
        }
    }

    if !output.skipped.is_empty() {
        writeln!(writer)?;
        writeln!(writer, "Skipped")?;
        writeln!(writer, "-------")?;
        for skipped in &output.skipped {
            match (skipped.line, skipped.column) {
                (Some(line), Some(column)) => writeln!(
                    writer,
                    "  {}:{line}:{column}: {}",
                    skipped.file.display(),
                    skipped.reason
                )?,
                _ => writeln!(writer, "  {}: {}", skipped.file.display(), skipped.reason)?,
            }
        }
    }

    Ok(())
}

fn write_map<W: Write>(writer: &mut W, map: &DependencyMap, indent: &str) -> Result<()> {
    if map.is_empty() {
        writeln!(writer, "{indent}(none)")?;
        return Ok(());
    }
    let width = map.keys().map(str::len).max().unwrap_or(0);
    for (name, version) in map.iter() {
        writeln!(
            writer,
            "{indent}{name:<width$}  {}",
            version.unwrap_or("(any)")
        )?;
    }
    Ok(())
}
