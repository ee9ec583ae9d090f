use crate::errors::Result;
use globset::{Glob, GlobSetBuilder};
use ignore::WalkBuilder;
use std::path::{Path, PathBuf};

/// Extensions of files the extractor understands.
pub const SOURCE_EXTENSIONS: &[&str] = &["js", "jsx", "mjs", "cjs", "ts", "tsx"];

/// Exclusions applied unless the caller opts out.
pub fn default_excludes() -> Vec<String> {
    vec!["**/node_modules/**".to_string()]
}

/// Whether `path` has one of the source extensions.
pub fn is_source_file(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .is_some_and(|ext| SOURCE_EXTENSIONS.contains(&ext))
}

/// Discover source files under `root`.
///
/// - Respects `.gitignore`
/// - Applies include/exclude glob patterns
/// - Skips `node_modules` by default
/// - Returns sorted paths for deterministic output
pub fn discover_files(
    root: &Path,
    include_patterns: &[String],
    exclude_patterns: &[String],
    include_node_modules: bool,
) -> Result<Vec<PathBuf>> {
    if root.is_file() {
        return Ok(if is_source_file(root) {
            vec![root.to_path_buf()]
        } else {
            Vec::new()
        });
    }

    // Build exclude globset
    let mut exclude_builder = GlobSetBuilder::new();
    for pattern in exclude_patterns {
        exclude_builder.add(Glob::new(pattern)?);
    }
    if !include_node_modules {
        for pattern in default_excludes() {
            exclude_builder.add(Glob::new(&pattern)?);
        }
    }
    let exclude_set = exclude_builder.build()?;

    // Build include globset (if any patterns specified)
    let include_set = if include_patterns.is_empty() {
        None
    } else {
        let mut builder = GlobSetBuilder::new();
        for pattern in include_patterns {
            builder.add(Glob::new(pattern)?);
        }
        Some(builder.build()?)
    };

    let walker = WalkBuilder::new(root)
        .hidden(false)
        .git_ignore(true)
        .build();

    let mut files = Vec::new();

    for entry in walker {
        let entry = match entry {
            Ok(e) => e,
            Err(e) => {
                tracing::debug!("Skipping unreadable entry: {e}");
                continue;
            }
        };

        let path = entry.path();

        if !path.is_file() || !is_source_file(path) {
            continue;
        }

        // Get relative path for glob matching
        let relative = path.strip_prefix(root).unwrap_or(path);

        if exclude_set.is_match(relative) || exclude_set.is_match(path) {
            continue;
        }
        // Also check just the filename for patterns like *.test.js
        if let Some(fname) = path.file_name() {
            if exclude_set.is_match(Path::new(fname)) {
                continue;
            }
        }

        if let Some(ref include) = include_set {
            if !include.is_match(relative) && !include.is_match(path) {
                continue;
            }
        }

        files.push(path.to_path_buf());
    }

    files.sort();

    Ok(files)
}
