use crate::config::IGNORE_FILE;
use std::path::Path;

/// Load `.snackdepsignore` by walking up from the given directory.
pub fn load_ignore_file(start: &Path) -> Vec<String> {
    for dir in start.ancestors() {
        let ignore_path = dir.join(IGNORE_FILE);
        if !ignore_path.is_file() {
            continue;
        }
        return match std::fs::read_to_string(&ignore_path) {
            Ok(content) => parse_ignore_patterns(&content),
            Err(e) => {
                tracing::warn!("Could not read {}: {e}", ignore_path.display());
                Vec::new()
            }
        };
    }
    Vec::new()
}

/// Gitignore-style lines: blanks and `#` comments are skipped.
fn parse_ignore_patterns(content: &str) -> Vec<String> {
    content
        .lines()
        .map(str::trim)
        .filter(|l| !l.is_empty() && !l.starts_with('#'))
        .map(str::to_string)
        .collect()
}
