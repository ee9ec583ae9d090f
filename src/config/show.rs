use crate::config::ResolvedConfig;
use std::io::Write;

/// Render `config show`: loaded files, then each setting with its source.
pub fn render_show<W: Write>(w: &mut W, config: &ResolvedConfig) -> std::io::Result<()> {
    if config.loaded_files.is_empty() {
        writeln!(w, "Loaded config files: (none)")?;
    } else {
        writeln!(w, "Loaded config files:")?;
        for (i, path) in config.loaded_files.iter().enumerate() {
            writeln!(w, "  {}. {}", i + 1, path.display())?;
        }
    }

    if !config.ignore_patterns.is_empty() {
        writeln!(w)?;
        writeln!(w, "Ignore patterns: {}", config.ignore_patterns.join(", "))?;
    }

    writeln!(w)?;
    writeln!(w, "Resolved settings:")?;
    for (key, source) in config.provenance.sorted_entries() {
        writeln!(w, "  {key}: {} <- {source}", value_for_key(config, key))?;
    }

    Ok(())
}

/// Print only the path of the config file that wins, if any.
pub fn render_path<W: Write>(w: &mut W, config: &ResolvedConfig) -> std::io::Result<()> {
    match config.loaded_files.last() {
        Some(path) => writeln!(w, "{}", path.display()),
        None => writeln!(w, "(none)"),
    }
}

fn value_for_key(config: &ResolvedConfig, key: &str) -> String {
    match key {
        "defaults.format" => config.format.to_string(),
        "defaults.quiet" => config.quiet.to_string(),
        "targeting.include" => patterns(&config.include, "(all)"),
        "targeting.exclude" => patterns(&config.exclude, "(none)"),
        "extract.versions" => config.extract.versions.to_string(),
        _ => "(unknown)".to_string(),
    }
}

fn patterns(list: &[String], empty: &str) -> String {
    if list.is_empty() {
        empty.to_string()
    } else {
        format!("[{}]", list.join(", "))
    }
}
