use std::collections::BTreeMap;
use std::fmt;
use std::path::PathBuf;

/// The layer a setting was last written by.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Source {
    Default,
    UserConfig(PathBuf),
    ProjectConfig(PathBuf),
    EnvVar(String),
    CliFlag(String),
}

impl fmt::Display for Source {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Source::Default => f.write_str("default"),
            Source::UserConfig(path) => write!(f, "user config ({})", path.display()),
            Source::ProjectConfig(path) => write!(f, "project config ({})", path.display()),
            Source::EnvVar(name) => write!(f, "env var ({name})"),
            Source::CliFlag(flag) => write!(f, "CLI flag ({flag})"),
        }
    }
}

/// Dotted setting key (`targeting.include`) -> the layer that set it.
#[derive(Debug, Clone, Default)]
pub struct ProvenanceMap {
    entries: BTreeMap<String, Source>,
}

impl ProvenanceMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record `source` for `key`, replacing what a lower layer recorded.
    pub fn set(&mut self, key: impl Into<String>, source: Source) {
        self.entries.insert(key.into(), source);
    }

    pub fn get(&self, key: &str) -> Option<&Source> {
        self.entries.get(key)
    }

    /// All entries, ordered by key.
    pub fn sorted_entries(&self) -> impl Iterator<Item = (&str, &Source)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }
}
