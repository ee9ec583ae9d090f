pub mod ignore;
pub mod provenance;
pub mod resolve;
pub mod schema;
pub mod show;

use crate::deps::ExtractOptions;
use crate::output::OutputFormat;
use provenance::ProvenanceMap;
use std::path::PathBuf;

/// Name of the project config file, looked up from the working directory upwards.
pub const PROJECT_CONFIG_FILE: &str = ".snackdeps.toml";

/// Name of the gitignore-style exclusion file.
pub const IGNORE_FILE: &str = ".snackdepsignore";

/// Fully resolved configuration, every layer applied.
#[derive(Debug, Clone)]
pub struct ResolvedConfig {
    // Operational
    pub format: OutputFormat,
    pub quiet: bool,

    // Targeting
    pub include: Vec<String>,
    pub exclude: Vec<String>,
    pub ignore_patterns: Vec<String>,

    // Extraction
    pub extract: ResolvedExtractConfig,

    // Provenance
    pub provenance: ProvenanceMap,
    pub loaded_files: Vec<PathBuf>,
}

#[derive(Debug, Clone)]
pub struct ResolvedExtractConfig {
    /// Read version pins; false is the names-only mode
    pub versions: bool,
}

impl Default for ResolvedExtractConfig {
    fn default() -> Self {
        Self { versions: true }
    }
}

impl Default for ResolvedConfig {
    fn default() -> Self {
        Self {
            format: OutputFormat::default(),
            quiet: false,
            include: Vec::new(),
            exclude: Vec::new(),
            ignore_patterns: Vec::new(),
            extract: ResolvedExtractConfig::default(),
            provenance: ProvenanceMap::new(),
            loaded_files: Vec::new(),
        }
    }
}

impl ResolvedConfig {
    /// Exclude patterns from config plus those from `.snackdepsignore`.
    pub fn all_excludes(&self) -> Vec<String> {
        self.exclude
            .iter()
            .chain(self.ignore_patterns.iter())
            .cloned()
            .collect()
    }

    /// Extraction options for a scan; scans never rewrite code.
    pub fn extract_options(&self) -> ExtractOptions {
        ExtractOptions {
            extract_versions: self.extract.versions,
            strip_version_comments: false,
        }
    }
}
