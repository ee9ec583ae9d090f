use crate::errors::Result;
use crate::parse::{self, walker, DeclarationSite};
use crate::rewrite;
use crate::validate::is_installable;
use indexmap::IndexMap;
use serde::Serialize;
use std::path::Path;

/// Validated specifier -> pinned version (or `None` for "any").
///
/// Keys keep the order in which they were first accepted.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct DependencyMap(IndexMap<String, Option<String>>);

impl DependencyMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fold declaration sites into a map, dropping non-installable specifiers.
    pub fn from_sites(sites: &[DeclarationSite], extract_versions: bool) -> Self {
        let mut map = Self::new();
        for site in sites {
            if !is_installable(&site.specifier) {
                tracing::trace!(specifier = %site.specifier, "not an installable package");
                continue;
            }
            let version = if extract_versions { site.version() } else { None };
            map.insert(&site.specifier, version);
        }
        map
    }

    /// Record a finding. An existing entry only changes when it has no version yet.
    pub fn insert(&mut self, specifier: &str, version: Option<&str>) {
        match self.0.get_mut(specifier) {
            Some(existing) => {
                if existing.is_none() {
                    *existing = version.map(str::to_string);
                }
            }
            None => {
                self.0
                    .insert(specifier.to_string(), version.map(str::to_string));
            }
        }
    }

    /// Fold another map in with the same first-non-null rule.
    pub fn merge(&mut self, other: &DependencyMap) {
        for (name, version) in other.iter() {
            self.insert(name, version);
        }
    }

    pub fn get(&self, specifier: &str) -> Option<Option<&str>> {
        self.0.get(specifier).map(|v| v.as_deref())
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, Option<&str>)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_deref()))
    }

    pub fn into_names(self) -> Vec<String> {
        self.0.into_keys().collect()
    }
}

/// How much work an extraction does.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExtractOptions {
    /// Read version pins into the map. Off gives the names-only behaviour.
    pub extract_versions: bool,
    /// Return the source with recognized version-pin comments removed.
    pub strip_version_comments: bool,
}

impl Default for ExtractOptions {
    fn default() -> Self {
        Self {
            extract_versions: true,
            strip_version_comments: false,
        }
    }
}

/// Result of one extraction call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Extraction {
    pub dependencies: DependencyMap,
    /// The input unchanged, unless stripping was requested and pins were found
    pub code: String,
}

/// Parse `source` (dialect from `path`'s extension), collect its dependencies and
/// optionally strip version pins. A parse failure is the only error.
pub fn extract(source: &str, path: &Path, options: &ExtractOptions) -> Result<Extraction> {
    let tree = parse::parse(source, path)?;
    let sites = walker::walk(&tree);

    let dependencies = DependencyMap::from_sites(&sites, options.extract_versions);
    let code = if options.strip_version_comments {
        rewrite::strip_version_comments(source, &sites)
    } else {
        source.to_string()
    };

    tracing::debug!(
        file = %path.display(),
        sites = sites.len(),
        dependencies = dependencies.len(),
        "extracted dependencies"
    );

    Ok(Extraction { dependencies, code })
}

/// Dependencies with their version pins, optionally stripping the pins from the code.
pub fn find_dependencies(
    source: &str,
    path: &Path,
    strip_version_comments: bool,
) -> Result<Extraction> {
    extract(
        source,
        path,
        &ExtractOptions {
            extract_versions: true,
            strip_version_comments,
        },
    )
}

/// Unique installable specifiers in first-seen order.
pub fn find_dependency_names(source: &str, path: &Path) -> Result<Vec<String>> {
    let extraction = extract(
        source,
        path,
        &ExtractOptions {
            extract_versions: false,
            strip_version_comments: false,
        },
    )?;
    Ok(extraction.dependencies.into_names())
}
