use serde::Serialize;
use std::ops::Range;

/// Syntactic form of a dependency declaration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SiteKind {
    /// `import x from "m"` / `import "m"`
    Import,
    /// `export { x } from "m"` / `export * as ns from "m"`
    ReExport,
    /// `export * from "m"`
    ExportAll,
    /// `require("m")` with a single literal argument
    Require,
}

/// Version pin found in a trailing line comment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VersionPin {
    /// Trimmed comment text, e.g. `2.4.1` or `LATEST`
    pub version: String,
    /// Byte range of the whole comment, `//` included
    pub comment: Range<usize>,
}

/// One location in the source that references a module.
#[derive(Debug, Clone)]
pub struct DeclarationSite {
    /// The specifier as written in source
    pub specifier: String,
    pub kind: SiteKind,
    pub location: SourceLocation,
    /// Byte offsets after which trailing comments are inspected, in priority order
    pub anchors: Vec<usize>,
    pub pin: Option<VersionPin>,
}

impl DeclarationSite {
    /// A site is removable when it carries a pin comment that can be deleted.
    pub fn is_removable(&self) -> bool {
        self.pin.is_some()
    }

    pub fn version(&self) -> Option<&str> {
        self.pin.as_ref().map(|p| p.version.as_str())
    }
}

/// Source location of a site's specifier.
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq, Hash)]
pub struct SourceLocation {
    /// 1-indexed
    pub line: usize,
    /// 1-indexed
    pub column: usize,
}
