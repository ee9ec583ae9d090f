//! Dependency discovery for Expo snacks.
//!
//! Parses JavaScript, TypeScript or TSX source, collects every module
//! specifier referenced by `import`, `export ... from` and `require(...)`,
//! keeps the ones that name installable npm packages and reads the version
//! pinned in a trailing `// 1.2.3` comment. The pins can also be stripped
//! from the code before it is bundled.

pub mod cli;
pub mod config;
pub mod deps;
pub mod errors;
pub mod output;
pub mod parse;
pub mod rewrite;
pub mod validate;
pub mod walk;

pub use deps::{
    extract, find_dependencies, find_dependency_names, DependencyMap, ExtractOptions, Extraction,
};
pub use errors::{ParseError, Result, SnackDepsError};
pub use parse::Dialect;
