use miette::{Diagnostic, NamedSource, SourceSpan};
use std::path::PathBuf;
use thiserror::Error;

/// Source text that is not valid for the grammar selected by its extension.
#[derive(Error, Diagnostic, Debug)]
#[error("Parse error in {file} at {line}:{column}: {message}")]
#[diagnostic(code(snack_deps::parse_error))]
pub struct ParseError {
    pub file: String,
    /// 1-indexed
    pub line: usize,
    /// 1-indexed
    pub column: usize,
    pub message: String,
    #[source_code]
    pub src: NamedSource<String>,
    #[label("here")]
    pub span: SourceSpan,
}

#[derive(Error, Diagnostic, Debug)]
pub enum SnackDepsError {
    #[error(transparent)]
    #[diagnostic(transparent)]
    Parse(#[from] ParseError),

    #[error("No source files found in {path}")]
    #[diagnostic(code(snack_deps::no_files))]
    NoFiles { path: PathBuf },

    #[error("Could not load grammar: {0}")]
    #[diagnostic(code(snack_deps::grammar))]
    Grammar(#[from] tree_sitter::LanguageError),

    #[error("Configuration error: {0}")]
    #[diagnostic(code(snack_deps::config))]
    Config(String),

    #[error(transparent)]
    #[diagnostic(code(snack_deps::io))]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    #[diagnostic(code(snack_deps::json))]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    #[diagnostic(code(snack_deps::glob))]
    Glob(#[from] globset::Error),
}

impl SnackDepsError {
    /// True when the failure came from the source text rather than the environment.
    pub fn is_parse_error(&self) -> bool {
        matches!(self, SnackDepsError::Parse(_))
    }
}

pub type Result<T> = std::result::Result<T, SnackDepsError>;
