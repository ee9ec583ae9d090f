pub mod comments;
pub mod common;
pub mod walker;

pub use common::{DeclarationSite, SiteKind, SourceLocation, VersionPin};

use crate::errors::{ParseError, Result};
use miette::NamedSource;
use std::path::Path;

/// Grammar variant selected per file extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dialect {
    /// JavaScript with JSX. Serves every extension that is not `.ts`/`.tsx`.
    JavaScript,
    /// TypeScript without JSX (`.ts`).
    TypeScript,
    /// TypeScript with JSX (`.tsx`).
    Tsx,
}

impl Dialect {
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|e| e.to_str()) {
            Some("ts") => Dialect::TypeScript,
            Some("tsx") => Dialect::Tsx,
            _ => Dialect::JavaScript,
        }
    }

    /// Return the tree-sitter Language for this dialect.
    pub fn language(&self) -> tree_sitter::Language {
        match self {
            Dialect::JavaScript => tree_sitter_javascript::LANGUAGE.into(),
            Dialect::TypeScript => tree_sitter_typescript::LANGUAGE_TYPESCRIPT.into(),
            Dialect::Tsx => tree_sitter_typescript::LANGUAGE_TSX.into(),
        }
    }
}

impl std::fmt::Display for Dialect {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Dialect::JavaScript => write!(f, "javascript"),
            Dialect::TypeScript => write!(f, "typescript"),
            Dialect::Tsx => write!(f, "tsx"),
        }
    }
}

/// Input text plus the dialect inferred from its path.
#[derive(Debug, Clone, Copy)]
pub struct SourceUnit<'src> {
    pub text: &'src str,
    pub path: &'src Path,
    pub dialect: Dialect,
}

impl<'src> SourceUnit<'src> {
    pub fn new(text: &'src str, path: &'src Path) -> Self {
        Self {
            text,
            path,
            dialect: Dialect::from_path(path),
        }
    }
}

/// A successfully parsed source unit. Owned by a single extraction call.
#[derive(Debug)]
pub struct SyntaxTree<'src> {
    unit: SourceUnit<'src>,
    tree: tree_sitter::Tree,
}

impl<'src> SyntaxTree<'src> {
    pub fn root(&self) -> tree_sitter::Node<'_> {
        self.tree.root_node()
    }

    pub fn source(&self) -> &'src str {
        self.unit.text
    }

    pub fn dialect(&self) -> Dialect {
        self.unit.dialect
    }
}

/// Parse `text` with the grammar selected by `path`'s extension.
///
/// tree-sitter always recovers and yields a tree; any ERROR or MISSING node
/// in it is reported as a `ParseError` at the first such node. So is an
/// `import` or `export` declaration below the top level, which the grammars
/// accept but JavaScript does not.
pub fn parse<'src>(text: &'src str, path: &'src Path) -> Result<SyntaxTree<'src>> {
    let unit = SourceUnit::new(text, path);

    let mut parser = tree_sitter::Parser::new();
    parser.set_language(&unit.dialect.language())?;

    let tree = match parser.parse(text, None) {
        Some(t) => t,
        None => {
            return Err(parse_error(&unit, 0, 0, "parser produced no tree".to_string()).into())
        }
    };

    if let Some(node) = first_error(tree.root_node()) {
        let message = describe_error(node, text);
        return Err(parse_error(&unit, node.start_byte(), node.end_byte(), message).into());
    }

    if let Some(node) = nested_module_declaration(tree.root_node()) {
        let keyword = if node.kind() == "import_statement" {
            "import"
        } else {
            "export"
        };
        let message = format!("`{keyword}` declaration is only allowed at the top level");
        return Err(parse_error(&unit, node.start_byte(), node.end_byte(), message).into());
    }

    Ok(SyntaxTree { unit, tree })
}

/// First import/export statement whose parent is not the program. TypeScript
/// namespace and ambient module bodies may hold exports and are not entered.
fn nested_module_declaration(root: tree_sitter::Node) -> Option<tree_sitter::Node> {
    let mut cursor = root.walk();
    'walk: loop {
        let node = cursor.node();
        let kind = node.kind();
        if matches!(kind, "import_statement" | "export_statement")
            && node.parent().is_some_and(|p| p.kind() != "program")
        {
            return Some(node);
        }

        let module_body = matches!(kind, "module" | "internal_module" | "ambient_declaration");
        if !module_body && cursor.goto_first_child() {
            continue;
        }
        while !cursor.goto_next_sibling() {
            if !cursor.goto_parent() {
                break 'walk;
            }
        }
    }
    None
}

fn first_error(node: tree_sitter::Node) -> Option<tree_sitter::Node> {
    if node.is_error() || node.is_missing() {
        return Some(node);
    }
    if !node.has_error() {
        return None;
    }
    let mut cursor = node.walk();
    for child in node.children(&mut cursor) {
        if let Some(found) = first_error(child) {
            return Some(found);
        }
    }
    None
}

fn describe_error(node: tree_sitter::Node, text: &str) -> String {
    if node.is_missing() {
        return format!("missing `{}`", node.kind());
    }
    let snippet: String = node
        .utf8_text(text.as_bytes())
        .unwrap_or_default()
        .lines()
        .next()
        .unwrap_or_default()
        .chars()
        .take(24)
        .collect();
    if snippet.trim().is_empty() {
        "unexpected end of input".to_string()
    } else {
        format!("unexpected `{}`", snippet.trim())
    }
}

fn parse_error(unit: &SourceUnit, start: usize, end: usize, message: String) -> ParseError {
    let (line, column) = line_column(unit.text, start);
    let file = unit.path.display().to_string();
    ParseError {
        src: NamedSource::new(file.clone(), unit.text.to_string()),
        span: (start, end.saturating_sub(start)).into(),
        file,
        line,
        column,
        message,
    }
}

/// 1-indexed line and character column of a byte offset.
pub(crate) fn line_column(text: &str, offset: usize) -> (usize, usize) {
    let before = &text[..offset.min(text.len())];
    let line = before.matches('\n').count() + 1;
    let line_start = before.rfind('\n').map_or(0, |i| i + 1);
    let column = before[line_start..].chars().count() + 1;
    (line, column)
}
