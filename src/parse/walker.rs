use crate::parse::comments::{find_version_pin, Comment};
use crate::parse::common::{DeclarationSite, SiteKind, SourceLocation};
use crate::parse::{line_column, SyntaxTree};
use tree_sitter::Node;

/// The closed set of node kinds the walker reacts to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum NodeKind {
    ImportDeclaration,
    ExportNamedDeclaration,
    ExportAllDeclaration,
    CallExpression,
    Comment,
}

impl NodeKind {
    fn classify(node: Node) -> Option<Self> {
        match node.kind() {
            "import_statement" => Some(NodeKind::ImportDeclaration),
            "export_statement" => {
                node.child_by_field_name("source")?;
                let mut cursor = node.walk();
                let star = node.children(&mut cursor).any(|c| c.kind() == "*");
                Some(if star {
                    NodeKind::ExportAllDeclaration
                } else {
                    NodeKind::ExportNamedDeclaration
                })
            }
            "call_expression" => Some(NodeKind::CallExpression),
            "comment" => Some(NodeKind::Comment),
            _ => None,
        }
    }
}

/// Visit the whole tree once and return every declaration site in source order,
/// each with the version pin trailing it (if any).
pub fn walk(tree: &SyntaxTree) -> Vec<DeclarationSite> {
    let source = tree.source();
    let mut sites = Vec::new();
    let mut comments = Vec::new();

    let mut cursor = tree.root().walk();
    'walk: loop {
        let node = cursor.node();
        match NodeKind::classify(node) {
            Some(NodeKind::ImportDeclaration) => {
                sites.extend(module_site(node, SiteKind::Import, source));
            }
            Some(NodeKind::ExportNamedDeclaration) => {
                sites.extend(module_site(node, SiteKind::ReExport, source));
            }
            Some(NodeKind::ExportAllDeclaration) => {
                sites.extend(module_site(node, SiteKind::ExportAll, source));
            }
            Some(NodeKind::CallExpression) => {
                sites.extend(require_site(node, source));
            }
            Some(NodeKind::Comment) => comments.push(Comment::from_node(node, source)),
            None => {}
        }

        if cursor.goto_first_child() {
            continue;
        }
        while !cursor.goto_next_sibling() {
            if !cursor.goto_parent() {
                break 'walk;
            }
        }
    }

    for site in &mut sites {
        site.pin = find_version_pin(source, &comments, &site.anchors);
    }

    tracing::trace!(
        sites = sites.len(),
        comments = comments.len(),
        dialect = %tree.dialect(),
        "walked syntax tree"
    );

    sites
}

/// `import ... from "m"` and `export ... from "m"`.
fn module_site(node: Node, kind: SiteKind, source: &str) -> Option<DeclarationSite> {
    let source_node = node.child_by_field_name("source")?;
    let specifier = literal_value(source_node, source)?;
    Some(DeclarationSite {
        specifier,
        kind,
        location: location(source_node, source),
        anchors: vec![content_end(node)],
        pin: None,
    })
}

/// `require("m")` or `` require(`m`) ``; every other call shape yields nothing.
fn require_site(node: Node, source: &str) -> Option<DeclarationSite> {
    let callee = node.child_by_field_name("function")?;
    if callee.kind() != "identifier" || callee.utf8_text(source.as_bytes()).ok()? != "require" {
        return None;
    }

    // A tagged template (require`m`) stores its template in the arguments field.
    let arguments = node.child_by_field_name("arguments")?;
    if arguments.kind() != "arguments" {
        return None;
    }

    let mut cursor = arguments.walk();
    let values: Vec<Node> = arguments
        .named_children(&mut cursor)
        .filter(|n| n.kind() != "comment")
        .collect();
    let [argument] = values.as_slice() else {
        tracing::trace!(args = values.len(), "skipping require call with wrong arity");
        return None;
    };

    let Some(specifier) = literal_value(*argument, source) else {
        tracing::trace!(kind = argument.kind(), "skipping require call with non-literal argument");
        return None;
    };

    let mut anchors = vec![argument.end_byte(), node.end_byte()];
    if let Some(statement) = enclosing_statement(node) {
        anchors.push(content_end(statement));
    }

    Some(DeclarationSite {
        specifier,
        kind: SiteKind::Require,
        location: location(*argument, source),
        anchors,
        pin: None,
    })
}

/// Decoded value of a string literal, or of a template literal with a single quasi.
fn literal_value(node: Node, source: &str) -> Option<String> {
    match node.kind() {
        "string" => {}
        "template_string" => {
            let mut cursor = node.walk();
            if node
                .named_children(&mut cursor)
                .any(|c| c.kind() == "template_substitution")
            {
                return None;
            }
        }
        _ => return None,
    }
    let text = node.utf8_text(source.as_bytes()).ok()?;
    let body = text.get(1..text.len().checked_sub(1)?)?;
    let value = unescape(body);
    if value.is_none() {
        tracing::trace!(literal = text, "skipping literal with malformed escape");
    }
    value
}

/// Resolve the escape sequences of a literal body. `None` for a malformed
/// escape, a legacy octal escape or an unpaired surrogate.
fn unescape(raw: &str) -> Option<String> {
    if !raw.contains('\\') {
        return Some(raw.to_string());
    }

    let mut out = String::with_capacity(raw.len());
    let mut chars = raw.chars().peekable();
    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        match chars.next()? {
            'n' => out.push('\n'),
            't' => out.push('\t'),
            'r' => out.push('\r'),
            'b' => out.push('\u{8}'),
            'f' => out.push('\u{c}'),
            'v' => out.push('\u{b}'),
            '0' if !chars.peek().is_some_and(char::is_ascii_digit) => out.push('\0'),
            '0'..='9' => return None,
            'x' => out.push(char::from_u32(hex_value(&mut chars, 2)?)?),
            'u' => out.push(unicode_escape(&mut chars)?),
            // Line continuations contribute nothing.
            '\r' => {
                if chars.peek() == Some(&'\n') {
                    chars.next();
                }
            }
            '\n' | '\u{2028}' | '\u{2029}' => {}
            other => out.push(other),
        }
    }
    Some(out)
}

type Chars<'a> = std::iter::Peekable<std::str::Chars<'a>>;

fn hex_value(chars: &mut Chars, digits: usize) -> Option<u32> {
    let mut value = 0;
    for _ in 0..digits {
        value = value * 16 + chars.next()?.to_digit(16)?;
    }
    Some(value)
}

/// The part after `\u`: `{X..}`, `XXXX` or a `XXXX\uXXXX` surrogate pair.
fn unicode_escape(chars: &mut Chars) -> Option<char> {
    if chars.peek() == Some(&'{') {
        chars.next();
        let mut value: u32 = 0;
        let mut digits = 0;
        loop {
            let c = chars.next()?;
            if c == '}' {
                break;
            }
            value = value.checked_mul(16)?.checked_add(c.to_digit(16)?)?;
            digits += 1;
        }
        return (digits > 0).then(|| char::from_u32(value)).flatten();
    }

    let unit = hex_value(chars, 4)?;
    if !(0xD800..0xDC00).contains(&unit) {
        return char::from_u32(unit);
    }
    if chars.next()? != '\\' || chars.next()? != 'u' {
        return None;
    }
    let low = hex_value(chars, 4)?;
    if !(0xDC00..0xE000).contains(&low) {
        return None;
    }
    char::from_u32(0x10000 + ((unit - 0xD800) << 10) + (low - 0xDC00))
}

/// End of the last non-comment, non-empty child. A statement closed by
/// automatic semicolon insertion can hold its trailing comment as a child.
fn content_end(node: Node) -> usize {
    let mut cursor = node.walk();
    node.children(&mut cursor)
        .filter(|c| c.kind() != "comment" && c.end_byte() > c.start_byte())
        .last()
        .map_or(node.end_byte(), |c| c.end_byte())
}

fn enclosing_statement(node: Node) -> Option<Node> {
    let mut current = node.parent();
    while let Some(n) = current {
        let kind = n.kind();
        if kind.ends_with("_statement") || kind.ends_with("_declaration") {
            return Some(n);
        }
        current = n.parent();
    }
    None
}

fn location(node: Node, source: &str) -> SourceLocation {
    let (line, column) = line_column(source, node.start_byte());
    SourceLocation { line, column }
}
