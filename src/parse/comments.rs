use crate::parse::common::VersionPin;
use regex::Regex;
use std::ops::Range;
use std::sync::LazyLock;

/// `LATEST` (any case), or 1-3 dotted ASCII-digit components where the last may be `*`.
static VERSION_PIN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?i:latest)$|^(?:[0-9]+\.){0,2}(?:[0-9]+|\*)$").expect("version pin pattern")
});

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommentStyle {
    /// `// ...`
    Line,
    /// `/* ... */`
    Block,
}

/// A comment collected during the tree walk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Comment {
    pub span: Range<usize>,
    pub style: CommentStyle,
}

impl Comment {
    pub fn from_node(node: tree_sitter::Node, source: &str) -> Self {
        let span = node.start_byte()..node.end_byte();
        let style = if source[span.clone()].starts_with("//") {
            CommentStyle::Line
        } else {
            CommentStyle::Block
        };
        Self { span, style }
    }

    /// Comment text without its delimiters.
    pub fn body<'s>(&self, source: &'s str) -> &'s str {
        let text = &source[self.span.clone()];
        match self.style {
            CommentStyle::Line => text.get(2..).unwrap_or_default(),
            CommentStyle::Block => text
                .get(2..text.len().saturating_sub(2))
                .unwrap_or_default(),
        }
    }
}

/// Recognize a version pin in a comment body. Returns the trimmed version text.
pub fn parse_version_pin(body: &str) -> Option<&str> {
    let trimmed = body.trim();
    VERSION_PIN.is_match(trimmed).then_some(trimmed)
}

/// Comments trailing `anchor` on the same line.
///
/// A comment joins the run when only spaces, tabs, `;` or `,` separate it from
/// the anchor or from the previous comment of the run. A line comment closes the run.
/// `comments` must be sorted by start offset.
pub fn trailing_run<'c>(source: &str, comments: &'c [Comment], anchor: usize) -> Vec<&'c Comment> {
    let first = comments.partition_point(|c| c.span.start < anchor);
    let mut cursor = anchor;
    let mut run = Vec::new();

    for comment in &comments[first..] {
        let gap = &source[cursor..comment.span.start];
        if !gap.chars().all(|c| matches!(c, ' ' | '\t' | ';' | ',')) {
            break;
        }
        run.push(comment);
        cursor = comment.span.end;
        if comment.style == CommentStyle::Line {
            break;
        }
    }

    run
}

/// First line comment trailing any of `anchors` (tried in order) whose body is a version pin.
pub fn find_version_pin(source: &str, comments: &[Comment], anchors: &[usize]) -> Option<VersionPin> {
    anchors.iter().find_map(|&anchor| {
        trailing_run(source, comments, anchor)
            .into_iter()
            .filter(|c| c.style == CommentStyle::Line)
            .find_map(|c| {
                parse_version_pin(c.body(source)).map(|version| VersionPin {
                    version: version.to_string(),
                    comment: c.span.clone(),
                })
            })
    })
}
