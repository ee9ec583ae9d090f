use crate::parse::DeclarationSite;
use std::ops::Range;

/// Byte ranges to delete: each pinned site's comment plus the spaces and tabs
/// separating it from the preceding text. Sorted, without duplicates.
pub fn deletion_ranges(source: &str, sites: &[DeclarationSite]) -> Vec<Range<usize>> {
    let mut ranges: Vec<Range<usize>> = sites
        .iter()
        .filter_map(|site| site.pin.as_ref())
        .map(|pin| {
            let start = source[..pin.comment.start]
                .trim_end_matches([' ', '\t'])
                .len();
            start..pin.comment.end
        })
        .collect();
    ranges.sort_by_key(|r| (r.start, r.end));
    ranges.dedup();
    ranges
}

/// Copy `source` skipping the given sorted ranges.
pub fn apply_deletions(source: &str, ranges: &[Range<usize>]) -> String {
    let mut out = String::with_capacity(source.len());
    let mut cursor = 0;
    for range in ranges {
        if range.start < cursor {
            continue;
        }
        out.push_str(&source[cursor..range.start]);
        cursor = range.end;
    }
    out.push_str(&source[cursor..]);
    out
}

/// The source with every recognized version-pin comment removed. Identical to
/// the input when no site carries a pin.
pub fn strip_version_comments(source: &str, sites: &[DeclarationSite]) -> String {
    let ranges = deletion_ranges(source, sites);
    if ranges.is_empty() {
        return source.to_string();
    }
    tracing::debug!(removed = ranges.len(), "stripping version comments");
    apply_deletions(source, &ranges)
}
