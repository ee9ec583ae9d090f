//! Installable package specifiers.
//!
//! A specifier is `[@scope/]name[/subpath]`. Only the `@scope/name` (or bare
//! `name`) portion is checked, against the npm naming rules that applied to
//! legacy packages: problems npm merely warns about for old packages
//! (uppercase letters, length over 214, core module names) are accepted.

use regex::Regex;
use std::sync::LazyLock;

static SPECIFIER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?:@([^/?]+)/)?([^@/?]+)(?:/([^@]+))?$").expect("specifier pattern")
});

const BLACKLIST: &[&str] = &["node_modules", "favicon.ico"];

/// Split a specifier into its package name (`@scope/name` or `name`) and optional subpath.
pub fn package_name(specifier: &str) -> Option<(String, Option<&str>)> {
    let caps = SPECIFIER.captures(specifier)?;
    let name = caps.get(2)?.as_str();
    let full = match caps.get(1) {
        Some(scope) => format!("@{}/{}", scope.as_str(), name),
        None => name.to_string(),
    };
    Some((full, caps.get(3).map(|m| m.as_str())))
}

/// Whether `specifier` refers to an installable npm package (deep imports allowed).
pub fn is_installable(specifier: &str) -> bool {
    match package_name(specifier) {
        Some((name, _)) => is_valid_legacy_name(&name),
        None => false,
    }
}

/// npm package-name validation, errors only.
pub fn is_valid_legacy_name(name: &str) -> bool {
    if name.is_empty() || name.trim() != name {
        return false;
    }
    if name.starts_with('.') || name.starts_with('_') {
        return false;
    }
    if BLACKLIST.iter().any(|b| b.eq_ignore_ascii_case(name)) {
        return false;
    }
    match name.strip_prefix('@').and_then(|rest| rest.split_once('/')) {
        Some((scope, pkg)) => is_url_safe(scope) && is_url_safe(pkg),
        None => is_url_safe(name),
    }
}

/// Characters `encodeURIComponent` leaves untouched.
fn is_url_safe(part: &str) -> bool {
    !part.is_empty()
        && part.chars().all(|c| {
            c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.' | '!' | '~' | '*' | '\'' | '(' | ')')
        })
}
