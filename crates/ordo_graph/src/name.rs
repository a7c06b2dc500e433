//! Hierarchical dotted names.
//!
//! Packages and modules are identified by fully-qualified names such as
//! `my_app.api.public`. Every helper here is a pure function over `&str`; no
//! allocation happens unless a new name is produced.

/// Separator between name segments.
pub const SEPARATOR: char = '.';

/// Segment that matches any single segment in a pattern.
pub const WILDCARD: &str = "*";

/// Returns true if `name` equals `ancestor` or lies underneath it.
///
/// Ancestry is segment-aware: `app` is an ancestor of `app.api` but not of
/// `application`.
///
/// # Example
///
/// ```
/// use ordo_graph::name::is_ancestor_of;
///
/// assert!(is_ancestor_of("app", "app"));
/// assert!(is_ancestor_of("app", "app.api.public"));
/// assert!(!is_ancestor_of("app", "application"));
/// ```
#[must_use]
pub fn is_ancestor_of(ancestor: &str, name: &str) -> bool {
    match name.strip_prefix(ancestor) {
        Some("") => true,
        Some(rest) => rest.starts_with(SEPARATOR),
        None => false,
    }
}

/// Returns true if `name` lies strictly underneath `ancestor`.
#[must_use]
pub fn is_strict_ancestor_of(ancestor: &str, name: &str) -> bool {
    ancestor != name && is_ancestor_of(ancestor, name)
}

/// Returns the unqualified last segment of a name.
///
/// ```
/// use ordo_graph::name::last_segment;
///
/// assert_eq!(last_segment("app.api.models"), "models");
/// assert_eq!(last_segment("models"), "models");
/// ```
#[must_use]
pub fn last_segment(name: &str) -> &str {
    name.rsplit_once(SEPARATOR).map_or(name, |(_, last)| last)
}

/// Returns the name of the immediate parent, if any.
#[must_use]
pub fn parent(name: &str) -> Option<&str> {
    name.rsplit_once(SEPARATOR).map(|(head, _)| head)
}

/// Iterates over the segments of a name.
pub fn segments(name: &str) -> core::str::Split<'_, char> {
    name.split(SEPARATOR)
}

/// Joins a package name and a relative child name.
#[must_use]
pub fn join(package: &str, child: &str) -> String {
    format!("{package}{SEPARATOR}{child}")
}

/// Returns true if `segment` can be used as a single name segment.
///
/// Segments are non-empty, contain no separator, no wildcard and no
/// whitespace.
#[must_use]
pub fn is_valid_segment(segment: &str) -> bool {
    !segment.is_empty()
        && segment != WILDCARD
        && !segment
            .chars()
            .any(|c| c == SEPARATOR || c.is_whitespace())
}

/// Returns true if every segment of `name` is valid.
#[must_use]
pub fn is_valid(name: &str) -> bool {
    segments(name).all(is_valid_segment)
}

/// Returns true if `pattern` matches the leading segments of `name`.
///
/// A `*` segment in the pattern matches exactly one segment. A pattern
/// matching a prefix of `name` matches the whole subtree, so `*.tests`
/// matches `app.tests` and `app.tests.fixtures` but not `app.api.tests`.
#[must_use]
pub fn matches_prefix(pattern: &str, name: &str) -> bool {
    let mut names = segments(name);
    segments(pattern).all(|expected| {
        names
            .next()
            .is_some_and(|actual| expected == WILDCARD || expected == actual)
    })
}

/// Returns true if `pattern` matches the trailing segments of `name`.
///
/// `api.enumerations` matches `my_app.api.enumerations`; a bare `models`
/// matches any name whose last segment is `models`.
#[must_use]
pub fn matches_suffix(pattern: &str, name: &str) -> bool {
    let mut names = name.rsplit(SEPARATOR);
    pattern.rsplit(SEPARATOR).all(|expected| {
        names
            .next()
            .is_some_and(|actual| expected == WILDCARD || expected == actual)
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ancestor_requires_segment_boundary() {
        assert!(is_ancestor_of("app.api", "app.api.v1"));
        assert!(!is_ancestor_of("app.api", "app.apis"));
        assert!(!is_ancestor_of("app.api.v1", "app.api"));
    }

    #[test]
    fn strict_ancestor_excludes_self() {
        assert!(!is_strict_ancestor_of("app", "app"));
        assert!(is_strict_ancestor_of("app", "app.db"));
    }

    #[test]
    fn parent_of_top_level_is_none() {
        assert_eq!(parent("app"), None);
        assert_eq!(parent("app.db.models"), Some("app.db"));
    }

    #[test]
    fn join_builds_qualified_name() {
        assert_eq!(join("app.db", "manager"), "app.db.manager");
    }

    #[test]
    fn validity_rejects_empty_and_wildcard_segments() {
        assert!(is_valid("app.db"));
        assert!(!is_valid(""));
        assert!(!is_valid("app..db"));
        assert!(!is_valid("app.*"));
        assert!(!is_valid("app.my db"));
    }

    #[test]
    fn prefix_pattern_with_wildcard() {
        assert!(matches_prefix("*.tests", "app.tests"));
        assert!(matches_prefix("*.tests", "app.tests.fixtures"));
        assert!(!matches_prefix("*.tests", "app.api.tests"));
        assert!(!matches_prefix("app.api", "app"));
        assert!(matches_prefix("app", "app.api"));
    }

    #[test]
    fn suffix_pattern_matches_trailing_segments() {
        assert!(matches_suffix("models", "app.db.models"));
        assert!(matches_suffix("db.models", "app.db.models"));
        assert!(!matches_suffix("api.models", "app.db.models"));
        assert!(!matches_suffix("app.db.models", "db.models"));
        assert!(!matches_suffix("models", "app.db.mymodels"));
    }
}
