//! Path normalization shared by registry keys and dispatch lookups.

/// Normalizes paths against a base directory.
///
/// Callers register callbacks with paths relative to the watch root (`foo`,
/// `/foo`) or absolute (`<root>/foo`), and the event loop reports paths
/// relative to the root. Passing every one of them through the same matcher
/// makes them resolve to the same registry key.
///
/// # Examples
///
/// ```rust
/// use fswatch_hooks::core::PathMatcher;
///
/// let matcher = PathMatcher::new("/srv/watch");
/// assert_eq!(matcher.normalize("foo"), "/srv/watch/foo");
/// assert_eq!(matcher.normalize("/foo"), "/srv/watch/foo");
/// assert_eq!(matcher.normalize("/srv/watch/foo"), "/srv/watch/foo");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathMatcher {
    base: String,
    alias: Option<String>,
}

impl PathMatcher {
    /// Create a matcher for the given base directory.
    ///
    /// The base is cleaned once here so that every normalized path starts with
    /// it verbatim. An empty base disables normalization entirely.
    pub fn new(base: impl AsRef<str>) -> Self {
        let base = base.as_ref();
        let base = if base.is_empty() {
            String::new()
        } else {
            clean(base)
        };
        Self { base, alias: None }
    }

    /// Also accept `alias` as another spelling of the base.
    ///
    /// Paths under the alias are rewritten onto the base, so a root reached
    /// through a symlink and its resolved form key the same. An alias that
    /// is empty, relative, or equal to the base is ignored.
    ///
    /// ```rust
    /// use fswatch_hooks::core::PathMatcher;
    ///
    /// let matcher = PathMatcher::new("/data/watch").with_alias("/srv/watch");
    /// assert_eq!(matcher.normalize("/srv/watch/foo"), "/data/watch/foo");
    /// assert_eq!(matcher.normalize("foo"), "/data/watch/foo");
    /// ```
    pub fn with_alias(mut self, alias: impl AsRef<str>) -> Self {
        let alias = alias.as_ref();
        self.alias = if alias.starts_with('/') && !self.base.is_empty() {
            Some(clean(alias)).filter(|alias| *alias != self.base)
        } else {
            None
        };
        self
    }

    /// The cleaned base directory.
    pub fn base(&self) -> &str {
        &self.base
    }

    /// The accepted alias of the base, if any.
    pub fn alias(&self) -> Option<&str> {
        self.alias.as_deref()
    }

    /// Normalize `raw` against the base directory.
    ///
    /// Paths already under the base are returned unchanged. Anything else is
    /// joined onto the base with redundant separators and `.` segments
    /// collapsed. `..` segments are kept as-is.
    ///
    /// With an alias set, paths under the alias but not the base are moved
    /// onto the base first.
    pub fn normalize(&self, raw: &str) -> String {
        match &self.alias {
            Some(alias) if !has_base_prefix(raw, &self.base) && has_base_prefix(raw, alias) => {
                clean(&format!("{}/{}", self.base, &raw[alias.len()..]))
            }
            _ => normalize(raw, &self.base),
        }
    }
}

/// Normalize `raw` against `base`. See [`PathMatcher::normalize`].
pub fn normalize(raw: &str, base: &str) -> String {
    if has_base_prefix(raw, base) {
        return raw.to_string();
    }
    clean(&format!("{}/{}", base, raw))
}

/// Component-aware prefix check: `/srv/watched` is not under `/srv/watch`.
fn has_base_prefix(raw: &str, base: &str) -> bool {
    if base.is_empty() || base.ends_with('/') {
        return raw.starts_with(base);
    }
    match raw.strip_prefix(base) {
        Some(rest) => rest.is_empty() || rest.starts_with('/'),
        None => false,
    }
}

/// Collapse repeated separators, drop `.` segments and any trailing slash.
fn clean(path: &str) -> String {
    let absolute = path.starts_with('/');
    let body = path
        .split('/')
        .filter(|segment| !segment.is_empty() && *segment != ".")
        .collect::<Vec<_>>()
        .join("/");

    match (absolute, body.is_empty()) {
        (true, _) => format!("/{}", body),
        (false, true) => ".".to_string(),
        (false, false) => body,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_relative_path_is_joined() {
        assert_eq!(normalize("foo", "/srv/watch"), "/srv/watch/foo");
        assert_eq!(normalize("a/b.txt", "/srv/watch"), "/srv/watch/a/b.txt");
    }

    #[test]
    fn test_leading_slash_is_joined() {
        assert_eq!(normalize("/foo", "/srv/watch"), "/srv/watch/foo");
    }

    #[test]
    fn test_path_under_base_is_unchanged() {
        assert_eq!(normalize("/srv/watch/foo", "/srv/watch"), "/srv/watch/foo");
        assert_eq!(normalize("/srv/watch", "/srv/watch"), "/srv/watch");
    }

    #[test]
    fn test_sibling_with_shared_prefix_is_joined() {
        assert_eq!(
            normalize("/srv/watched/foo", "/srv/watch"),
            "/srv/watch/srv/watched/foo"
        );
    }

    #[test]
    fn test_redundant_separators_collapse() {
        assert_eq!(normalize("//foo///bar/", "/srv/watch"), "/srv/watch/foo/bar");
        assert_eq!(normalize("./foo/./bar", "/srv/watch"), "/srv/watch/foo/bar");
    }

    #[test]
    fn test_parent_segments_are_not_resolved() {
        assert_eq!(normalize("../foo", "/srv/watch"), "/srv/watch/../foo");
    }

    #[test]
    fn test_empty_raw_maps_to_base() {
        assert_eq!(normalize("", "/srv/watch"), "/srv/watch");
    }

    #[test]
    fn test_empty_base_leaves_paths_alone() {
        let matcher = PathMatcher::new("");
        assert_eq!(matcher.normalize("/foo"), "/foo");
        assert_eq!(matcher.normalize("foo"), "foo");
    }

    #[test]
    fn test_matcher_cleans_base() {
        let matcher = PathMatcher::new("/srv//watch/");
        assert_eq!(matcher.base(), "/srv/watch");
        assert_eq!(matcher.normalize("foo"), "/srv/watch/foo");
    }

    #[test]
    fn test_root_base() {
        let matcher = PathMatcher::new("/");
        assert_eq!(matcher.normalize("foo"), "/foo");
        assert_eq!(matcher.normalize("/foo"), "/foo");
    }

    #[test]
    fn test_registered_and_observed_forms_agree() {
        let matcher = PathMatcher::new("/srv/watch");
        let key = matcher.normalize("/srv/watch/foo");
        assert_eq!(matcher.normalize("foo"), key);
        assert_eq!(matcher.normalize("/foo"), key);
    }

    #[test]
    fn test_alias_is_rewritten_onto_base() {
        let matcher = PathMatcher::new("/data/watch").with_alias("/srv//watch/");
        assert_eq!(matcher.alias(), Some("/srv/watch"));
        assert_eq!(matcher.normalize("/srv/watch/foo"), "/data/watch/foo");
        assert_eq!(matcher.normalize("/srv/watch"), "/data/watch");
        assert_eq!(matcher.normalize("/data/watch/foo"), "/data/watch/foo");
        assert_eq!(matcher.normalize("/foo"), "/data/watch/foo");
    }

    #[test]
    fn test_alias_prefix_is_component_aware() {
        let matcher = PathMatcher::new("/data/watch").with_alias("/srv/watch");
        assert_eq!(
            matcher.normalize("/srv/watched/foo"),
            "/data/watch/srv/watched/foo"
        );
    }

    #[test]
    fn test_unusable_alias_is_ignored() {
        let base = PathMatcher::new("/srv/watch");
        assert_eq!(base.clone().with_alias("/srv/watch/").alias(), None);
        assert_eq!(base.clone().with_alias("watch").alias(), None);
        assert_eq!(base.with_alias("").alias(), None);
        assert_eq!(PathMatcher::new("").with_alias("/srv").alias(), None);
    }

    proptest! {
        #[test]
        fn prop_normalize_is_idempotent(
            base in "(/[a-z]{1,6}){0,3}/?",
            raw in "[a-z./]{0,24}",
        ) {
            let matcher = PathMatcher::new(&base);
            let once = matcher.normalize(&raw);
            prop_assert_eq!(matcher.normalize(&once), once);
        }

        #[test]
        fn prop_alias_and_relative_forms_agree(
            raw in "[a-z]{1,6}(/[a-z]{1,6}){0,3}",
        ) {
            let matcher = PathMatcher::new("/data/watch").with_alias("/srv/watch");
            let through_alias = matcher.normalize(&format!("/srv/watch/{}", raw));
            prop_assert_eq!(through_alias, matcher.normalize(&raw));
        }

        #[test]
        fn prop_relative_results_live_under_base(
            base in "(/[a-z]{1,6}){1,3}",
            raw in "[a-z]{1,6}(/[a-z]{1,6}){0,3}",
        ) {
            let matcher = PathMatcher::new(&base);
            let normalized = matcher.normalize(&raw);
            let prefix = format!("{}/", matcher.base());
            prop_assert!(normalized.starts_with(&prefix));
        }
    }
}
