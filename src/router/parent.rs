//! Parent resolution for "back" navigation.
//!
//! The parent of a path is found by walking *up the literal path*, not the
//! screen tree: segments are dropped one at a time until some registered
//! screen matches the remaining prefix. Intermediate levels without a screen
//! are skipped.

use super::registry::ScreenRegistry;

/// Find the nearest ancestor of `path` matched by a registered screen.
///
/// Returns `None` if `path` is not rooted at `/` or if no ancestor matches.
/// Dropping every segment yields the root candidate `/`.
pub fn find_parent(path: &str, screens: &ScreenRegistry) -> Option<String> {
    if !path.starts_with('/') {
        return None;
    }

    let mut segments: Vec<&str> = path.split('/').collect();
    while segments.len() > 1 {
        segments.pop();
        let candidate = match segments.join("/") {
            joined if joined.is_empty() => "/".to_owned(),
            joined => joined,
        };
        if screens.matches_any(&candidate) {
            return Some(candidate);
        }
    }

    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::router::registry::Screen;

    fn screens(paths: &[&str]) -> ScreenRegistry {
        let mut registry = ScreenRegistry::new();
        for (i, path) in paths.iter().enumerate() {
            registry
                .add(Screen::new(format!("screen-{i}"), *path))
                .unwrap();
        }
        registry
    }

    #[test]
    fn parent_of_child_is_root() {
        let registry = screens(&["/test", "/"]);
        assert_eq!(find_parent("/test", &registry).as_deref(), Some("/"));
    }

    #[test]
    fn parent_is_matched_by_pattern_not_screen_path() {
        let registry = screens(&["/test/:id", "/test"]);
        assert_eq!(find_parent("/test/123", &registry).as_deref(), Some("/test"));
    }

    #[test]
    fn unmatched_levels_are_skipped() {
        let registry = screens(&["/test/:id/:subId", "/test"]);
        assert_eq!(
            find_parent("/test/123/456", &registry).as_deref(),
            Some("/test")
        );
    }

    #[test]
    fn parameterized_parent() {
        let registry = screens(&["/product/:id", "/product/:id/reviews"]);
        assert_eq!(
            find_parent("/product/7/reviews", &registry).as_deref(),
            Some("/product/7")
        );
    }

    #[test]
    fn non_rooted_path_has_no_parent() {
        let registry = screens(&["/", "/test"]);
        assert_eq!(find_parent("test/123", &registry), None);
    }

    #[test]
    fn no_registered_ancestor() {
        let registry = screens(&["/other"]);
        assert_eq!(find_parent("/test/123", &registry), None);
    }

    #[test]
    fn registry_delegates() {
        let registry = screens(&["/", "/a/b"]);
        assert_eq!(registry.find_parent("/a/b").as_deref(), Some("/"));
    }
}
