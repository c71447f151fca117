/// Path utilities for normalization and base-relative resolution
///
/// All functions are **pure**: given same input, always produce same output with no side effects.

use std::borrow::Cow;

/// Validates if a path is in canonical form
///
/// # Rules
///
/// - Must start with `/`
/// - Must not contain `//` or `\`
/// - Must not end with `/` (except root `/`)
/// - Must not be empty
///
/// # Examples
///
/// ```
/// use rhtmx_outlet::path::is_canonical;
///
/// assert!(is_canonical("/"));
/// assert!(is_canonical("/users/123"));
///
/// assert!(!is_canonical(""));
/// assert!(!is_canonical("about"));
/// assert!(!is_canonical("/about/"));
/// assert!(!is_canonical("/about//page"));
/// ```
pub fn is_canonical(path: &str) -> bool {
    if path.is_empty() || !path.starts_with('/') {
        return false;
    }

    if path.contains("//") || path.contains('\\') {
        return false;
    }

    path == "/" || !path.ends_with('/')
}

/// Normalize a path to canonical form
///
/// Returns `Cow::Borrowed` when input is already canonical (zero allocations).
///
/// - Trailing slashes: `/path/` → `/path`
/// - Double slashes: `/path//to` → `/path/to`
/// - Backslashes: `\path\to` → `/path/to`
/// - Missing leading slash: `path/to` → `/path/to`
///
/// # Examples
///
/// ```
/// use rhtmx_outlet::path::normalize_path;
/// use std::borrow::Cow;
///
/// assert!(matches!(normalize_path("/about"), Cow::Borrowed("/about")));
/// assert_eq!(normalize_path("/path//to///page/"), "/path/to/page");
/// assert_eq!(normalize_path("home"), "/home");
/// ```
pub fn normalize_path(path: &str) -> Cow<'_, str> {
    if is_canonical(path) {
        return Cow::Borrowed(path);
    }

    let normalized = path
        .replace('\\', "/")
        .split('/')
        .filter(|s| !s.is_empty())
        .collect::<Vec<_>>()
        .join("/");

    if normalized.is_empty() {
        Cow::Borrowed("/")
    } else {
        Cow::Owned(format!("/{}", normalized))
    }
}

/// Resolves `path` against a base reference
///
/// Absolute paths (leading `/`) ignore the base; relative paths are
/// appended to it. The result is always canonical.
///
/// # Examples
///
/// ```
/// use rhtmx_outlet::path::resolve_path;
///
/// assert_eq!(resolve_path("/", "users/:id"), "/users/:id");
/// assert_eq!(resolve_path("/app/", "users"), "/app/users");
/// assert_eq!(resolve_path("/app", "/users"), "/users");
/// ```
pub fn resolve_path(base: &str, path: &str) -> String {
    if path.starts_with('/') || path.starts_with('\\') {
        return normalize_path(path).into_owned();
    }

    normalize_path(&format!("{}/{}", base, path)).into_owned()
}
