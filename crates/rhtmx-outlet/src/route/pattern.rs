/// Pattern matching for joined route patterns
///
/// A route chain's path segments are joined with `/` and resolved against a
/// base reference before being matched here. Segment syntax:
///
/// - `about` → static text
/// - `:id` → required parameter
/// - `:id?` → optional parameter
/// - `*slug` → catch-all, one or more segments
/// - `*slug?` → optional catch-all, zero or more segments
/// - `*` → anonymous wildcard, zero or more segments, captured as `"0"`
use std::collections::HashMap;

use crate::path::{normalize_path, resolve_path};

/// Captured parameters (name → value)
pub type Params = HashMap<String, String>;

/// Typed view of a single pattern segment
///
/// # Examples
///
/// ```
/// use rhtmx_outlet::route::pattern::{classify_segment, PatternSegment};
///
/// assert_eq!(classify_segment("about"), PatternSegment::Static("about"));
/// assert_eq!(classify_segment(":id"), PatternSegment::Required("id"));
/// assert_eq!(classify_segment(":id?"), PatternSegment::Optional("id"));
/// assert_eq!(classify_segment("*slug"), PatternSegment::CatchAll("slug"));
/// assert_eq!(classify_segment("*"), PatternSegment::OptionalCatchAll("0"));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PatternSegment<'a> {
    /// `*name`: one or more segments
    CatchAll(&'a str),
    /// `*name?` or `*`: zero or more segments
    OptionalCatchAll(&'a str),
    /// `:name?`
    Optional(&'a str),
    /// `:name`
    Required(&'a str),
    /// Literal text
    Static(&'a str),
}

/// Classifies a pattern segment (pure function)
pub fn classify_segment(segment: &str) -> PatternSegment<'_> {
    if segment == "*" {
        return PatternSegment::OptionalCatchAll("0");
    }

    if let Some(name) = segment.strip_prefix('*') {
        return match name.strip_suffix('?') {
            Some(name) => PatternSegment::OptionalCatchAll(name),
            None => PatternSegment::CatchAll(name),
        };
    }

    match segment.strip_prefix(':') {
        Some(name) => match name.strip_suffix('?') {
            Some(name) => PatternSegment::Optional(name),
            None => PatternSegment::Required(name),
        },
        None => PatternSegment::Static(segment),
    }
}

/// Matches a canonical pattern against a canonical path
///
/// Both arguments are split on `/`; empty segments are ignored. Returns the
/// captured parameters on success. Catch-alls may be followed by further
/// segments and prefer the longest capture; an optional parameter consumes a
/// segment when that still lets the rest of the pattern match.
///
/// # Examples
///
/// ```
/// use rhtmx_outlet::route::pattern::match_pattern;
///
/// let params = match_pattern("/users/:id", "/users/42", false).unwrap();
/// assert_eq!(params.get("id"), Some(&"42".to_string()));
///
/// assert!(match_pattern("/users/:id", "/users", false).is_none());
/// assert!(match_pattern("*", "/anything/at/all", false).is_some());
/// ```
pub fn match_pattern(pattern: &str, path: &str, case_insensitive: bool) -> Option<Params> {
    let pattern_segments: Vec<&str> = pattern.split('/').filter(|s| !s.is_empty()).collect();
    let path_segments: Vec<&str> = path.split('/').filter(|s| !s.is_empty()).collect();

    fn same_text(a: &str, b: &str, case_insensitive: bool) -> bool {
        if case_insensitive {
            a.eq_ignore_ascii_case(b)
        } else {
            a == b
        }
    }

    // Recursive walk over both segment lists; catch-alls and optionals
    // backtrack, each branch working on its own copy of the captures
    fn match_segments(
        pattern_segments: &[&str],
        path_segments: &[&str],
        mut params: Params,
        case_insensitive: bool,
    ) -> Option<Params> {
        let Some((&head, rest)) = pattern_segments.split_first() else {
            return path_segments.is_empty().then_some(params);
        };

        // Longest capture first, down to `min` segments
        let capture_many = |name: &str, min: usize, params: &Params| {
            (min..=path_segments.len()).rev().find_map(|taken| {
                let mut branch = params.clone();
                branch.insert(name.to_string(), path_segments[..taken].join("/"));
                match_segments(rest, &path_segments[taken..], branch, case_insensitive)
            })
        };

        match classify_segment(head) {
            PatternSegment::CatchAll(name) => capture_many(name, 1, &params),
            PatternSegment::OptionalCatchAll(name) => capture_many(name, 0, &params),
            PatternSegment::Optional(name) => {
                let consumed = path_segments.split_first().and_then(|(&current, remaining)| {
                    let mut branch = params.clone();
                    branch.insert(name.to_string(), current.to_string());
                    match_segments(rest, remaining, branch, case_insensitive)
                });

                consumed.or_else(|| match_segments(rest, path_segments, params, case_insensitive))
            }
            PatternSegment::Required(name) => {
                let (&current, remaining) = path_segments.split_first()?;
                params.insert(name.to_string(), current.to_string());
                match_segments(rest, remaining, params, case_insensitive)
            }
            PatternSegment::Static(text) => {
                let (&current, remaining) = path_segments.split_first()?;
                if !same_text(text, current, case_insensitive) {
                    return None;
                }
                match_segments(rest, remaining, params, case_insensitive)
            }
        }
    }

    match_segments(&pattern_segments, &path_segments, HashMap::new(), case_insensitive)
}

/// Tests a candidate path against a `/`-joined pattern relative to a base
///
/// This is the seam for swapping in a different pattern dialect.
pub trait PatternMatcher: Send + Sync {
    /// Returns captured parameters when `path` matches `pattern` resolved against `base`
    fn matches(&self, path: &str, pattern: &str, base: &str) -> Option<Params>;
}

/// Default segment-based matcher
#[derive(Debug, Clone, Default)]
pub struct SegmentMatcher {
    case_insensitive: bool,
}

impl SegmentMatcher {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder: sets case-insensitive matching
    pub fn with_case_insensitive(mut self, case_insensitive: bool) -> Self {
        self.case_insensitive = case_insensitive;
        self
    }
}

impl PatternMatcher for SegmentMatcher {
    fn matches(&self, path: &str, pattern: &str, base: &str) -> Option<Params> {
        let pattern = resolve_path(base, pattern);
        let path = if path.starts_with('/') {
            normalize_path(path).into_owned()
        } else {
            resolve_path(base, path)
        };
        match_pattern(&pattern, &path, self.case_insensitive)
    }
}
