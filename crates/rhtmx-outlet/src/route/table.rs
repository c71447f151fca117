/// Flattened route table and first-match lookup
///
/// The table is built once from a declaration tree and treated as read-only
/// afterwards; `set_routes` replaces it wholesale.
use crate::path::resolve_path;
use crate::route::chain::{flatten, Chain};
use crate::route::declaration::RouteDeclaration;
use crate::route::pattern::{classify_segment, Params, PatternMatcher, PatternSegment};

/// Result of matching a path against the table
#[derive(Debug, Clone)]
pub struct RouteMatch<'a> {
    pub chain: &'a Chain,
    pub params: Params,
}

#[derive(Debug, Clone, Default)]
pub struct RouteTable {
    chains: Vec<Chain>,
    /// Joined pattern of each chain, index-aligned with `chains`
    patterns: Vec<String>,
}

impl RouteTable {
    /// Builds the table from a declaration tree (pre-order flattening)
    pub fn build(declarations: &[RouteDeclaration]) -> Self {
        let chains = flatten(declarations);
        let patterns = chains.iter().map(Chain::pattern).collect();
        Self { chains, patterns }
    }

    pub fn chains(&self) -> &[Chain] {
        &self.chains
    }

    pub fn len(&self) -> usize {
        self.chains.len()
    }

    pub fn is_empty(&self) -> bool {
        self.chains.is_empty()
    }

    /// Returns the first chain, in table order, whose joined pattern matches `path`
    ///
    /// Table order is declaration pre-order, so an ancestor's own pattern is
    /// tried before any descendant's and earlier siblings shadow later ones.
    ///
    /// # Examples
    ///
    /// ```
    /// use rhtmx_outlet::route::{RouteDeclaration, RouteTable, SegmentMatcher};
    ///
    /// let table = RouteTable::build(&[
    ///     RouteDeclaration::new("*").with_name("any"),
    ///     RouteDeclaration::new("users").with_name("users"),
    /// ]);
    ///
    /// let found = table.match_route("/users", "/", &SegmentMatcher::new()).unwrap();
    /// assert_eq!(found.chain.name.as_deref(), Some("any"));
    /// ```
    pub fn match_route(
        &self,
        path: &str,
        base: &str,
        matcher: &dyn PatternMatcher,
    ) -> Option<RouteMatch<'_>> {
        self.chains
            .iter()
            .zip(&self.patterns)
            .find_map(|(chain, pattern)| {
                matcher
                    .matches(path, pattern, base)
                    .map(|params| RouteMatch { chain, params })
            })
    }

    /// First chain declared with `name`
    pub fn find_by_name(&self, name: &str) -> Option<&Chain> {
        self.position_of(name).map(|index| &self.chains[index])
    }

    fn position_of(&self, name: &str) -> Option<usize> {
        self.chains
            .iter()
            .position(|chain| chain.name.as_deref() == Some(name))
    }

    /// Generates a path for a named route by substituting parameters
    ///
    /// Returns `None` if the name is unknown or a required parameter is missing.
    ///
    /// # Examples
    ///
    /// ```
    /// use rhtmx_outlet::route::{Params, RouteDeclaration, RouteTable};
    ///
    /// let table = RouteTable::build(&[RouteDeclaration::new("users")
    ///     .with_child(RouteDeclaration::new(":id").with_name("user"))]);
    ///
    /// let params = Params::from([("id".to_string(), "42".to_string())]);
    /// assert_eq!(table.url_for("user", &params, "/"), Some("/users/42".to_string()));
    /// assert_eq!(table.url_for("user", &Params::new(), "/"), None);
    /// ```
    pub fn url_for(&self, name: &str, params: &Params, base: &str) -> Option<String> {
        let pattern = resolve_path(base, &self.patterns[self.position_of(name)?]);

        let segments: Option<Vec<String>> = pattern
            .split('/')
            .filter(|s| !s.is_empty())
            .map(|segment| match classify_segment(segment) {
                PatternSegment::Static(text) => Some(text.to_string()),
                PatternSegment::Required(param) | PatternSegment::CatchAll(param) => {
                    params.get(param).cloned()
                }
                PatternSegment::Optional(param) | PatternSegment::OptionalCatchAll(param) => {
                    Some(params.get(param).cloned().unwrap_or_default())
                }
            })
            .collect();

        segments.map(|segments| {
            let filtered: Vec<String> = segments.into_iter().filter(|s| !s.is_empty()).collect();
            format!("/{}", filtered.join("/"))
        })
    }
}
