/// Flattened root-to-node route records
///
/// Every declared node (internal or leaf) yields one [`Chain`]. Index `i` of
/// each per-depth sequence describes ancestor `i`; the last index describes
/// the node itself.
use crate::animation::AnimationPair;
use crate::route::declaration::{RouteDeclaration, ViewFactory};

#[derive(Debug, Clone, Default)]
pub struct Chain {
    /// Name of the declaring node only (never inherited)
    pub name: Option<String>,
    pub path_segments: Vec<String>,
    pub view_ids: Vec<Option<String>>,
    pub factories: Vec<Option<ViewFactory>>,
    pub animations: Vec<Option<AnimationPair>>,
    pub redirects: Vec<Option<String>>,
}

impl Chain {
    /// Copy-on-append: clones this chain's sequences and appends `declaration`
    ///
    /// The result never shares storage with `self`, so mutating one chain
    /// cannot alter another's history.
    pub fn descend(&self, declaration: &RouteDeclaration) -> Chain {
        let mut chain = self.clone();
        chain.name = declaration.name.clone();
        chain.path_segments.push(declaration.path.clone());
        chain.view_ids.push(declaration.view_id.clone());
        chain.factories.push(declaration.factory.clone());
        chain.animations.push(declaration.animation.clone());
        chain.redirects.push(declaration.redirect_target.clone());
        chain
    }

    /// Number of depths (declaring node's depth + 1)
    pub fn len(&self) -> usize {
        self.path_segments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.path_segments.is_empty()
    }

    /// Path segments joined with `/`
    pub fn pattern(&self) -> String {
        self.path_segments.join("/")
    }

    /// The declaring node's own redirect target; ancestors' redirects are ignored
    pub fn redirect(&self) -> Option<&str> {
        self.redirects.last().and_then(|r| r.as_deref())
    }
}

/// Flattens a declaration tree into chains, in pre-order
///
/// Parents come before their children; siblings keep declared order. An empty
/// tree yields an empty list.
///
/// # Examples
///
/// ```
/// use rhtmx_outlet::route::{flatten, RouteDeclaration};
///
/// let chains = flatten(&[RouteDeclaration::new("a")
///     .with_children(vec![RouteDeclaration::new("b"), RouteDeclaration::new("c")])]);
///
/// let patterns: Vec<String> = chains.iter().map(|c| c.pattern()).collect();
/// assert_eq!(patterns, vec!["a", "a/b", "a/c"]);
/// ```
pub fn flatten(declarations: &[RouteDeclaration]) -> Vec<Chain> {
    fn visit(declarations: &[RouteDeclaration], parent: &Chain, out: &mut Vec<Chain>) {
        for declaration in declarations {
            let chain = parent.descend(declaration);
            out.push(chain.clone());
            visit(&declaration.children, &chain, out);
        }
    }

    let mut chains = Vec::new();
    visit(declarations, &Chain::default(), &mut chains);
    chains
}
