/// Author-facing route declarations
///
/// A declaration tree is immutable input: the route table is derived from it
/// once per `set_routes` call.
use std::fmt;
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::animation::AnimationPair;
use crate::dom::Element;

pub type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

/// Zero-argument constructor for a view element
#[derive(Clone)]
pub struct ViewConstructor(Arc<dyn Fn() -> Element + Send + Sync>);

impl ViewConstructor {
    pub fn new<F>(construct: F) -> Self
    where
        F: Fn() -> Element + Send + Sync + 'static,
    {
        Self(Arc::new(construct))
    }

    /// Constructor producing a bare element with `tag`
    pub fn tag(tag: impl Into<String>) -> Self {
        let tag = tag.into();
        Self::new(move || Element::new(tag.clone()))
    }

    pub fn construct(&self) -> Element {
        (self.0)()
    }
}

impl fmt::Debug for ViewConstructor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("ViewConstructor(..)")
    }
}

type FactoryFn =
    dyn Fn() -> BoxFuture<'static, anyhow::Result<Option<ViewConstructor>>> + Send + Sync;

/// Lazily loads a view before it is mounted
///
/// Resolving to `None` means "no view type": the navigator falls back to the
/// declared view tag.
#[derive(Clone)]
pub struct ViewFactory(Arc<FactoryFn>);

impl ViewFactory {
    pub fn new<F, Fut>(load: F) -> Self
    where
        F: Fn() -> Fut + Send + Sync + 'static,
        Fut: Future<Output = anyhow::Result<Option<ViewConstructor>>> + Send + 'static,
    {
        Self(Arc::new(move || {
            let loading: BoxFuture<'static, anyhow::Result<Option<ViewConstructor>>> =
                Box::pin(load());
            loading
        }))
    }

    pub async fn load(&self) -> anyhow::Result<Option<ViewConstructor>> {
        (self.0)().await
    }
}

impl fmt::Debug for ViewFactory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("ViewFactory(..)")
    }
}

/// One node of the route declaration tree
///
/// A node with both a redirect and children is legal; once the node itself
/// matches, the redirect wins.
///
/// # Examples
///
/// ```
/// use rhtmx_outlet::{AnimationPair, RouteDeclaration};
///
/// let routes = vec![
///     RouteDeclaration::new("")
///         .with_view("app-shell")
///         .with_children(vec![
///             RouteDeclaration::new("users/:id")
///                 .with_name("user")
///                 .with_view("user-view")
///                 .with_animation(AnimationPair::fade(200)),
///         ]),
///     RouteDeclaration::new("legacy").with_redirect("users/1"),
/// ];
/// assert_eq!(routes[0].children.len(), 1);
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RouteDeclaration {
    /// Pattern segment, joined with ancestors using `/`
    pub path: String,

    #[serde(default)]
    pub name: Option<String>,

    /// Tag of the element to create when no factory provides a view
    #[serde(default, rename = "view")]
    pub view_id: Option<String>,

    #[serde(skip)]
    pub factory: Option<ViewFactory>,

    #[serde(default)]
    pub animation: Option<AnimationPair>,

    #[serde(default, rename = "redirect")]
    pub redirect_target: Option<String>,

    #[serde(default)]
    pub children: Vec<RouteDeclaration>,
}

impl RouteDeclaration {
    pub fn new(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            ..Default::default()
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn with_view(mut self, view_id: impl Into<String>) -> Self {
        self.view_id = Some(view_id.into());
        self
    }

    /// Builder: lazily loaded view
    ///
    /// ```
    /// use rhtmx_outlet::{Element, RouteDeclaration, ViewConstructor};
    ///
    /// let route = RouteDeclaration::new("settings").with_factory(|| async {
    ///     Ok(Some(ViewConstructor::new(|| Element::new("settings-view"))))
    /// });
    /// assert!(route.factory.is_some());
    /// ```
    pub fn with_factory<F, Fut>(mut self, load: F) -> Self
    where
        F: Fn() -> Fut + Send + Sync + 'static,
        Fut: Future<Output = anyhow::Result<Option<ViewConstructor>>> + Send + 'static,
    {
        self.factory = Some(ViewFactory::new(load));
        self
    }

    pub fn with_animation(mut self, animation: AnimationPair) -> Self {
        self.animation = Some(animation);
        self
    }

    pub fn with_redirect(mut self, target: impl Into<String>) -> Self {
        self.redirect_target = Some(target.into());
        self
    }

    pub fn with_child(mut self, child: RouteDeclaration) -> Self {
        self.children.push(child);
        self
    }

    pub fn with_children<I>(mut self, children: I) -> Self
    where
        I: IntoIterator<Item = RouteDeclaration>,
    {
        self.children.extend(children);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_factory_loads_constructor() {
        let factory = ViewFactory::new(|| async { Ok(Some(ViewConstructor::tag("lazy-view"))) });
        let constructor = factory.load().await.unwrap().unwrap();
        assert_eq!(constructor.construct().tag(), "lazy-view");
    }

    #[tokio::test]
    async fn test_factory_may_yield_nothing() {
        let factory = ViewFactory::new(|| async { Ok(None) });
        assert!(factory.load().await.unwrap().is_none());
    }

    #[test]
    fn test_constructor_builds_fresh_elements() {
        let constructor = ViewConstructor::tag("x-view");
        assert_ne!(constructor.construct(), constructor.construct());
    }

    #[test]
    fn test_deserialize_nested_declarations() {
        let routes: Vec<RouteDeclaration> = serde_json::from_str(
            r#"[{"path": "docs", "view": "docs-view",
                 "children": [{"path": "*rest", "name": "doc-page"}]},
                {"path": "old-docs", "redirect": "docs"}]"#,
        )
        .unwrap();

        assert_eq!(routes[0].view_id.as_deref(), Some("docs-view"));
        assert_eq!(routes[0].children[0].name.as_deref(), Some("doc-page"));
        assert_eq!(routes[1].redirect_target.as_deref(), Some("docs"));
        assert!(routes[1].factory.is_none());
    }
}
