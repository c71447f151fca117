//! Turning a matched chain into concrete view elements

use crate::dom::Element;
use crate::error::{NavigationError, Result};
use crate::route::{Chain, ViewConstructor};

/// Where the element for one depth comes from, resolved once per navigation
#[derive(Debug, Clone)]
pub enum ViewSource {
    /// The depth's factory provided a view type
    Constructed(ViewConstructor),
    /// No view type; use the declared view tag
    Tag(String),
    /// Neither a view type nor a tag
    Default,
}

impl ViewSource {
    /// Runs the depth's factory (if any) and falls back to its declared tag
    pub async fn resolve(chain: &Chain, depth: usize) -> anyhow::Result<Self> {
        if let Some(factory) = chain.factories.get(depth).and_then(Option::as_ref) {
            if let Some(constructor) = factory.load().await? {
                return Ok(ViewSource::Constructed(constructor));
            }
        }

        Ok(match chain.view_ids.get(depth).cloned().flatten() {
            Some(tag) => ViewSource::Tag(tag),
            None => ViewSource::Default,
        })
    }

    pub fn into_element(self, default_tag: &str) -> Element {
        match self {
            ViewSource::Constructed(constructor) => constructor.construct(),
            ViewSource::Tag(tag) => Element::new(tag),
            ViewSource::Default => Element::new(default_tag),
        }
    }
}

/// Builds one element per depth, in ascending depth order
///
/// Factories run one after another: a deeper view may rely on a shallower
/// one having loaded first. Each element carries its depth's animation pair.
pub async fn materialize(chain: &Chain, path: &str, default_tag: &str) -> Result<Vec<Element>> {
    let mut views = Vec::with_capacity(chain.len());

    for depth in 0..chain.len() {
        let source = ViewSource::resolve(chain, depth)
            .await
            .map_err(|source| NavigationError::View {
                path: path.to_string(),
                depth,
                source,
            })?;

        let element = source.into_element(default_tag);
        if let Some(animation) = chain.animations.get(depth).cloned().flatten() {
            element.set_animation(Some(animation));
        }
        tracing::trace!(depth, tag = element.tag(), "materialized view");
        views.push(element);
    }

    Ok(views)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::animation::AnimationPair;
    use crate::route::{flatten, RouteDeclaration};
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    #[tokio::test]
    async fn test_fallback_order() {
        let chains = flatten(&[RouteDeclaration::new("")
            .with_factory(|| async { Ok(Some(ViewConstructor::tag("lazy-shell"))) })
            .with_child(
                RouteDeclaration::new("a")
                    .with_view("a-view")
                    .with_factory(|| async { Ok(None) })
                    .with_child(RouteDeclaration::new("b")),
            )]);

        let views = materialize(&chains[2], "/a/b", "div").await.unwrap();
        let tags: Vec<&str> = views.iter().map(Element::tag).collect();
        assert_eq!(tags, vec!["lazy-shell", "a-view", "div"]);
    }

    #[tokio::test]
    async fn test_attaches_animation_metadata() {
        let chains = flatten(&[RouteDeclaration::new("a")
            .with_view("a-view")
            .with_animation(AnimationPair::fade(50))]);

        let views = materialize(&chains[0], "/a", "div").await.unwrap();
        assert_eq!(views[0].animation(), Some(AnimationPair::fade(50)));
    }

    #[tokio::test]
    async fn test_factories_run_sequentially_once_each() {
        let calls = Arc::new(AtomicUsize::new(0));
        let (outer, inner) = (calls.clone(), calls.clone());

        let chains = flatten(&[RouteDeclaration::new("a")
            .with_factory(move || {
                let calls = outer.clone();
                async move {
                    assert_eq!(calls.fetch_add(1, Ordering::SeqCst), 0);
                    Ok(None)
                }
            })
            .with_child(RouteDeclaration::new("b").with_factory(move || {
                let calls = inner.clone();
                async move {
                    assert_eq!(calls.fetch_add(1, Ordering::SeqCst), 1);
                    Ok(None)
                }
            }))]);

        materialize(&chains[1], "/a/b", "div").await.unwrap();
        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn test_factory_failure_reports_depth() {
        let chains = flatten(&[RouteDeclaration::new("a")
            .with_child(RouteDeclaration::new("b").with_factory(|| async {
                Err(anyhow::anyhow!("chunk failed to load"))
            }))]);

        let err = materialize(&chains[1], "/a/b", "div").await.unwrap_err();
        assert!(matches!(err, NavigationError::View { depth: 1, .. }));
    }
}
