//! Outlet reconciliation
//!
//! Walks the mounted tree one depth at a time against the desired view chain:
//!
//! 1. Chain exhausted: tear down every child of the current parent.
//! 2. Otherwise tear down children whose kind differs from the desired view.
//! 3. If nothing is left, insert the desired view and play its enter animation.
//! 4. Recurse into the first child.
//!
//! Teardown is bottom-up: descendants go (with their exit animations) before
//! their ancestor. Elements that already match are retained without replaying
//! anything.

use std::sync::Arc;

use tracing::{debug, trace};

use crate::animation::{Animator, Transition};
use crate::dom::Element;
use crate::error::{NavigationError, Result};
use crate::route::BoxFuture;

pub struct Reconciler {
    animator: Arc<dyn Animator>,
}

impl Reconciler {
    pub fn new(animator: Arc<dyn Animator>) -> Self {
        Self { animator }
    }

    /// Mutates `root`'s subtree to mirror `desired`
    pub async fn reconcile(&self, root: &Element, desired: &[Element]) -> Result<()> {
        self.reconcile_at(root.clone(), desired, 0).await
    }

    fn reconcile_at<'a>(
        &'a self,
        parent: Element,
        desired: &'a [Element],
        depth: usize,
    ) -> BoxFuture<'a, Result<()>> {
        Box::pin(async move {
            let Some(view) = desired.get(depth) else {
                for child in parent.children() {
                    self.tear_down(child).await?;
                }
                return Ok(());
            };

            for child in parent.children() {
                if !child.is_same_kind(view) {
                    self.tear_down(child).await?;
                }
            }

            let next = match parent.first_child() {
                Some(existing) => {
                    trace!(depth, tag = existing.tag(), "retained");
                    existing
                }
                None => {
                    parent.prepend(view);
                    debug!(depth, tag = view.tag(), parent = parent.tag(), "inserted view");
                    self.play(view, Transition::Enter).await?;
                    view.clone()
                }
            };

            self.reconcile_at(next, desired, depth + 1).await
        })
    }

    /// Removes `element` after its descendants, each playing its exit animation
    fn tear_down(&self, element: Element) -> BoxFuture<'_, Result<()>> {
        Box::pin(async move {
            for child in element.children() {
                self.tear_down(child).await?;
            }

            self.play(&element, Transition::Exit).await?;
            element.remove();
            debug!(tag = element.tag(), "removed view");
            Ok(())
        })
    }

    /// Stop-then-play; the play half is skipped when no animation is attached
    async fn play(&self, element: &Element, transition: Transition) -> Result<()> {
        let failed = |source: anyhow::Error| NavigationError::Animation {
            tag: element.tag().to_string(),
            source,
        };

        self.animator.stop_animations(element).await.map_err(failed)?;

        if let Some(pair) = element.animation() {
            let animation = transition.select(&pair);
            self.animator
                .animate_to(element, &animation.keyframes, &animation.options)
                .await
                .map_err(failed)?;
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::animation::NoopAnimator;
    use pretty_assertions::assert_eq;

    fn reconciler() -> Reconciler {
        Reconciler::new(Arc::new(NoopAnimator))
    }

    #[tokio::test]
    async fn test_mounts_into_empty_outlet() {
        let outlet = Element::new("outlet");
        let chain = [Element::new("shell"), Element::new("page")];

        reconciler().reconcile(&outlet, &chain).await.unwrap();
        assert_eq!(outlet.describe(), "outlet(shell(page))");
        assert_eq!(outlet.first_child(), Some(chain[0].clone()));
    }

    #[tokio::test]
    async fn test_retains_matching_prefix() {
        let shell = Element::new("shell").with_children([Element::new("old-page")]);
        let outlet = Element::new("outlet").with_children([shell.clone()]);

        let chain = [Element::new("shell"), Element::new("new-page")];
        reconciler().reconcile(&outlet, &chain).await.unwrap();

        assert_eq!(outlet.describe(), "outlet(shell(new-page))");
        // The mounted shell survives; the fresh one is never inserted
        assert_eq!(outlet.first_child(), Some(shell));
        assert!(!chain[0].is_attached());
    }

    #[tokio::test]
    async fn test_shorter_chain_tears_down_tail() {
        let outlet = Element::new("outlet").with_children([Element::new("shell")
            .with_children([Element::new("page").with_children([Element::new("detail")])])]);

        reconciler()
            .reconcile(&outlet, &[Element::new("shell")])
            .await
            .unwrap();
        assert_eq!(outlet.describe(), "outlet(shell)");
    }

    #[tokio::test]
    async fn test_removes_every_mismatched_sibling() {
        let outlet = Element::new("outlet").with_children([
            Element::new("stale-a"),
            Element::new("page"),
            Element::new("stale-b"),
        ]);

        reconciler()
            .reconcile(&outlet, &[Element::new("page")])
            .await
            .unwrap();
        assert_eq!(outlet.describe(), "outlet(page)");
    }

    #[tokio::test]
    async fn test_empty_chain_clears_outlet() {
        let outlet = Element::new("outlet").with_children([Element::new("a"), Element::new("b")]);
        reconciler().reconcile(&outlet, &[]).await.unwrap();
        assert_eq!(outlet.describe(), "outlet");
    }
}
