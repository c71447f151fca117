//! Navigation controller
//!
//! One navigation, in order:
//!
//! 1. Wait at the gate (FIFO) so navigations never interleave.
//! 2. Match the path against the route table; no match is a silent no-op.
//! 3. Materialize one view element per depth (factories run sequentially).
//! 4. If the matched node redirects, follow the target (bounded by
//!    `max_redirects`) without mounting anything.
//! 5. `before_navigate` hook.
//! 6. Record the path in history and reconcile the outlet.
//! 7. `after_navigate` hook.
//! 8. Reset the redirect counter and release the gate.
//!
//! Reconciliation is awaited before the gate is released, so two
//! reconciliations never touch the outlet at the same time.

use std::sync::Arc;

use async_trait::async_trait;
use serde::Serialize;
use tokio::sync::{Mutex, RwLock};
use tracing::{debug, info, warn};

use crate::animation::Animator;
use crate::config::{Config, RoutingConfig};
use crate::dom::Element;
use crate::error::{NavigationError, Result};
use crate::history::History;
use crate::reconcile::Reconciler;
use crate::route::{Chain, Params, PatternMatcher, RouteDeclaration, RouteTable, SegmentMatcher};
use crate::view::materialize;

/// Extension points around the commit step; both default to no-ops
#[async_trait]
pub trait NavigationHooks: Send + Sync {
    /// Called after redirects are resolved, before history is written
    async fn before_navigate(&self, _path: &str, _chain: &Chain) {}

    /// Called once the outlet has been reconciled
    async fn after_navigate(&self, _path: &str, _chain: &Chain) {}
}

#[derive(Debug, Clone, Copy, Default)]
pub struct NoopHooks;

impl NavigationHooks for NoopHooks {}

/// `Uninitialized` until both an outlet and a route table have been supplied
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Lifecycle {
    #[default]
    Uninitialized,
    Ready,
}

/// The route currently mounted in the outlet
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ActiveRoute {
    pub path: String,
    pub name: Option<String>,
    pub params: Params,
}

#[derive(Default)]
struct State {
    lifecycle: Lifecycle,
    outlet: Option<Element>,
    table: Option<Arc<RouteTable>>,
    redirects: usize,
    active: Option<ActiveRoute>,
}

/// Drives navigations against an outlet element
///
/// # Examples
///
/// ```
/// use std::sync::Arc;
/// use rhtmx_outlet::{Element, MemoryHistory, Navigator, NoopAnimator, RouteDeclaration};
///
/// # #[tokio::main]
/// # async fn main() -> Result<(), rhtmx_outlet::NavigationError> {
/// let history = Arc::new(MemoryHistory::new("/"));
/// let navigator = Navigator::new(history, Arc::new(NoopAnimator));
///
/// let outlet = Element::new("router-outlet");
/// navigator.set_outlet(outlet.clone()).await?;
/// navigator
///     .set_routes(&[
///         RouteDeclaration::new("home").with_view("home-view"),
///         RouteDeclaration::new("away").with_redirect("home"),
///     ])
///     .await?;
///
/// let resolved = navigator.navigate("/away").await?;
/// assert_eq!(resolved.as_deref(), Some("home"));
/// assert_eq!(outlet.describe(), "router-outlet(home-view)");
/// # Ok(())
/// # }
/// ```
pub struct Navigator {
    history: Arc<dyn History>,
    reconciler: Reconciler,
    hooks: Arc<dyn NavigationHooks>,
    matcher: Arc<dyn PatternMatcher>,
    routing: RoutingConfig,
    gate: Mutex<()>,
    state: RwLock<State>,
}

impl Navigator {
    pub fn new(history: Arc<dyn History>, animator: Arc<dyn Animator>) -> Self {
        Self {
            history,
            reconciler: Reconciler::new(animator),
            hooks: Arc::new(NoopHooks),
            matcher: Arc::new(SegmentMatcher::new()),
            routing: RoutingConfig::default(),
            gate: Mutex::new(()),
            state: RwLock::new(State::default()),
        }
    }

    /// Builds a navigator from a loaded [`Config`] and installs its routes
    pub async fn from_config(
        config: Config,
        history: Arc<dyn History>,
        animator: Arc<dyn Animator>,
    ) -> Result<Self> {
        let navigator = Self::new(history, animator).with_config(config.routing);
        navigator.set_routes(&config.routes).await?;
        Ok(navigator)
    }

    pub fn with_hooks(mut self, hooks: Arc<dyn NavigationHooks>) -> Self {
        self.hooks = hooks;
        self
    }

    /// Applies routing settings; resets the matcher to a [`SegmentMatcher`]
    /// honoring `case_insensitive`, so call `with_matcher` afterwards to override it
    pub fn with_config(mut self, routing: RoutingConfig) -> Self {
        self.matcher =
            Arc::new(SegmentMatcher::new().with_case_insensitive(routing.case_insensitive));
        self.routing = routing;
        self
    }

    pub fn with_matcher(mut self, matcher: Arc<dyn PatternMatcher>) -> Self {
        self.matcher = matcher;
        self
    }

    /// Supplies the container element views are mounted into
    ///
    /// If this completes initialization, the initial navigation runs before
    /// returning and its error is returned here. The outlet stays installed
    /// and the navigator stays [`Lifecycle::Ready`] either way.
    pub async fn set_outlet(&self, outlet: Element) -> Result<()> {
        self.state.write().await.outlet = Some(outlet);
        self.initialize().await
    }

    /// Rebuilds the route table, replacing the previous one wholesale
    ///
    /// Like [`Navigator::set_outlet`], an error from the initial navigation is
    /// returned after the table has been installed.
    pub async fn set_routes(&self, declarations: &[RouteDeclaration]) -> Result<()> {
        let table = Arc::new(RouteTable::build(declarations));
        debug!(chains = table.len(), "route table built");
        self.state.write().await.table = Some(table);
        self.initialize().await
    }

    /// First time both outlet and table exist: clear history, then navigate to
    /// the current location
    async fn initialize(&self) -> Result<()> {
        {
            let mut state = self.state.write().await;
            if state.lifecycle == Lifecycle::Ready
                || state.outlet.is_none()
                || state.table.is_none()
            {
                return Ok(());
            }
            state.lifecycle = Lifecycle::Ready;
        }

        self.history.clear_history();
        let path = self.history.get_route();
        info!(path = %path, "navigator ready");
        self.navigate(&path).await.map(|_| ())
    }

    /// Navigates to `path`
    ///
    /// Returns the path that was finally mounted (after redirects), or `None`
    /// when nothing matched or the navigator is not ready yet.
    #[tracing::instrument(skip(self))]
    pub async fn navigate(&self, path: &str) -> Result<Option<String>> {
        // Dropping the guard releases the gate on every exit path
        let _gate = self.gate.lock().await;
        let outcome = self.run(path).await;
        self.state.write().await.redirects = 0;
        outcome
    }

    /// Navigates to a named route, substituting `params` into its pattern
    pub async fn navigate_named(&self, name: &str, params: &Params) -> Result<Option<String>> {
        let url = match self.routes().await {
            Some(table) => table.url_for(name, params, &self.routing.base_path),
            None => None,
        };

        match url {
            Some(url) => self.navigate(&url).await,
            None => {
                debug!(name, "no named route to navigate to");
                Ok(None)
            }
        }
    }

    async fn run(&self, requested: &str) -> Result<Option<String>> {
        let (outlet, table) = {
            let state = self.state.read().await;
            match (state.lifecycle, &state.outlet, &state.table) {
                (Lifecycle::Ready, Some(outlet), Some(table)) => (outlet.clone(), table.clone()),
                _ => {
                    debug!(path = requested, "navigator not ready; ignoring navigation");
                    return Ok(None);
                }
            }
        };

        let base = self.routing.base_path.as_str();
        let mut path = requested.to_string();

        loop {
            let Some(found) = table.match_route(&path, base, self.matcher.as_ref()) else {
                debug!(path = %path, "no route matched");
                return Ok(None);
            };

            let views = materialize(found.chain, &path, &self.routing.default_view_tag).await?;

            if let Some(target) = found.chain.redirect() {
                let hops = self.state.read().await.redirects;
                if hops >= self.routing.max_redirects {
                    warn!(path = %path, hops, "circular redirection");
                    return Err(NavigationError::CircularRedirect { path, hops });
                }

                self.state.write().await.redirects = hops + 1;
                debug!(from = %path, to = target, hop = hops + 1, "following redirect");
                path = target.to_string();
                continue;
            }

            self.hooks.before_navigate(&path, found.chain).await;

            self.history.set_route(&path);
            self.reconciler.reconcile(&outlet, &views).await?;

            self.hooks.after_navigate(&path, found.chain).await;

            self.state.write().await.active = Some(ActiveRoute {
                path: path.clone(),
                name: found.chain.name.clone(),
                params: found.params,
            });
            info!(path = %path, depth = views.len(), "navigated");
            return Ok(Some(path));
        }
    }

    /// Current location, as reported by history
    pub fn location(&self) -> String {
        self.history.get_route()
    }

    pub async fn lifecycle(&self) -> Lifecycle {
        self.state.read().await.lifecycle
    }

    pub async fn current_route(&self) -> Option<ActiveRoute> {
        self.state.read().await.active.clone()
    }

    /// Redirect hops taken by the in-flight navigation (0 when idle)
    pub async fn redirect_count(&self) -> usize {
        self.state.read().await.redirects
    }

    pub async fn outlet(&self) -> Option<Element> {
        self.state.read().await.outlet.clone()
    }

    pub async fn routes(&self) -> Option<Arc<RouteTable>> {
        self.state.read().await.table.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::animation::NoopAnimator;
    use crate::history::MemoryHistory;

    fn navigator(history: Arc<MemoryHistory>) -> Navigator {
        Navigator::new(history, Arc::new(NoopAnimator))
    }

    #[tokio::test]
    async fn test_ready_only_after_outlet_and_routes() {
        let history = Arc::new(MemoryHistory::new("/"));
        let nav = navigator(history);

        nav.set_routes(&[RouteDeclaration::new("")]).await.unwrap();
        assert_eq!(nav.lifecycle().await, Lifecycle::Uninitialized);

        nav.set_outlet(Element::new("outlet")).await.unwrap();
        assert_eq!(nav.lifecycle().await, Lifecycle::Ready);
    }

    #[tokio::test]
    async fn test_failed_initial_navigation_keeps_setup() {
        let history = Arc::new(MemoryHistory::new("/loop"));
        let nav = navigator(history);
        let outlet = Element::new("outlet");

        nav.set_outlet(outlet.clone()).await.unwrap();
        let result = nav
            .set_routes(&[RouteDeclaration::new("loop").with_redirect("loop")])
            .await;

        assert!(matches!(result, Err(NavigationError::CircularRedirect { .. })));
        assert_eq!(nav.lifecycle().await, Lifecycle::Ready);
        assert_eq!(nav.outlet().await, Some(outlet));
        assert_eq!(nav.routes().await.map(|table| table.len()), Some(1));
        assert_eq!(nav.redirect_count().await, 0);
    }

    #[tokio::test]
    async fn test_navigate_before_ready_is_noop() {
        let history = Arc::new(MemoryHistory::new("/"));
        let nav = navigator(history.clone());

        assert_eq!(nav.navigate("/anything").await.unwrap(), None);
        assert_eq!(history.entries(), vec!["/"]);
    }

    #[tokio::test]
    async fn test_initial_navigation_uses_history_location() {
        let history = Arc::new(MemoryHistory::new("/"));
        history.set_route("/start");

        let nav = navigator(history.clone());
        let outlet = Element::new("outlet");
        nav.set_outlet(outlet.clone()).await.unwrap();
        nav.set_routes(&[RouteDeclaration::new("start").with_view("start-view")])
            .await
            .unwrap();

        assert_eq!(outlet.describe(), "outlet(start-view)");
        // Cleared before the first navigation
        assert_eq!(history.entries(), vec!["/start"]);
    }

    #[tokio::test]
    async fn test_with_config_applies_case_insensitivity() {
        let history = Arc::new(MemoryHistory::new("/"));
        let nav = navigator(history).with_config(RoutingConfig {
            case_insensitive: true,
            ..Default::default()
        });

        nav.set_outlet(Element::new("outlet")).await.unwrap();
        nav.set_routes(&[RouteDeclaration::new("Inbox")]).await.unwrap();
        assert_eq!(nav.navigate("/inbox").await.unwrap().as_deref(), Some("/inbox"));
    }
}
