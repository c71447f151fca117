//! # RHTMX Outlet
//!
//! Declarative client-side navigation for RHTMX frontends:
//! - Nested route declarations (`users` → `:id` → `settings`)
//! - Lazily loaded views via async factories, with tag fallbacks
//! - Redirects with circular-redirect protection
//! - Enter/exit transitions played while the outlet is reconciled
//! - One navigation at a time (FIFO gate)
//!
//! ## How it fits together
//!
//! - [`RouteTable`] flattens the declaration tree once, in pre-order, into
//!   root-to-node [`Chain`]s and returns the first chain matching a path.
//! - [`Navigator`] materializes one [`Element`] per chain depth, follows
//!   redirects, writes [`History`] and hands the elements to the reconciler.
//! - The reconciler diffs the mounted tree under the outlet against the new
//!   chain depth by depth: mismatched subtrees leave bottom-up playing their
//!   exit animations, and missing views are inserted playing their enter
//!   animations. Views that already match stay put.
//!
//! ## Example
//!
//! ```
//! use std::sync::Arc;
//! use rhtmx_outlet::{AnimationPair, Element, MemoryHistory, Navigator, NoopAnimator, RouteDeclaration};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), rhtmx_outlet::NavigationError> {
//!     let navigator = Navigator::new(Arc::new(MemoryHistory::new("/")), Arc::new(NoopAnimator));
//!
//!     let outlet = Element::new("router-outlet");
//!     navigator.set_outlet(outlet.clone()).await?;
//!     navigator
//!         .set_routes(&[RouteDeclaration::new("")
//!             .with_view("app-shell")
//!             .with_children(vec![RouteDeclaration::new("users/:id")
//!                 .with_view("user-view")
//!                 .with_animation(AnimationPair::fade(200))])])
//!         .await?;
//!
//!     navigator.navigate("/users/7").await?;
//!     assert_eq!(outlet.describe(), "router-outlet(app-shell(user-view))");
//!     Ok(())
//! }
//! ```

// ============================================================================
// Module Declarations
// ============================================================================

pub mod animation;
pub mod config;
pub mod dom;
pub mod error;
pub mod history;
pub mod navigator;
pub mod path;
pub mod reconcile;
pub mod route;
pub mod view;

// ============================================================================
// Re-exports
// ============================================================================

pub use animation::{Animation, AnimationOptions, AnimationPair, Animator, FillMode, Keyframe, NoopAnimator};
pub use config::{Config, RoutingConfig};
pub use dom::Element;
pub use error::NavigationError;
pub use history::{History, MemoryHistory};
pub use navigator::{ActiveRoute, Lifecycle, NavigationHooks, Navigator, NoopHooks};
pub use reconcile::Reconciler;
pub use route::{Chain, Params, PatternMatcher, RouteDeclaration, RouteMatch, RouteTable, SegmentMatcher, ViewConstructor, ViewFactory};
pub use view::ViewSource;
