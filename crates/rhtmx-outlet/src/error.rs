//! Navigation errors
//!
//! A path that matches no route is not an error (`navigate` returns
//! `Ok(None)`). What remains is the redirect-loop guard, which signals a
//! defect in the route table, and failures surfaced by collaborators.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum NavigationError {
    #[error("circular redirection: gave up at `{path}` after {hops} redirect hops")]
    CircularRedirect { path: String, hops: usize },

    #[error("view factory failed at depth {depth} while navigating to `{path}`")]
    View {
        path: String,
        depth: usize,
        #[source]
        source: anyhow::Error,
    },

    #[error("animation failed on <{tag}>")]
    Animation {
        tag: String,
        #[source]
        source: anyhow::Error,
    },
}

pub type Result<T> = std::result::Result<T, NavigationError>;
