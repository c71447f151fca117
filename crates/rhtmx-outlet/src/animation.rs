//! Enter/exit transitions and the animator port
//!
//! Animations are plain data (keyframes + options) so they can be declared in
//! code or in `outlet.toml`. Playing them is delegated to an [`Animator`].

use std::collections::BTreeMap;

use anyhow::Result;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::dom::Element;

/// One keyframe: property → value (e.g. `{"opacity": 0}`)
pub type Keyframe = BTreeMap<String, Value>;

/// How styles apply before and after the active interval
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FillMode {
    #[default]
    None,
    Forwards,
    Backwards,
    Both,
}

/// Timing options for a keyframe animation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnimationOptions {
    /// Optional identifier, surfaced to the animator
    pub id: Option<String>,
    pub duration_ms: u64,
    pub delay_ms: u64,
    pub easing: String,
    pub fill: FillMode,
    pub iterations: u32,
}

impl Default for AnimationOptions {
    fn default() -> Self {
        Self {
            id: None,
            duration_ms: 300,
            delay_ms: 0,
            easing: "linear".to_string(),
            fill: FillMode::None,
            iterations: 1,
        }
    }
}

impl AnimationOptions {
    /// Builder: sets the duration
    pub fn with_duration_ms(mut self, duration_ms: u64) -> Self {
        self.duration_ms = duration_ms;
        self
    }

    /// Builder: sets the identifier
    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    /// Builder: sets the easing function
    pub fn with_easing(mut self, easing: impl Into<String>) -> Self {
        self.easing = easing.into();
        self
    }
}

/// A keyframe animation: frames plus timing
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Animation {
    pub keyframes: Vec<Keyframe>,
    #[serde(default)]
    pub options: AnimationOptions,
}

impl Animation {
    pub fn new(keyframes: Vec<Keyframe>, options: AnimationOptions) -> Self {
        Self { keyframes, options }
    }

    /// Opacity 0 → 1
    pub fn fade_in(duration_ms: u64) -> Self {
        Self::new(
            vec![opacity(0.0), opacity(1.0)],
            AnimationOptions::default()
                .with_duration_ms(duration_ms)
                .with_easing("ease-out")
                .with_id("enter"),
        )
    }

    /// Opacity 1 → 0
    pub fn fade_out(duration_ms: u64) -> Self {
        Self::new(
            vec![opacity(1.0), opacity(0.0)],
            AnimationOptions::default()
                .with_duration_ms(duration_ms)
                .with_easing("ease-in")
                .with_id("exit"),
        )
    }
}

fn opacity(value: f64) -> Keyframe {
    Keyframe::from([("opacity".to_string(), Value::from(value))])
}

/// Transition played when an element is inserted (`enter`) or removed (`exit`)
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct AnimationPair {
    pub enter: Animation,
    pub exit: Animation,
}

impl AnimationPair {
    pub fn new(enter: Animation, exit: Animation) -> Self {
        Self { enter, exit }
    }

    /// Symmetric fade transition
    ///
    /// # Examples
    ///
    /// ```
    /// use rhtmx_outlet::AnimationPair;
    ///
    /// let fade = AnimationPair::fade(150);
    /// assert_eq!(fade.enter.options.duration_ms, 150);
    /// assert_eq!(fade.exit.options.id.as_deref(), Some("exit"));
    /// ```
    pub fn fade(duration_ms: u64) -> Self {
        Self::new(Animation::fade_in(duration_ms), Animation::fade_out(duration_ms))
    }
}

/// Which half of an [`AnimationPair`] to play
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    Enter,
    Exit,
}

impl Transition {
    pub fn select(self, pair: &AnimationPair) -> &Animation {
        match self {
            Transition::Enter => &pair.enter,
            Transition::Exit => &pair.exit,
        }
    }
}

/// Port to the animation engine
///
/// `stop_animations` cancels whatever is running on an element, so a fast
/// repeated navigation can interrupt a transition that is still playing.
#[async_trait]
pub trait Animator: Send + Sync {
    /// Cancel every in-flight animation on `element`
    async fn stop_animations(&self, element: &Element) -> Result<()>;

    /// Play `keyframes` on `element`, resolving once finished
    async fn animate_to(
        &self,
        element: &Element,
        keyframes: &[Keyframe],
        options: &AnimationOptions,
    ) -> Result<()>;
}

/// Animator that completes every animation immediately
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopAnimator;

#[async_trait]
impl Animator for NoopAnimator {
    async fn stop_animations(&self, _element: &Element) -> Result<()> {
        Ok(())
    }

    async fn animate_to(
        &self,
        _element: &Element,
        _keyframes: &[Keyframe],
        _options: &AnimationOptions,
    ) -> Result<()> {
        Ok(())
    }
}
