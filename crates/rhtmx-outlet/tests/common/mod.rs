//! Shared test doubles: a recording animator and recording hooks

#![allow(dead_code)]

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use rhtmx_outlet::{
    AnimationOptions, Animator, Chain, Element, History, Keyframe, MemoryHistory, NavigationHooks,
};

pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_max_level(tracing::Level::DEBUG)
        .with_test_writer()
        .try_init();
}

#[derive(Debug, Clone, PartialEq)]
pub enum Event {
    Stop(String),
    Play {
        tag: String,
        /// `options.id` of the animation ("enter" / "exit" for fades)
        id: String,
        /// Tags of the element's siblings (itself included) when playback started
        siblings: Vec<String>,
    },
}

/// Records every animator call; suspends once per call so concurrent
/// navigations get a chance to interleave
#[derive(Default)]
pub struct RecordingAnimator {
    events: Mutex<Vec<Event>>,
    fail_on_tag: Option<String>,
}

impl RecordingAnimator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn failing_on(tag: &str) -> Self {
        Self {
            fail_on_tag: Some(tag.to_string()),
            ..Self::default()
        }
    }

    pub fn events(&self) -> Vec<Event> {
        self.events.lock().unwrap().clone()
    }

    /// `(tag, id)` for every played animation
    pub fn plays(&self) -> Vec<(String, String)> {
        self.events()
            .into_iter()
            .filter_map(|event| match event {
                Event::Play { tag, id, .. } => Some((tag, id)),
                Event::Stop(_) => None,
            })
            .collect()
    }

    pub fn clear(&self) {
        self.events.lock().unwrap().clear();
    }
}

#[async_trait]
impl Animator for RecordingAnimator {
    async fn stop_animations(&self, element: &Element) -> anyhow::Result<()> {
        self.events
            .lock()
            .unwrap()
            .push(Event::Stop(element.tag().to_string()));
        tokio::task::yield_now().await;
        Ok(())
    }

    async fn animate_to(
        &self,
        element: &Element,
        _keyframes: &[Keyframe],
        options: &AnimationOptions,
    ) -> anyhow::Result<()> {
        if self.fail_on_tag.as_deref() == Some(element.tag()) {
            anyhow::bail!("animation engine rejected <{}>", element.tag());
        }

        let siblings = element
            .parent()
            .map(|parent| {
                parent
                    .children()
                    .iter()
                    .map(|c| c.tag().to_string())
                    .collect()
            })
            .unwrap_or_default();

        self.events.lock().unwrap().push(Event::Play {
            tag: element.tag().to_string(),
            id: options.id.clone().unwrap_or_default(),
            siblings,
        });
        tokio::task::yield_now().await;
        Ok(())
    }
}

/// Logs hook invocations along with what history and the outlet look like
pub struct RecordingHooks {
    pub history: Arc<MemoryHistory>,
    pub outlet: Element,
    log: Mutex<Vec<String>>,
}

impl RecordingHooks {
    pub fn new(history: Arc<MemoryHistory>, outlet: Element) -> Self {
        Self {
            history,
            outlet,
            log: Mutex::new(Vec::new()),
        }
    }

    pub fn log(&self) -> Vec<String> {
        self.log.lock().unwrap().clone()
    }
}

#[async_trait]
impl NavigationHooks for RecordingHooks {
    async fn before_navigate(&self, path: &str, _chain: &Chain) {
        let entry = format!("before {} (history at {})", path, self.history.get_route());
        self.log.lock().unwrap().push(entry);
    }

    async fn after_navigate(&self, path: &str, _chain: &Chain) {
        let entry = format!("after {} {}", path, self.outlet.describe());
        self.log.lock().unwrap().push(entry);
    }
}
