//! Retained element tree mutated by the reconciler
//!
//! An [`Element`] is a cheap, clonable handle. Clones share the same node, and
//! equality is node identity. Each element carries its tag (the "view kind"
//! reconciliation compares), links to its parent and children, and the
//! animation pair to play when it is inserted or removed. The animation pair
//! is out-of-band metadata, never an attribute.

use std::fmt;
use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard, Weak};

use uuid::Uuid;

use crate::animation::AnimationPair;

/// Handle to a node in the element tree
#[derive(Clone)]
pub struct Element {
    node: Arc<Node>,
}

struct Node {
    id: Uuid,
    tag: String,
    parent: RwLock<Weak<Node>>,
    children: RwLock<Vec<Element>>,
    animation: RwLock<Option<AnimationPair>>,
}

// Lock helpers: a poisoned lock still holds a consistent tree
fn read<T>(lock: &RwLock<T>) -> RwLockReadGuard<'_, T> {
    lock.read().unwrap_or_else(PoisonError::into_inner)
}

fn write<T>(lock: &RwLock<T>) -> RwLockWriteGuard<'_, T> {
    lock.write().unwrap_or_else(PoisonError::into_inner)
}

impl Element {
    /// Creates a detached element with the given tag
    pub fn new(tag: impl Into<String>) -> Self {
        Self {
            node: Arc::new(Node {
                id: Uuid::new_v4(),
                tag: tag.into(),
                parent: RwLock::new(Weak::new()),
                children: RwLock::new(Vec::new()),
                animation: RwLock::new(None),
            }),
        }
    }

    /// Builder: attaches an animation pair
    pub fn with_animation(self, animation: AnimationPair) -> Self {
        self.set_animation(Some(animation));
        self
    }

    /// Builder: appends children
    pub fn with_children<I>(self, children: I) -> Self
    where
        I: IntoIterator<Item = Element>,
    {
        for child in children {
            self.append(&child);
        }
        self
    }

    pub fn id(&self) -> Uuid {
        self.node.id
    }

    pub fn tag(&self) -> &str {
        &self.node.tag
    }

    /// Whether two elements are the same view kind (tags compare ASCII case-insensitively)
    pub fn is_same_kind(&self, other: &Element) -> bool {
        self.tag().eq_ignore_ascii_case(other.tag())
    }

    /// Snapshot of the direct children
    pub fn children(&self) -> Vec<Element> {
        read(&self.node.children).clone()
    }

    pub fn first_child(&self) -> Option<Element> {
        read(&self.node.children).first().cloned()
    }

    pub fn child_count(&self) -> usize {
        read(&self.node.children).len()
    }

    pub fn has_children(&self) -> bool {
        self.child_count() > 0
    }

    pub fn parent(&self) -> Option<Element> {
        read(&self.node.parent)
            .upgrade()
            .map(|node| Element { node })
    }

    /// Whether this element is currently attached to a parent
    pub fn is_attached(&self) -> bool {
        self.parent().is_some()
    }

    /// Inserts `child` as the first child, detaching it from any previous parent
    pub fn prepend(&self, child: &Element) {
        child.remove();
        write(&self.node.children).insert(0, child.clone());
        *write(&child.node.parent) = Arc::downgrade(&self.node);
    }

    /// Inserts `child` as the last child, detaching it from any previous parent
    pub fn append(&self, child: &Element) {
        child.remove();
        write(&self.node.children).push(child.clone());
        *write(&child.node.parent) = Arc::downgrade(&self.node);
    }

    /// Detaches this element from its parent; descendants stay attached to it
    pub fn remove(&self) {
        if let Some(parent) = self.parent() {
            write(&parent.node.children).retain(|c| c != self);
        }
        *write(&self.node.parent) = Weak::new();
    }

    /// Animation pair to play on insertion and removal
    pub fn animation(&self) -> Option<AnimationPair> {
        read(&self.node.animation).clone()
    }

    pub fn set_animation(&self, animation: Option<AnimationPair>) {
        *write(&self.node.animation) = animation;
    }

    /// Compact rendering of the subtree, e.g. `outlet(app-shell(home-view))`
    pub fn describe(&self) -> String {
        let children = self.children();
        if children.is_empty() {
            return self.tag().to_string();
        }

        let inner = children
            .iter()
            .map(Element::describe)
            .collect::<Vec<_>>()
            .join(",");
        format!("{}({})", self.tag(), inner)
    }
}

impl PartialEq for Element {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.node, &other.node)
    }
}

impl Eq for Element {}

impl fmt::Debug for Element {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Element")
            .field("tag", &self.tag())
            .field("id", &self.id())
            .field("children", &self.child_count())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_clone_shares_identity() {
        let a = Element::new("a-view");
        let b = a.clone();
        assert_eq!(a, b);
        assert_ne!(a, Element::new("a-view"));
    }

    #[test]
    fn test_same_kind_ignores_ascii_case() {
        assert!(Element::new("HOME-VIEW").is_same_kind(&Element::new("home-view")));
        assert!(!Element::new("home-view").is_same_kind(&Element::new("away-view")));
    }

    #[test]
    fn test_prepend_and_remove() {
        let outlet = Element::new("outlet");
        let first = Element::new("first");
        let second = Element::new("second");

        outlet.append(&second);
        outlet.prepend(&first);
        assert_eq!(outlet.describe(), "outlet(first,second)");
        assert_eq!(first.parent(), Some(outlet.clone()));

        first.remove();
        assert_eq!(outlet.describe(), "outlet(second)");
        assert!(!first.is_attached());
    }

    #[test]
    fn test_prepend_moves_between_parents() {
        let left = Element::new("left");
        let right = Element::new("right");
        let child = Element::new("child");

        left.append(&child);
        right.prepend(&child);

        assert!(!left.has_children());
        assert_eq!(right.first_child(), Some(child));
    }

    #[test]
    fn test_describe_nested() {
        let tree = Element::new("outlet")
            .with_children([Element::new("shell").with_children([Element::new("page")])]);
        assert_eq!(tree.describe(), "outlet(shell(page))");
    }
}
