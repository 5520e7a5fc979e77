use crate::surface::Surface;
use reactive_graph::{
    signal::ArcRwSignal,
    traits::{Get, GetUntracked, Set},
};
use std::fmt::{self, Debug};

/// A reactive reference to an existing node that a portal can be mounted into.
///
/// The reference starts out empty and is [`load`](ContainerRef::load)ed once the node exists.
/// Portals that read it re-run their attachment whenever it changes.
pub struct ContainerRef<S: Surface>(ArcRwSignal<Option<S::Node>>);

impl<S: Surface> ContainerRef<S> {
    /// Creates a new, unresolved container reference.
    #[track_caller]
    pub fn new() -> Self {
        Self(ArcRwSignal::new(None))
    }

    /// Creates a container reference that already points at `node`.
    #[track_caller]
    pub fn with_node(node: S::Node) -> Self {
        Self(ArcRwSignal::new(Some(node)))
    }

    /// Points the reference at `node`.
    pub fn load(&self, node: &S::Node) {
        self.0.set(Some(node.clone()));
    }

    /// Empties the reference.
    pub fn clear(&self) {
        self.0.set(None);
    }

    /// The current node, subscribing the running effect to changes.
    pub fn get(&self) -> Option<S::Node> {
        self.0.get()
    }

    /// The current node, without tracking.
    pub fn get_untracked(&self) -> Option<S::Node> {
        self.0.get_untracked()
    }
}

impl<S: Surface> Default for ContainerRef<S> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S: Surface> Clone for ContainerRef<S> {
    fn clone(&self) -> Self {
        Self(self.0.clone())
    }
}

impl<S: Surface> Debug for ContainerRef<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("ContainerRef")
            .field(&self.0.get_untracked())
            .finish()
    }
}

/// Diagnostic settings that are handed down to portals explicitly.
///
/// Setting a portal container here overrides both the `container_ref` a portal was given and
/// the default `<body>` target, which makes it possible to collect every portal of a test or
/// story into one inspectable node. Clones share the same underlying state.
pub struct DebugContext<S: Surface> {
    portal_container: ArcRwSignal<Option<ContainerRef<S>>>,
}

impl<S: Surface> DebugContext<S> {
    /// A context with no override.
    #[track_caller]
    pub fn new() -> Self {
        Self {
            portal_container: ArcRwSignal::new(None),
        }
    }

    /// A context that overrides the portal container with `container`.
    #[track_caller]
    pub fn with_portal_container(container: ContainerRef<S>) -> Self {
        Self {
            portal_container: ArcRwSignal::new(Some(container)),
        }
    }

    /// Sets or unsets the override. Portals that share this context re-attach immediately.
    pub fn set_portal_container(&self, container: Option<ContainerRef<S>>) {
        self.portal_container.set(container);
    }

    /// The override, if one is set, subscribing the running effect to changes.
    ///
    /// An override can be set while its reference is still unresolved.
    pub fn portal_container(&self) -> Option<ContainerRef<S>> {
        self.portal_container.get()
    }
}

impl<S: Surface> Default for DebugContext<S> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S: Surface> Clone for DebugContext<S> {
    fn clone(&self) -> Self {
        Self {
            portal_container: self.portal_container.clone(),
        }
    }
}

impl<S: Surface> Debug for DebugContext<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DebugContext")
            .field("portal_container", &self.portal_container.get_untracked())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::{ContainerRef, DebugContext};
    use crate::{mock_dom::MockDom, surface::Surface};

    #[test]
    fn container_ref_loads_and_clears() {
        MockDom::reset();
        let node = MockDom::create_element("section").unwrap();
        let container = ContainerRef::<MockDom>::new();
        assert_eq!(container.get_untracked(), None);
        container.load(&node);
        assert_eq!(container.get_untracked(), Some(node));
        container.clear();
        assert_eq!(container.get_untracked(), None);
    }

    #[test]
    fn debug_context_clones_share_the_override() {
        let ctx = DebugContext::<MockDom>::new();
        let clone = ctx.clone();
        assert!(clone.portal_container().is_none());
        ctx.set_portal_container(Some(ContainerRef::new()));
        assert!(clone.portal_container().is_some());
    }
}
