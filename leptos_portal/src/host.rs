//! The host node owned by each portal, and the policy that decides where it is attached.

use crate::{
    config::PortalConfig,
    context::{ContainerRef, DebugContext},
    surface::Surface,
};

/// Where a portal's host node lives at the moment.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum HostState<N> {
    /// Not activated yet.
    Uninitialized,
    /// There was no surface to render into when the portal was activated. Terminal.
    Inert,
    /// The node exists but has no parent.
    Detached,
    /// The node is a child of the given parent.
    Attached(N),
    /// The portal has been unmounted and the node released. Terminal.
    TornDown,
}

/// The outcome of resolving where a host node should go.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum AttachTarget<N> {
    /// Append the host node to this parent.
    Parent(N),
    /// The chosen container is not available yet; skip attachment until something changes.
    Pending,
}

/// Resolves the attachment target for a portal.
///
/// The first match wins:
/// 1. the [`DebugContext`] override, if one is set. If its node has not loaded yet the result
///    is [`AttachTarget::Pending`]; it never falls through to the other options;
/// 2. the portal's own `container_ref`, if it points at a node;
/// 3. the surface's `<body>`.
///
/// Every reactive value this reads is tracked, so calling it inside an effect re-runs the
/// effect when any of them change.
pub fn resolve_target<S: Surface>(
    debug_context: &DebugContext<S>,
    container_ref: Option<&ContainerRef<S>>,
) -> AttachTarget<S::Node> {
    if let Some(container) = debug_context.portal_container() {
        return match container.get() {
            Some(node) => AttachTarget::Parent(node),
            None => AttachTarget::Pending,
        };
    }
    if let Some(node) = container_ref.and_then(ContainerRef::get) {
        return AttachTarget::Parent(node);
    }
    match S::body() {
        Some(body) => AttachTarget::Parent(body),
        None => AttachTarget::Pending,
    }
}

/// The single element a portal renders into.
///
/// It is created at most once, on [`activate`](HostNode::activate), and is moved between
/// parents rather than recreated.
#[derive(Debug)]
pub struct HostNode<S: Surface> {
    node: Option<S::Node>,
    render_root: Option<S::Node>,
    state: HostState<S::Node>,
}

impl<S: Surface> HostNode<S> {
    /// An uninitialized host.
    pub fn new() -> Self {
        Self {
            node: None,
            render_root: None,
            state: HostState::Uninitialized,
        }
    }

    /// The current lifecycle state.
    pub fn state(&self) -> &HostState<S::Node> {
        &self.state
    }

    /// The host element, once it has been created.
    pub fn node(&self) -> Option<&S::Node> {
        self.node.as_ref()
    }

    /// The node that children are mounted into: the host's shadow root if one was requested and
    /// supported, otherwise the host itself.
    pub fn render_root(&self) -> Option<&S::Node> {
        self.render_root.as_ref()
    }

    /// Creates the host element, if this is the first activation.
    ///
    /// Returns whether there is a host node to render into. Without a surface (or if the
    /// element cannot be created) the host becomes [`HostState::Inert`] and stays that way.
    pub fn activate(&mut self, config: &PortalConfig) -> bool {
        match self.state {
            HostState::Uninitialized => {}
            HostState::Inert | HostState::TornDown => return false,
            HostState::Detached | HostState::Attached(_) => return true,
        }

        if !S::is_available() {
            tracing::debug!("no rendering surface; portal is inert");
            self.state = HostState::Inert;
            return false;
        }

        let tag = config.element_tag();
        let node = match S::create_element(tag) {
            Ok(node) => node,
            Err(err) => {
                tracing::warn!("could not create portal host: {err}");
                self.state = HostState::Inert;
                return false;
            }
        };
        tracing::debug!(tag, "created portal host");

        let render_root = if config.use_shadow {
            S::attach_shadow(&node).unwrap_or_else(|err| {
                tracing::debug!("rendering into the host element: {err}");
                node.clone()
            })
        } else {
            node.clone()
        };

        self.node = Some(node);
        self.render_root = Some(render_root);
        self.state = HostState::Detached;
        true
    }

    /// Appends the host node to the target.
    ///
    /// [`AttachTarget::Pending`] and surface errors leave the host where it is; nothing is
    /// retried until the caller asks again. Does nothing unless the host is live.
    pub fn attach(&mut self, target: AttachTarget<S::Node>) {
        if !matches!(self.state, HostState::Detached | HostState::Attached(_)) {
            return;
        }
        let Some(node) = &self.node else {
            return;
        };
        let AttachTarget::Parent(parent) = target else {
            tracing::debug!("portal container not resolved yet; skipping");
            return;
        };
        if self.state == HostState::Attached(parent.clone()) {
            return;
        }
        match S::append_child(&parent, node) {
            Ok(()) => {
                tracing::debug!(?parent, "attached portal host");
                self.state = HostState::Attached(parent);
            }
            Err(err) => {
                tracing::warn!("could not attach portal host: {err}");
            }
        }
    }

    /// Removes the host node from its parent. Repeated calls are no-ops.
    pub fn detach(&mut self) {
        if let HostState::Attached(_) = self.state {
            if let Some(node) = &self.node {
                S::remove(node);
            }
            tracing::debug!("detached portal host");
            self.state = HostState::Detached;
        }
    }

    /// Detaches and releases the host node for good. Repeated calls are no-ops.
    pub fn tear_down(&mut self) {
        match self.state {
            HostState::Inert | HostState::TornDown => {}
            _ => {
                self.detach();
                self.node = None;
                self.render_root = None;
                self.state = HostState::TornDown;
            }
        }
    }
}

impl<S: Surface> Default for HostNode<S> {
    fn default() -> Self {
        Self::new()
    }
}
