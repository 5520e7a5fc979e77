use crate::{
    config::PortalConfig,
    context::{ContainerRef, DebugContext},
    host::{resolve_target, HostNode, HostState},
    surface::Surface,
};
use or_poisoned::OrPoisoned;
use reactive_graph::{
    effect::ImmediateEffect,
    owner::{on_cleanup, Owner},
};
use std::{
    fmt::{self, Debug},
    sync::{Arc, Mutex},
};
use typed_builder::TypedBuilder;

/// Content that a portal mounts into its host node.
///
/// This is the rendering delegate: the portal hands over the node to render into and keeps
/// whatever state comes back for as long as the content is mounted. Anything reactive created
/// while mounting is owned by the portal, so it stays part of the calling tree for updates and
/// is cleaned up when the portal is.
pub trait PortalChildren<S: Surface> {
    /// The mounted content.
    type State;

    /// Mounts the content as children of `parent`.
    fn mount(self, parent: &S::Node) -> Self::State;
}

impl<S, F, T> PortalChildren<S> for F
where
    S: Surface,
    F: FnOnce(&S::Node) -> T,
{
    type State = T;

    fn mount(self, parent: &S::Node) -> Self::State {
        self(parent)
    }
}

/// Props for the [`Portal`] component.
#[derive(TypedBuilder)]
pub struct PortalProps<S: Surface, C> {
    /// The children to teleport into the host node.
    pub children: C,
    /// Where to mount the host node. Defaults to the `<body>`.
    #[builder(default, setter(strip_option))]
    pub container_ref: Option<ContainerRef<S>>,
    /// Diagnostic overrides. An override container set here wins over `container_ref`.
    #[builder(default)]
    pub debug_context: DebugContext<S>,
    /// How to build the host node.
    #[builder(default)]
    pub config: PortalConfig,
}

/// Renders its children somewhere else in the tree.
///
/// Useful for inserting modals and tooltips outside of a cropping layout. The portal creates a
/// single host element, mounts the children into it and attaches it to, in order of priority:
/// the override container in the [`DebugContext`], the `container_ref` prop, or the `<body>`.
/// Whenever one of those changes, the host node moves; when the returned view is unmounted or
/// dropped, the host node is removed.
///
/// If there is no surface to render into (e.g., on the server), the portal renders nothing.
///
/// ```
/// use leptos_portal::{mock_dom::Node, prelude::*};
/// # let owner = reactive_graph::owner::Owner::new(); owner.set();
///
/// let overlay = Portal(
///     PortalProps::<MockDom, _>::builder()
///         .children(|host: &Node| {
///             let text = MockDom::create_text_node("Hello from the body");
///             MockDom::append_child(host, &text)
///         })
///         .build(),
/// );
///
/// assert_eq!(
///     MockDom::to_debug_html(&MockDom::body().unwrap()),
///     "<body><leptos-portal>Hello from the body</leptos-portal></body>"
/// );
/// drop(overlay);
/// assert_eq!(MockDom::to_debug_html(&MockDom::body().unwrap()), "<body></body>");
/// ```
#[allow(non_snake_case)]
#[tracing::instrument(level = "trace", skip_all)]
pub fn Portal<S, C>(props: PortalProps<S, C>) -> PortalView<S, C::State>
where
    S: Surface,
    C: PortalChildren<S>,
{
    let PortalProps {
        children,
        container_ref,
        debug_context,
        config,
    } = props;

    let mut host = HostNode::<S>::new();
    let render_root = if host.activate(&config) {
        host.render_root().cloned()
    } else {
        None
    };
    let host = Arc::new(Mutex::new(host));
    let Some(render_root) = render_root else {
        return PortalView {
            host,
            owners: None,
            children: None,
        };
    };

    let owner = Owner::new();
    let children_owner = owner.child();
    let children = children_owner.with(|| children.mount(&render_root));

    owner.with(|| {
        on_cleanup({
            let host = Arc::clone(&host);
            move || host.lock().or_poisoned().tear_down()
        });

        let host = Arc::clone(&host);
        let effect = ImmediateEffect::new_isomorphic(move || {
            let target = resolve_target(&debug_context, container_ref.as_ref());
            host.lock().or_poisoned().attach(target);

            let host = Arc::clone(&host);
            on_cleanup(move || host.lock().or_poisoned().detach());
        });
        // the effect stops tracking once its handle is dropped
        on_cleanup(move || drop(effect));
    });

    PortalView {
        host,
        owners: Some(PortalOwners {
            owner,
            children_owner,
        }),
        children: Some(children),
    }
}

struct PortalOwners {
    owner: Owner,
    children_owner: Owner,
}

/// What a [`Portal`] renders in place: nothing visible, but it keeps the host node and the
/// mounted children alive.
#[must_use = "the portal is unmounted as soon as its view is dropped"]
pub struct PortalView<S: Surface, T> {
    host: Arc<Mutex<HostNode<S>>>,
    owners: Option<PortalOwners>,
    children: Option<T>,
}

impl<S: Surface, T> PortalView<S, T> {
    /// Whether the portal rendered nothing because there was no surface.
    pub fn is_inert(&self) -> bool {
        *self.host.lock().or_poisoned().state() == HostState::Inert
    }

    /// The host element, while the portal is mounted.
    pub fn host_node(&self) -> Option<S::Node> {
        self.host.lock().or_poisoned().node().cloned()
    }

    /// The current lifecycle state of the host node.
    pub fn host_state(&self) -> HostState<S::Node> {
        self.host.lock().or_poisoned().state().clone()
    }

    /// The mounted children, if any.
    pub fn children(&self) -> Option<&T> {
        self.children.as_ref()
    }

    /// Replaces the mounted children, reusing the existing host node.
    pub fn rebuild<C>(&mut self, children: C)
    where
        C: PortalChildren<S, State = T>,
    {
        let Some(owners) = &self.owners else {
            return;
        };
        let Some(render_root) =
            self.host.lock().or_poisoned().render_root().cloned()
        else {
            return;
        };
        self.children = None;
        owners.children_owner.cleanup();
        S::clear_children(&render_root);
        self.children =
            Some(owners.children_owner.with(|| children.mount(&render_root)));
    }

    /// Stops tracking the attachment target, removes the host node and drops the children.
    ///
    /// This also happens when the view is dropped. Repeated calls are no-ops.
    pub fn unmount(&mut self) {
        if let Some(owners) = self.owners.take() {
            // detaches the host, then tears it down
            owners.owner.cleanup();
            self.children = None;
        }
    }
}

impl<S: Surface, T> Drop for PortalView<S, T> {
    fn drop(&mut self) {
        self.unmount();
    }
}

impl<S: Surface, T> Debug for PortalView<S, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PortalView")
            .field("host", &self.host_state())
            .field("mounted", &self.children.is_some())
            .finish()
    }
}
