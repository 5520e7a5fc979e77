use crate::error::SurfaceError;
use std::fmt::Debug;

/// The node primitives a [`Portal`](crate::portal::Portal) needs from the platform it renders to.
///
/// By default this is implemented for the Document Object Model (DOM) in a Web browser
/// (see [`Dom`](crate::dom::Dom), behind the `web` feature) and for an in-memory tree
/// ([`MockDom`](crate::mock_dom::MockDom)). Implementing it for some other tree-based UI lets
/// portals teleport content there as well.
///
/// Like a renderer, a surface is a type-level handle: every primitive is an associated
/// function and the surface itself carries no state.
pub trait Surface: Send + Sync + Sized + Debug + 'static {
    /// The basic type of node in the tree.
    ///
    /// Nodes are captured by reactive effects and cleanups, which need to be `Send + Sync`.
    type Node: Clone + PartialEq + Debug + Send + Sync + 'static;

    /// Whether there is a live surface to render into at all.
    ///
    /// This is `false` while rendering on the server or in any other headless environment.
    fn is_available() -> bool;

    /// The default attachment point, i.e., `document.body`.
    fn body() -> Option<Self::Node>;

    /// Creates a new, parentless element with the given tag.
    fn create_element(tag: &str) -> Result<Self::Node, SurfaceError>;

    /// Appends `child` as the last child of `parent`.
    ///
    /// If `child` already has a parent, it is moved rather than copied.
    fn append_child(
        parent: &Self::Node,
        child: &Self::Node,
    ) -> Result<(), SurfaceError>;

    /// Removes the node from its parent. Does nothing if it has no parent.
    fn remove(node: &Self::Node);

    /// Gets the parent of the given node, if any.
    fn get_parent(node: &Self::Node) -> Option<Self::Node>;

    /// Removes all children from the node.
    fn clear_children(node: &Self::Node);

    /// Attaches an open shadow root to the element and returns it.
    fn attach_shadow(node: &Self::Node) -> Result<Self::Node, SurfaceError> {
        _ = node;
        Err(SurfaceError::ShadowRootUnsupported)
    }
}
