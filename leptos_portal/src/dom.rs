use crate::{error::SurfaceError, surface::Surface};
use send_wrapper::SendWrapper;
use std::ops::Deref;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{Document, Element, ShadowRootInit, ShadowRootMode};

/// The browser DOM.
#[derive(Debug)]
pub struct Dom;

/// A DOM node.
///
/// Portal effects and cleanups have to be `Send + Sync`, so the node is wrapped in a
/// [`SendWrapper`]. This is safe in practice because it is only ever created in the browser,
/// so it will always be accessed or dropped from the main thread.
#[derive(Clone, Debug)]
pub struct DomNode(SendWrapper<web_sys::Node>);

impl DomNode {
    /// Wraps a DOM node.
    pub fn new(node: impl Into<web_sys::Node>) -> Self {
        Self(SendWrapper::new(node.into()))
    }
}

impl Deref for DomNode {
    type Target = web_sys::Node;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl PartialEq for DomNode {
    fn eq(&self, other: &Self) -> bool {
        **self == **other
    }
}

impl From<Element> for DomNode {
    fn from(value: Element) -> Self {
        Self::new(value)
    }
}

fn document() -> Option<Document> {
    if !cfg!(all(target_arch = "wasm32", target_os = "unknown")) {
        return None;
    }
    web_sys::window().and_then(|window| window.document())
}

fn describe(err: &JsValue) -> String {
    err.as_string().unwrap_or_else(|| format!("{err:?}"))
}

impl Surface for Dom {
    type Node = DomNode;

    fn is_available() -> bool {
        document().is_some()
    }

    fn body() -> Option<Self::Node> {
        document().and_then(|doc| doc.body()).map(DomNode::new)
    }

    fn create_element(tag: &str) -> Result<Self::Node, SurfaceError> {
        let doc = document().ok_or(SurfaceError::Unavailable)?;
        doc.create_element(tag).map(DomNode::from).map_err(|err| {
            SurfaceError::CreateElement {
                tag: tag.to_string(),
                reason: describe(&err),
            }
        })
    }

    fn append_child(
        parent: &Self::Node,
        child: &Self::Node,
    ) -> Result<(), SurfaceError> {
        parent
            .append_child(child)
            .map(drop)
            .map_err(|err| SurfaceError::Append(describe(&err)))
    }

    fn remove(node: &Self::Node) {
        if let Some(parent) = node.parent_node() {
            if let Err(err) = parent.remove_child(node) {
                tracing::warn!(
                    "could not remove node from its parent: {}",
                    describe(&err)
                );
            }
        }
    }

    fn get_parent(node: &Self::Node) -> Option<Self::Node> {
        node.parent_node().map(DomNode::new)
    }

    fn clear_children(node: &Self::Node) {
        node.set_text_content(Some(""));
    }

    fn attach_shadow(node: &Self::Node) -> Result<Self::Node, SurfaceError> {
        let el = node
            .dyn_ref::<Element>()
            .ok_or(SurfaceError::ShadowRootUnsupported)?;
        el.attach_shadow(&ShadowRootInit::new(ShadowRootMode::Open))
            .map(DomNode::new)
            .map_err(|err| SurfaceError::ShadowRoot(describe(&err)))
    }
}
