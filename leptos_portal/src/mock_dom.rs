//! A stupidly-simple mock DOM implementation that can be used for testing.
//!
//! Do not use this for anything real.

use crate::{error::SurfaceError, surface::Surface};
use indexmap::IndexMap;
use slotmap::{new_key_type, SlotMap};
use std::{borrow::Cow, cell::RefCell};

/// A [`Surface`] that uses a mock DOM structure running in Rust code.
///
/// This is intended as a rendering background that can be used to test portal logic without
/// running a browser. Each thread has its own document, which starts out with an empty
/// `<body>`.
#[derive(Debug)]
pub struct MockDom;

new_key_type! {
    /// A unique identifier for a mock DOM node.
    pub struct NodeId;
}

/// A mock DOM node.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Node(NodeId);

/// The DOM data associated with a particular node.
#[derive(Debug, PartialEq, Eq)]
pub struct NodeData {
    /// The node's parent.
    pub parent: Option<NodeId>,
    /// The node itself.
    pub ty: NodeType,
}

/// The type of mock DOM node.
#[derive(Debug, PartialEq, Eq)]
pub enum NodeType {
    /// A text node.
    Text(String),
    /// An element.
    Element {
        /// The HTML tag name.
        tag: Cow<'static, str>,
        /// The attributes.
        attrs: IndexMap<String, String>,
        /// The element's children.
        children: Vec<Node>,
    },
}

/// Counts of the mutations performed on the current thread's document since it was last reset.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct MockStats {
    /// Elements created with [`Surface::create_element`].
    pub elements_created: usize,
    /// Successful calls to [`Surface::append_child`].
    pub appends: usize,
    /// Calls to [`Surface::remove`] that actually detached a node.
    pub removals: usize,
}

struct Document {
    nodes: SlotMap<NodeId, NodeData>,
    body: NodeId,
    available: bool,
    stats: MockStats,
}

impl Document {
    fn new() -> Self {
        let mut nodes = SlotMap::with_key();
        let body = nodes.insert(NodeData {
            parent: None,
            ty: NodeType::Element {
                tag: Cow::Borrowed("body"),
                attrs: IndexMap::new(),
                children: Vec::new(),
            },
        });
        Self {
            nodes,
            body,
            available: true,
            stats: MockStats::default(),
        }
    }

    fn insert(&mut self, ty: NodeType) -> Node {
        Node(self.nodes.insert(NodeData { parent: None, ty }))
    }

    fn is_element(&self, id: NodeId) -> bool {
        matches!(
            self.nodes.get(id),
            Some(NodeData {
                ty: NodeType::Element { .. },
                ..
            })
        )
    }

    fn is_ancestor(&self, ancestor: NodeId, mut node: NodeId) -> bool {
        loop {
            if node == ancestor {
                return true;
            }
            match self.nodes.get(node).and_then(|data| data.parent) {
                Some(parent) => node = parent,
                None => return false,
            }
        }
    }

    fn detach(&mut self, id: NodeId) -> bool {
        let Some(parent) = self.nodes.get(id).and_then(|data| data.parent)
        else {
            return false;
        };
        if let Some(NodeData {
            ty: NodeType::Element { children, .. },
            ..
        }) = self.nodes.get_mut(parent)
        {
            children.retain(|child| child.0 != id);
        }
        if let Some(data) = self.nodes.get_mut(id) {
            data.parent = None;
        }
        true
    }

    fn append(&mut self, parent: NodeId, child: NodeId) -> Result<(), String> {
        if !self.is_element(parent) {
            return Err("parent is not an element".into());
        }
        if !self.nodes.contains_key(child) {
            return Err("child does not exist".into());
        }
        if self.is_ancestor(child, parent) {
            return Err("the new child is an ancestor of the parent".into());
        }
        // remove if already mounted
        self.detach(child);
        if let Some(NodeData {
            ty: NodeType::Element { children, .. },
            ..
        }) = self.nodes.get_mut(parent)
        {
            children.push(Node(child));
        }
        if let Some(data) = self.nodes.get_mut(child) {
            data.parent = Some(parent);
        }
        Ok(())
    }

    fn debug_html(&self, id: NodeId, buf: &mut String) {
        let Some(data) = self.nodes.get(id) else {
            return;
        };
        match &data.ty {
            NodeType::Text(text) => buf.push_str(text),
            NodeType::Element {
                tag,
                attrs,
                children,
            } => {
                buf.push('<');
                buf.push_str(tag);
                for (k, v) in attrs {
                    buf.push(' ');
                    buf.push_str(k);
                    buf.push_str("=\"");
                    buf.push_str(v);
                    buf.push('"');
                }
                buf.push('>');

                for child in children {
                    self.debug_html(child.0, buf);
                }

                buf.push_str("</");
                buf.push_str(tag);
                buf.push('>');
            }
        }
    }
}

thread_local! {
    static DOCUMENT: RefCell<Document> = RefCell::new(Document::new());
}

fn with_document<U>(f: impl FnOnce(&mut Document) -> U) -> U {
    DOCUMENT.with_borrow_mut(f)
}

impl MockDom {
    /// Resets this thread's document to an empty `<body>`, marks it available again and
    /// zeroes the [`MockStats`]. Nodes created before the reset are invalidated.
    pub fn reset() {
        with_document(|doc| *doc = Document::new());
    }

    /// Simulates a headless environment (`false`) or a live document (`true`).
    pub fn set_available(available: bool) {
        with_document(|doc| doc.available = available);
    }

    /// Mutation counters for this thread's document.
    pub fn stats() -> MockStats {
        with_document(|doc| doc.stats)
    }

    /// Creates a new text node.
    pub fn create_text_node(data: &str) -> Node {
        with_document(|doc| doc.insert(NodeType::Text(data.to_string())))
    }

    /// Sets the given attribute on the given element.
    pub fn set_attribute(node: &Node, name: &str, value: &str) {
        with_document(|doc| {
            if let Some(NodeData {
                ty: NodeType::Element { attrs, .. },
                ..
            }) = doc.nodes.get_mut(node.0)
            {
                attrs.insert(name.to_string(), value.to_string());
            }
        });
    }

    /// The tag name of an element, if the node is one.
    pub fn tag_name(node: &Node) -> Option<String> {
        with_document(|doc| match doc.nodes.get(node.0).map(|data| &data.ty) {
            Some(NodeType::Element { tag, .. }) => Some(tag.to_string()),
            _ => None,
        })
    }

    /// The node's children, in order.
    pub fn children(node: &Node) -> Vec<Node> {
        with_document(|doc| match doc.nodes.get(node.0).map(|data| &data.ty) {
            Some(NodeType::Element { children, .. }) => children.clone(),
            _ => Vec::new(),
        })
    }

    /// Whether `node` is `ancestor` or somewhere below it.
    pub fn contains(ancestor: &Node, node: &Node) -> bool {
        with_document(|doc| doc.is_ancestor(ancestor.0, node.0))
    }

    /// Outputs an HTML form of the node, for testing and debugging purposes.
    pub fn to_debug_html(node: &Node) -> String {
        let mut buf = String::new();
        with_document(|doc| doc.debug_html(node.0, &mut buf));
        buf
    }
}

impl Surface for MockDom {
    type Node = Node;

    fn is_available() -> bool {
        with_document(|doc| doc.available)
    }

    fn body() -> Option<Self::Node> {
        with_document(|doc| doc.available.then_some(Node(doc.body)))
    }

    fn create_element(tag: &str) -> Result<Self::Node, SurfaceError> {
        with_document(|doc| {
            if !doc.available {
                return Err(SurfaceError::Unavailable);
            }
            doc.stats.elements_created += 1;
            Ok(doc.insert(NodeType::Element {
                tag: Cow::Owned(tag.to_string()),
                attrs: IndexMap::new(),
                children: Vec::new(),
            }))
        })
    }

    fn append_child(
        parent: &Self::Node,
        child: &Self::Node,
    ) -> Result<(), SurfaceError> {
        with_document(|doc| {
            doc.append(parent.0, child.0).map_err(SurfaceError::Append)?;
            doc.stats.appends += 1;
            Ok(())
        })
    }

    fn remove(node: &Self::Node) {
        with_document(|doc| {
            if doc.detach(node.0) {
                doc.stats.removals += 1;
            }
        });
    }

    fn get_parent(node: &Self::Node) -> Option<Self::Node> {
        with_document(|doc| {
            doc.nodes.get(node.0).and_then(|data| data.parent).map(Node)
        })
    }

    fn clear_children(node: &Self::Node) {
        with_document(|doc| {
            let prev_children = match doc.nodes.get_mut(node.0) {
                Some(NodeData {
                    ty: NodeType::Element { children, .. },
                    ..
                }) => std::mem::take(children),
                _ => return,
            };
            for child in prev_children {
                if let Some(data) = doc.nodes.get_mut(child.0) {
                    data.parent = None;
                }
            }
        });
    }
}
