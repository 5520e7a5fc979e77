//! Portals render their children into a host element that lives somewhere else in the tree,
//! by default at the end of the `<body>`.
//!
//! ```
//! use leptos_portal::{mock_dom::Node, prelude::*};
//! # let owner = reactive_graph::owner::Owner::new(); owner.set();
//!
//! let toolbar = MockDom::create_element("nav").unwrap();
//! let container = ContainerRef::<MockDom>::new();
//!
//! let tooltip = Portal(
//!     PortalProps::<MockDom, _>::builder()
//!         .children(|host: &Node| {
//!             let text = MockDom::create_text_node("Saved!");
//!             MockDom::append_child(host, &text)
//!         })
//!         .container_ref(container.clone())
//!         .build(),
//! );
//! // nothing loaded into the container yet, so the tooltip goes to the body
//! assert_eq!(tooltip.host_state(), HostState::Attached(MockDom::body().unwrap()));
//!
//! // as soon as it loads, the host node moves over
//! container.load(&toolbar);
//! assert_eq!(tooltip.host_state(), HostState::Attached(toolbar));
//! ```
//!
//! Where the host node goes is decided by [`resolve_target`](host::resolve_target): an
//! override container set on a [`DebugContext`](context::DebugContext) wins, then the
//! portal's own [`ContainerRef`](context::ContainerRef), then the `<body>`. The portal is
//! generic over the [`Surface`](surface::Surface) it renders to: the browser DOM (with the
//! `web` feature) or the in-memory [`MockDom`](mock_dom::MockDom).

#![forbid(unsafe_code)]

pub mod config;
pub mod context;
#[cfg(feature = "web")]
pub mod dom;
pub mod error;
pub mod host;
pub mod mock_dom;
pub mod portal;
pub mod surface;

pub use config::{get_config_from_file, get_config_from_str, PortalConfig};
pub use portal::{Portal, PortalProps, PortalView};

/// Exports all the core types of the library.
pub mod prelude {
    #[cfg(feature = "web")]
    pub use crate::dom::{Dom, DomNode};
    pub use crate::{
        config::PortalConfig,
        context::{ContainerRef, DebugContext},
        error::{PortalConfigError, SurfaceError},
        host::{AttachTarget, HostState},
        mock_dom::MockDom,
        portal::{Portal, PortalChildren, PortalProps, PortalView},
        surface::Surface,
    };
}
