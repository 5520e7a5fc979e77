#![cfg(all(target_arch = "wasm32", feature = "web"))]

use leptos_portal::prelude::*;
use reactive_graph::owner::Owner;
use wasm_bindgen_test::*;
wasm_bindgen_test_configure!(run_in_browser);

fn text(content: &'static str) -> impl FnOnce(&DomNode) {
    move |host| {
        let el = Dom::create_element("p").unwrap();
        el.set_text_content(Some(content));
        Dom::append_child(host, &el).unwrap();
    }
}

#[wasm_bindgen_test]
fn portal_mounts_into_body() {
    let owner = Owner::new();
    owner.set();

    let body = Dom::body().unwrap();
    let mut view = Portal(
        PortalProps::<Dom, _>::builder()
            .children(text("Teleported"))
            .build(),
    );
    let host = view.host_node().unwrap();

    assert!(Dom::is_available());
    assert_eq!(Dom::get_parent(&host), Some(body));
    assert_eq!(host.text_content().as_deref(), Some("Teleported"));

    view.unmount();
    assert_eq!(Dom::get_parent(&host), None);
}

#[wasm_bindgen_test]
fn portal_follows_container_ref() {
    let owner = Owner::new();
    owner.set();

    let body = Dom::body().unwrap();
    let container = Dom::create_element("section").unwrap();
    Dom::append_child(&body, &container).unwrap();

    let container_ref = ContainerRef::<Dom>::new();
    let view = Portal(
        PortalProps::<Dom, _>::builder()
            .children(text("Moved"))
            .container_ref(container_ref.clone())
            .build(),
    );
    let host = view.host_node().unwrap();
    assert_eq!(Dom::get_parent(&host), Some(body.clone()));

    container_ref.load(&container);
    assert_eq!(Dom::get_parent(&host), Some(container.clone()));

    drop(view);
    assert_eq!(container.text_content().as_deref(), Some(""));
    Dom::remove(&container);
}

#[wasm_bindgen_test]
fn shadow_root_hosts_children() {
    let owner = Owner::new();
    owner.set();

    let view = Portal(
        PortalProps::<Dom, _>::builder()
            .children(text("Isolated"))
            .config(PortalConfig::builder().use_shadow(true).build())
            .build(),
    );
    let host = view.host_node().unwrap();

    // children live in the shadow tree, not in the light DOM
    assert_eq!(host.text_content().as_deref(), Some(""));
    assert!(Dom::get_parent(&host).is_some());
}
