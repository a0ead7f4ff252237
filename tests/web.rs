//! Browser smoke tests for mount/unmount and the accordion, run with
//! `wasm-pack test --headless --chrome`.

#![cfg(target_arch = "wasm32")]

use wasm_bindgen::JsCast;
use wasm_bindgen_test::*;
use web_sys::{Document, Element, HtmlElement};

use ril_interactions::{mount, mount_with};

wasm_bindgen_test_configure!(run_in_browser);

fn document() -> Document {
    web_sys::window().unwrap().document().unwrap()
}

fn scratch(id: &str) -> Element {
    let doc = document();
    let wrapper = doc.create_element("div").unwrap();
    wrapper.set_id(id);
    doc.body().unwrap().append_child(&wrapper).unwrap();
    wrapper
}

fn build_accordion(wrapper: &Element, panels: usize) -> Vec<Element> {
    let doc = document();
    let list = doc.create_element("div").unwrap();
    list.set_class_name("faq-list-wrapper");
    wrapper.append_child(&list).unwrap();

    let mut out = Vec::new();
    for _ in 0..panels {
        let panel = doc.create_element("div").unwrap();
        panel.set_class_name("accordion-text-block");
        let header = doc.create_element("div").unwrap();
        header.set_class_name("div-block-29");
        panel.append_child(&header).unwrap();
        list.append_child(&panel).unwrap();
        out.push(panel);
    }
    out
}

fn click_header(panel: &Element) {
    panel
        .query_selector(".div-block-29")
        .unwrap()
        .unwrap()
        .dyn_into::<HtmlElement>()
        .unwrap()
        .click();
}

#[wasm_bindgen_test]
fn only_one_layer_mounts() {
    let wrapper = scratch("t-single");
    let mut first = mount().unwrap();
    assert!(first.is_active());

    let second = mount().unwrap();
    assert!(!second.is_active());
    drop(second);
    assert!(first.is_active());

    first.unmount();
    assert!(!first.is_active());

    // After an unmount the page can be wired again.
    let third = mount().unwrap();
    assert!(third.is_active());
    drop(third);
    wrapper.remove();
}

#[wasm_bindgen_test]
fn accordion_keeps_at_most_one_panel_open() {
    let wrapper = scratch("t-accordion");
    let panels = build_accordion(&wrapper, 3);

    let layer = mount().unwrap();
    assert!(layer.is_active());

    click_header(&panels[0]);
    assert!(panels[0].class_list().contains("active"));

    click_header(&panels[1]);
    assert!(!panels[0].class_list().contains("active"));
    assert!(panels[1].class_list().contains("active"));
    assert!(!panels[2].class_list().contains("active"));

    click_header(&panels[1]);
    for panel in &panels {
        assert!(!panel.class_list().contains("active"));
    }
    drop(layer);
    wrapper.remove();
}

#[wasm_bindgen_test]
fn unmount_detaches_the_accordion() {
    let wrapper = scratch("t-detach");
    let panels = build_accordion(&wrapper, 2);

    let mut layer = mount().unwrap();
    click_header(&panels[0]);
    assert!(panels[0].class_list().contains("active"));

    layer.unmount();
    click_header(&panels[1]);
    assert!(!panels[1].class_list().contains("active"));
    wrapper.remove();
}

#[wasm_bindgen_test]
fn reduced_motion_reveals_everything_at_mount() {
    let wrapper = scratch("t-reduced");
    let doc = document();
    for _ in 0..3 {
        let el = doc.create_element("div").unwrap();
        el.set_class_name("reveal");
        wrapper.append_child(&el).unwrap();
    }

    let config = js_sys::JSON::parse(r#"{ "reduced_motion": true }"#).unwrap();
    let layer = mount_with(config).unwrap();
    assert!(layer.is_active());
    assert_eq!(layer.pending_reveals(), 0);

    for el in [0, 1, 2].map(|i| wrapper.children().item(i).unwrap()) {
        assert!(el.class_list().contains("is-revealed"));
        let style = el.dyn_into::<HtmlElement>().unwrap().style();
        assert_eq!(style.get_property_value("opacity").unwrap(), "1");
    }
    drop(layer);
    wrapper.remove();
}
