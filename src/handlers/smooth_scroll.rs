//! Smooth scrolling for in-page anchor links: cancel the default jump and
//! animate to the target, offset by the fixed navbar plus a little breathing
//! room.

use log::debug;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{Element, ScrollBehavior, ScrollToOptions};

use crate::config::Selectors;
use crate::dom::{self, EventHandle};

const EXTRA_OFFSET_PX: f64 = 20.0;

pub struct AnchorScroll {
    _clicks: Vec<EventHandle>,
}

impl AnchorScroll {
    pub fn install(selectors: &Selectors) -> Result<Self, JsValue> {
        let navbar_selector = selectors.navbar.clone();
        let mut clicks = Vec::new();

        for anchor in dom::query_all("a[href^='#']") {
            let navbar_selector = navbar_selector.clone();
            clicks.push(EventHandle::listen(anchor.as_ref(), "click", move |e| {
                let Some(anchor) = e.current_target().and_then(|t| t.dyn_into::<Element>().ok())
                else {
                    return;
                };
                let Some(href) = anchor.get_attribute("href") else { return };
                if href == "#" {
                    return;
                }
                let Some(target) = dom::query(&href) else { return };
                e.prevent_default();
                scroll_to(&target, &navbar_selector);
            })?);
        }

        debug!("smooth scroll: {} anchors wired", clicks.len());
        Ok(Self { _clicks: clicks })
    }
}

fn scroll_to(target: &Element, navbar_selector: &str) {
    let nav_height = dom::query(navbar_selector)
        .and_then(|el| dom::as_html(&el))
        .map(|el| f64::from(el.offset_height()))
        .unwrap_or(0.0);
    let top = target.get_bounding_client_rect().top() + dom::scroll_y() - nav_height - EXTRA_OFFSET_PX;

    let options = ScrollToOptions::new();
    options.set_top(top);
    options.set_behavior(ScrollBehavior::Smooth);
    dom::window().scroll_to_with_scroll_to_options(&options);
}
