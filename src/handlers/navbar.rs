//! Navbar shadow: past 50px of scroll the navbar carries a `scrolled` class.
//! The class flip is rAF-throttled so a scroll burst costs one frame at most.

use std::rc::Rc;

use log::debug;
use wasm_bindgen::JsValue;
use web_sys::Element;

use crate::config::Selectors;
use crate::dom::{self, EventHandle, FrameGate};

const SCROLL_THRESHOLD_PX: f64 = 50.0;

pub struct NavbarShadow {
    _scroll: EventHandle,
    _gate: Rc<FrameGate>,
}

impl NavbarShadow {
    pub fn install(selectors: &Selectors) -> Result<Option<Self>, JsValue> {
        let Some(navbar) = dom::query(&selectors.navbar) else {
            debug!("navbar: not present");
            return Ok(None);
        };

        let gate = Rc::new(FrameGate::new({
            let navbar = navbar.clone();
            move || update(&navbar)
        }));

        // Correct state before the first scroll event.
        update(&navbar);

        let scroll = {
            let gate = Rc::clone(&gate);
            EventHandle::listen_passive(dom::window().as_ref(), "scroll", move |_| {
                gate.schedule();
            })?
        };

        Ok(Some(Self { _scroll: scroll, _gate: gate }))
    }
}

fn update(navbar: &Element) {
    if dom::scroll_y() > SCROLL_THRESHOLD_PX {
        let _ = navbar.class_list().add_1("scrolled");
    } else {
        let _ = navbar.class_list().remove_1("scrolled");
    }
}
