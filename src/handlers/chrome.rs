//! Page-level chrome around the animations: scroll restoration, the
//! preloader release on `load`, and a body marker while the tab is hidden so
//! the stylesheet can pause its own animations.

use gloo_timers::callback::Timeout;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::ScrollRestoration;

use crate::config::Selectors;
use crate::dom::{self, EventHandle};

const HERO_RELEASE_DELAY_MS: u32 = 100;

pub struct PageChrome {
    _visibility: EventHandle,
}

impl PageChrome {
    pub fn install(selectors: &Selectors) -> Result<Self, JsValue> {
        let window = dom::window();

        // Never restore a mid-page scroll position into a half-revealed
        // layout.
        if let Ok(history) = window.history() {
            let _ = history.set_scroll_restoration(ScrollRestoration::Manual);
        }

        let hero_selector = selectors.hero_entrance.clone();
        if dom::document().ready_state() == "complete" {
            on_loaded(&hero_selector);
        } else {
            let on_load = Closure::once(move || on_loaded(&hero_selector));
            window.add_event_listener_with_callback("load", on_load.as_ref().unchecked_ref())?;
            // One-shot for the lifetime of the page; intentionally leaked.
            on_load.forget();
        }

        let visibility = EventHandle::listen(
            dom::document().as_ref(),
            "visibilitychange",
            move |_| {
                let Some(body) = dom::document().body() else { return };
                if dom::document().hidden() {
                    let _ = body.class_list().add_1("animations-paused");
                } else {
                    let _ = body.class_list().remove_1("animations-paused");
                }
            },
        )?;

        Ok(Self { _visibility: visibility })
    }
}

fn on_loaded(hero_selector: &str) {
    let window = dom::window();
    window.scroll_to_with_x_and_y(0.0, 0.0);
    if let Some(body) = dom::document().body() {
        let _ = body.class_list().add_1("loaded");
    }

    // Release the hero entrance elements just after the preloader clears.
    let hero_selector = hero_selector.to_owned();
    Timeout::new(HERO_RELEASE_DELAY_MS, move || {
        for el in dom::query_all(&hero_selector) {
            let Some(el) = dom::as_html(&el) else { continue };
            let _ = el.style().set_property("opacity", "1");
            let _ = el.style().set_property("transform", "translateY(0)");
        }
    })
    .forget();
}
