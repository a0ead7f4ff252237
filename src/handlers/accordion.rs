//! FAQ accordion. Click handling is delegated to the list container; at most
//! one panel is open at a time. The page builder's runtime keeps trying to
//! re-attach its own interaction attributes to the panels, so a mutation
//! watch re-asserts the canonical state (attributes stripped, tracked panel
//! open, everything else closed) whenever the subtree is touched.

use std::cell::{Cell, RefCell};
use std::rc::{Rc, Weak};

use gloo_timers::callback::Timeout;
use log::{debug, info};
use wasm_bindgen::closure::Closure;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{Element, MutationObserver, MutationObserverInit};

use crate::config::Selectors;
use crate::dom::{self, EventHandle};

/// Attributes the host runtime re-attaches that must stay stripped.
const STRIPPED_ATTRIBUTES: [&str; 1] = ["data-w-id"];

/// Debounce window for the re-assert pass.
const REASSERT_DELAY_MS: u32 = 100;

/// The open/close decision: clicking the open panel closes it, clicking any
/// other panel moves the single open slot there.
pub fn next_open(open: Option<usize>, clicked: usize) -> Option<usize> {
    if open == Some(clicked) {
        None
    } else {
        Some(clicked)
    }
}

pub struct Accordion {
    inner: Rc<AccordionInner>,
    _click: EventHandle,
    _watch: MutationWatch,
}

struct AccordionInner {
    container: Element,
    panel_selector: String,
    header_selector: String,
    open_class: String,
    open: Cell<Option<usize>>,
    pending_reassert: RefCell<Option<Timeout>>,
}

impl Accordion {
    pub fn install(selectors: &Selectors) -> Result<Option<Self>, JsValue> {
        let Some(container) = dom::query(&selectors.accordion_list) else {
            debug!("accordion: no list on this page");
            return Ok(None);
        };

        let inner = Rc::new(AccordionInner {
            container,
            panel_selector: selectors.accordion_panel.clone(),
            header_selector: selectors.accordion_header.clone(),
            open_class: selectors.accordion_open_class.clone(),
            open: Cell::new(None),
            pending_reassert: RefCell::new(None),
        });

        // Canonical state before the first click: everything closed,
        // interference stripped.
        reassert(&inner);

        let click = {
            let inner = Rc::clone(&inner);
            EventHandle::listen(inner.container.clone().as_ref(), "click", move |e| {
                let Some(target) = e.target().and_then(|t| t.dyn_into::<Element>().ok()) else {
                    return;
                };
                let Ok(Some(header)) = target.closest(&inner.header_selector) else {
                    return;
                };
                let Ok(Some(panel)) = header.closest(&inner.panel_selector) else {
                    return;
                };
                e.prevent_default();
                e.stop_propagation();

                let panels = dom::query_all_in(&inner.container, &inner.panel_selector);
                let Some(clicked) = panels
                    .iter()
                    .position(|p| p.is_same_node(Some(panel.as_ref())))
                else {
                    return;
                };
                apply_open(&inner, &panels, next_open(inner.open.get(), clicked));
            })?
        };

        let watch = MutationWatch::install(&inner)?;

        let panel_count = dom::query_all_in(&inner.container, &inner.panel_selector).len();
        info!("accordion ready: {panel_count} panels");

        Ok(Some(Self { inner, _click: click, _watch: watch }))
    }

    #[allow(dead_code)]
    pub fn open_index(&self) -> Option<usize> {
        self.inner.open.get()
    }
}

fn apply_open(inner: &AccordionInner, panels: &[Element], next: Option<usize>) {
    for (i, panel) in panels.iter().enumerate() {
        if next == Some(i) {
            let _ = panel.class_list().add_1(&inner.open_class);
        } else {
            let _ = panel.class_list().remove_1(&inner.open_class);
        }
    }
    inner.open.set(next);
}

/// Idempotent restoration of the canonical accordion state. Safe to run at
/// any time; converges in one pass.
fn reassert(inner: &AccordionInner) {
    for attr in STRIPPED_ATTRIBUTES {
        for el in dom::query_all_in(&inner.container, &format!("[{attr}]")) {
            let _ = el.remove_attribute(attr);
        }
    }
    let panels = dom::query_all_in(&inner.container, &inner.panel_selector);
    apply_open(inner, &panels, inner.open.get());
}

fn schedule_reassert(weak: &Weak<AccordionInner>) {
    let Some(inner) = weak.upgrade() else { return };
    let weak = weak.clone();
    let timeout = Timeout::new(REASSERT_DELAY_MS, move || {
        if let Some(inner) = weak.upgrade() {
            inner.pending_reassert.borrow_mut().take();
            reassert(&inner);
        }
    });
    // Replacing a pending timeout cancels it: the pass runs once per burst.
    *inner.pending_reassert.borrow_mut() = Some(timeout);
}

struct MutationWatch {
    observer: MutationObserver,
    _callback: Closure<dyn FnMut(js_sys::Array, MutationObserver)>,
}

impl MutationWatch {
    fn install(inner: &Rc<AccordionInner>) -> Result<Self, JsValue> {
        let weak = Rc::downgrade(inner);
        let callback = Closure::wrap(Box::new(
            move |_records: js_sys::Array, _observer: MutationObserver| {
                schedule_reassert(&weak);
            },
        )
            as Box<dyn FnMut(js_sys::Array, MutationObserver)>);

        let observer = MutationObserver::new(callback.as_ref().unchecked_ref())?;
        let init = MutationObserverInit::new();
        init.set_attributes(true);
        init.set_subtree(true);
        let filter = js_sys::Array::new();
        for attr in STRIPPED_ATTRIBUTES {
            filter.push(&JsValue::from_str(attr));
        }
        filter.push(&JsValue::from_str("style"));
        init.set_attribute_filter(&filter);
        observer.observe_with_options(inner.container.as_ref(), &init)?;

        Ok(Self { observer, _callback: callback })
    }
}

impl Drop for MutationWatch {
    fn drop(&mut self) {
        self.observer.disconnect();
    }
}

#[cfg(test)]
mod tests {
    use super::next_open;

    #[test]
    fn clicking_a_closed_panel_opens_only_it() {
        // A open, click B: exactly B open.
        assert_eq!(next_open(Some(0), 1), Some(1));
        // nothing open, click C
        assert_eq!(next_open(None, 2), Some(2));
    }

    #[test]
    fn clicking_the_open_panel_closes_everything() {
        assert_eq!(next_open(Some(1), 1), None);
    }

    #[test]
    fn at_most_one_panel_open_through_any_click_sequence() {
        let mut open = None;
        for clicked in [0, 1, 1, 2, 0, 0, 2] {
            open = next_open(open, clicked);
            // the state itself can only ever name zero or one panel
            assert!(open.is_none() || open.map(|i| i <= 2).unwrap_or(false));
        }
        assert_eq!(open, Some(2));
    }
}
