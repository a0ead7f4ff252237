//! Small web-sys plumbing shared by the engine and the handlers: query
//! helpers that treat missing elements as "feature not present", RAII guards
//! for event listeners and observers, and a frame gate that limits scroll
//! work to one evaluation per animation frame.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use wasm_bindgen::closure::Closure;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{
    AddEventListenerOptions, Document, Element, Event, EventTarget, HtmlElement,
    IntersectionObserver, IntersectionObserverEntry, IntersectionObserverInit, Window,
};

pub fn window() -> Window {
    web_sys::window().expect("no global window")
}

pub fn document() -> Document {
    window().document().expect("no document on window")
}

/// `querySelector` with invalid selectors and absent elements both treated as
/// "not present".
pub fn query(sel: &str) -> Option<Element> {
    document().query_selector(sel).ok().flatten()
}

pub fn query_all(sel: &str) -> Vec<Element> {
    let Ok(list) = document().query_selector_all(sel) else {
        return Vec::new();
    };
    let mut out = Vec::with_capacity(list.length() as usize);
    for i in 0..list.length() {
        if let Some(el) = list.get(i).and_then(|n| n.dyn_into::<Element>().ok()) {
            out.push(el);
        }
    }
    out
}

pub fn query_all_in(root: &Element, sel: &str) -> Vec<Element> {
    let Ok(list) = root.query_selector_all(sel) else {
        return Vec::new();
    };
    let mut out = Vec::with_capacity(list.length() as usize);
    for i in 0..list.length() {
        if let Some(el) = list.get(i).and_then(|n| n.dyn_into::<Element>().ok()) {
            out.push(el);
        }
    }
    out
}

pub fn as_html(el: &Element) -> Option<HtmlElement> {
    el.clone().dyn_into::<HtmlElement>().ok()
}

pub fn viewport_height() -> f64 {
    window()
        .inner_height()
        .ok()
        .and_then(|v| v.as_f64())
        .unwrap_or(0.0)
}

pub fn scroll_y() -> f64 {
    window().scroll_y().unwrap_or(0.0)
}

pub fn reduced_motion_preferred() -> bool {
    window()
        .match_media("(prefers-reduced-motion: reduce)")
        .ok()
        .flatten()
        .map(|mql| mql.matches())
        .unwrap_or(false)
}

pub fn media_matches(query: &str) -> bool {
    window()
        .match_media(query)
        .ok()
        .flatten()
        .map(|mql| mql.matches())
        .unwrap_or(false)
}

/// Very old hosts lack IntersectionObserver; callers fall back to revealing
/// everything immediately.
pub fn supports_intersection_observer() -> bool {
    js_sys::Reflect::has(window().as_ref(), &JsValue::from_str("IntersectionObserver"))
        .unwrap_or(false)
}

/// An installed event listener. Dropping the handle removes the listener.
pub struct EventHandle {
    target: EventTarget,
    event: &'static str,
    callback: Closure<dyn FnMut(Event)>,
}

impl EventHandle {
    pub fn listen(
        target: &EventTarget,
        event: &'static str,
        f: impl FnMut(Event) + 'static,
    ) -> Result<Self, JsValue> {
        let callback = Closure::wrap(Box::new(f) as Box<dyn FnMut(Event)>);
        target.add_event_listener_with_callback(event, callback.as_ref().unchecked_ref())?;
        Ok(Self { target: target.clone(), event, callback })
    }

    /// Passive registration for scroll-path listeners.
    pub fn listen_passive(
        target: &EventTarget,
        event: &'static str,
        f: impl FnMut(Event) + 'static,
    ) -> Result<Self, JsValue> {
        let callback = Closure::wrap(Box::new(f) as Box<dyn FnMut(Event)>);
        let options = AddEventListenerOptions::new();
        options.set_passive(true);
        target.add_event_listener_with_callback_and_add_event_listener_options(
            event,
            callback.as_ref().unchecked_ref(),
            &options,
        )?;
        Ok(Self { target: target.clone(), event, callback })
    }
}

impl Drop for EventHandle {
    fn drop(&mut self) {
        let _ = self
            .target
            .remove_event_listener_with_callback(self.event, self.callback.as_ref().unchecked_ref());
    }
}

/// Schedules at most one `requestAnimationFrame` callback per burst of
/// scroll/resize events. The pending flag is cleared at the start of the
/// frame callback, so events arriving during evaluation schedule the next
/// frame rather than being lost.
pub struct FrameGate {
    inner: Rc<GateInner>,
}

struct GateInner {
    ticking: Cell<bool>,
    raf_id: Cell<i32>,
    callback: RefCell<Option<Closure<dyn FnMut()>>>,
}

impl FrameGate {
    pub fn new(mut f: impl FnMut() + 'static) -> Self {
        let inner = Rc::new(GateInner {
            ticking: Cell::new(false),
            raf_id: Cell::new(0),
            callback: RefCell::new(None),
        });
        let gate = Rc::downgrade(&inner);
        let callback = Closure::wrap(Box::new(move || {
            if let Some(gate) = gate.upgrade() {
                gate.ticking.set(false);
            }
            f();
        }) as Box<dyn FnMut()>);
        *inner.callback.borrow_mut() = Some(callback);
        Self { inner }
    }

    pub fn schedule(&self) {
        if self.inner.ticking.get() {
            return;
        }
        let borrowed = self.inner.callback.borrow();
        let Some(callback) = borrowed.as_ref() else {
            return;
        };
        match window().request_animation_frame(callback.as_ref().unchecked_ref()) {
            Ok(id) => {
                self.inner.ticking.set(true);
                self.inner.raf_id.set(id);
            }
            Err(_) => log::warn!("requestAnimationFrame rejected; frame skipped"),
        }
    }
}

impl Drop for FrameGate {
    fn drop(&mut self) {
        if self.inner.ticking.get() {
            let _ = window().cancel_animation_frame(self.inner.raf_id.get());
        }
        self.inner.callback.borrow_mut().take();
    }
}

/// An IntersectionObserver plus the closure backing it. Dropping the watch
/// disconnects the observer.
pub struct IntersectionWatch {
    observer: IntersectionObserver,
    _callback: Closure<dyn FnMut(js_sys::Array, IntersectionObserver)>,
}

impl IntersectionWatch {
    pub fn new(
        root_margin: Option<&str>,
        threshold: Option<f64>,
        mut f: impl FnMut(&IntersectionObserverEntry, &IntersectionObserver) + 'static,
    ) -> Result<Self, JsValue> {
        let callback = Closure::wrap(Box::new(
            move |entries: js_sys::Array, observer: IntersectionObserver| {
                for entry in entries.iter() {
                    if let Ok(entry) = entry.dyn_into::<IntersectionObserverEntry>() {
                        f(&entry, &observer);
                    }
                }
            },
        )
            as Box<dyn FnMut(js_sys::Array, IntersectionObserver)>);

        let options = IntersectionObserverInit::new();
        if let Some(margin) = root_margin {
            options.set_root_margin(margin);
        }
        if let Some(threshold) = threshold {
            options.set_threshold(&JsValue::from_f64(threshold));
        }
        let observer = IntersectionObserver::new_with_options(
            callback.as_ref().unchecked_ref(),
            &options,
        )?;
        Ok(Self { observer, _callback: callback })
    }

    pub fn observe(&self, el: &Element) {
        self.observer.observe(el);
    }
}

impl Drop for IntersectionWatch {
    fn drop(&mut self) {
        self.observer.disconnect();
    }
}
