//! Testimonial slider autoplay. The builder's own slider handles the actual
//! slide transition; we click its next-arrow on an interval. The interval is
//! cancelled outright while the pointer is over the slider or the tab is in
//! the background, and re-armed when both clear.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use gloo_timers::callback::Interval;
use log::debug;
use wasm_bindgen::JsValue;
use web_sys::Element;

use crate::config::Selectors;
use crate::dom::{self, EventHandle};

/// Why the interval is currently stopped. Advancing is allowed only when
/// neither flag is set.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct AutoplayGate {
    pub hovered: bool,
    pub hidden: bool,
}

impl AutoplayGate {
    pub fn should_run(self) -> bool {
        !self.hovered && !self.hidden
    }
}

pub struct Autoplay {
    inner: Rc<AutoplayInner>,
    _listeners: Vec<EventHandle>,
}

struct AutoplayInner {
    slider: Element,
    next_selector: String,
    interval_ms: u32,
    gate: Cell<AutoplayGate>,
    timer: RefCell<Option<Interval>>,
}

impl Autoplay {
    pub fn install(selectors: &Selectors, interval_ms: u32) -> Result<Option<Self>, JsValue> {
        let Some(slider) = dom::query(&selectors.slider) else {
            debug!("autoplay: no slider on this page");
            return Ok(None);
        };

        let inner = Rc::new(AutoplayInner {
            slider,
            next_selector: selectors.slider_next.clone(),
            interval_ms,
            gate: Cell::new(AutoplayGate {
                hovered: false,
                hidden: dom::document().hidden(),
            }),
            timer: RefCell::new(None),
        });

        let mut listeners = Vec::with_capacity(3);
        listeners.push(gate_listener(&inner, inner.slider.clone().into(), "mouseenter", |g| {
            g.hovered = true;
        })?);
        listeners.push(gate_listener(&inner, inner.slider.clone().into(), "mouseleave", |g| {
            g.hovered = false;
        })?);
        {
            let weak = Rc::downgrade(&inner);
            listeners.push(EventHandle::listen(
                dom::document().as_ref(),
                "visibilitychange",
                move |_| {
                    let Some(inner) = weak.upgrade() else { return };
                    let mut gate = inner.gate.get();
                    gate.hidden = dom::document().hidden();
                    inner.gate.set(gate);
                    sync_timer(&inner);
                },
            )?);
        }

        sync_timer(&inner);
        Ok(Some(Self { inner, _listeners: listeners }))
    }

    #[allow(dead_code)]
    pub fn running(&self) -> bool {
        self.inner.timer.borrow().is_some()
    }
}

fn gate_listener(
    inner: &Rc<AutoplayInner>,
    target: web_sys::EventTarget,
    event: &'static str,
    update: impl Fn(&mut AutoplayGate) + 'static,
) -> Result<EventHandle, JsValue> {
    let weak = Rc::downgrade(inner);
    EventHandle::listen(&target, event, move |_| {
        let Some(inner) = weak.upgrade() else { return };
        let mut gate = inner.gate.get();
        update(&mut gate);
        inner.gate.set(gate);
        sync_timer(&inner);
    })
}

/// Brings the interval in line with the gate: running when allowed, dropped
/// (and thereby cancelled) when not. Re-arming starts a fresh full period,
/// so leaving the slider never triggers an instant advance.
fn sync_timer(inner: &Rc<AutoplayInner>) {
    let should_run = inner.gate.get().should_run();
    let mut timer = inner.timer.borrow_mut();
    match (should_run, timer.is_some()) {
        (true, false) => {
            let weak = Rc::downgrade(inner);
            *timer = Some(Interval::new(inner.interval_ms, move || {
                if let Some(inner) = weak.upgrade() {
                    advance(&inner);
                }
            }));
        }
        (false, true) => {
            *timer = None;
        }
        _ => {}
    }
}

fn advance(inner: &AutoplayInner) {
    let next = inner
        .slider
        .query_selector(&inner.next_selector)
        .ok()
        .flatten()
        .and_then(|el| dom::as_html(&el));
    if let Some(next) = next {
        next.click();
    }
}

#[cfg(test)]
mod tests {
    use super::AutoplayGate;

    #[test]
    fn runs_only_when_unhovered_and_visible() {
        assert!(AutoplayGate { hovered: false, hidden: false }.should_run());
        assert!(!AutoplayGate { hovered: true, hidden: false }.should_run());
        assert!(!AutoplayGate { hovered: false, hidden: true }.should_run());
        assert!(!AutoplayGate { hovered: true, hidden: true }.should_run());
    }

    #[test]
    fn hover_cycle_restores_autoplay() {
        let mut gate = AutoplayGate::default();
        gate.hovered = true;
        assert!(!gate.should_run());
        gate.hovered = false;
        assert!(gate.should_run());
    }
}
