//! The scroll reveal engine. One instance per page, one strategy picked at
//! construction:
//!
//! * `Threshold` — one-shot IntersectionObserver reveal. Cheap; stagger is
//!   expressed as an inline transition-delay and the stylesheet animates the
//!   class flip.
//! * `Scrub` — scroll-linked interpolation. Each frame maps the element's
//!   viewport position to an eased progress and writes opacity/transform
//!   inline.
//!
//! Targets are collected once at install time; whatever the host runtime
//! inserts later is not tracked. Every target transitions `Pending →
//! Revealed` exactly once and is then left alone.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use log::{debug, info};
use wasm_bindgen::JsValue;
use web_sys::HtmlElement;

use crate::config::{Ease, Markers, RevealMode, SiteConfig};
use crate::dom::{self, EventHandle, FrameGate, IntersectionWatch};
use crate::reveal::annotate;
use crate::reveal::profile::{MotionKind, MotionProfile};
use crate::reveal::progress;

struct Target {
    el: HtmlElement,
    profile: MotionProfile,
    stagger_index: usize,
    revealed: Cell<bool>,
}

struct Inner {
    targets: Vec<Target>,
    revealed_class: String,
    stagger_container_selector: String,
    start_frac: f64,
    end_frac: f64,
    gap: f64,
    ease: Ease,
    remaining: Cell<usize>,
    suspended: Cell<bool>,
    listeners: RefCell<Vec<EventHandle>>,
    gate: RefCell<Option<FrameGate>>,
    io: RefCell<Option<IntersectionWatch>>,
}

pub struct RevealEngine {
    inner: Rc<Inner>,
}

impl RevealEngine {
    /// Annotates the document, collects the fixed target set and wires the
    /// configured strategy. With reduced motion active every target goes
    /// straight to its terminal state and nothing is scheduled, ever.
    pub fn install(cfg: &SiteConfig, reduced_motion: bool) -> Result<Self, JsValue> {
        annotate::apply(&cfg.annotations, &cfg.markers);

        let targets = collect(&cfg.markers);
        let inner = Rc::new(Inner {
            remaining: Cell::new(targets.len()),
            targets,
            revealed_class: cfg.markers.revealed_class.clone(),
            stagger_container_selector: format!(".{}", cfg.markers.stagger_container_class),
            start_frac: cfg.start_trigger,
            end_frac: cfg.end_trigger,
            gap: cfg.stagger_gap,
            ease: cfg.ease,
            suspended: Cell::new(false),
            listeners: RefCell::new(Vec::new()),
            gate: RefCell::new(None),
            io: RefCell::new(None),
        });
        let engine = Self { inner: Rc::clone(&inner) };

        if inner.targets.is_empty() {
            debug!("reveal: no targets on this page");
            return Ok(engine);
        }
        debug!("reveal: {} targets, {:?} mode", inner.targets.len(), cfg.reveal_mode);

        if reduced_motion {
            info!("reveal: reduced motion, revealing everything up front");
            reveal_all(&inner);
            return Ok(engine);
        }

        match cfg.reveal_mode {
            RevealMode::Threshold => install_threshold(&inner, cfg)?,
            RevealMode::Scrub => install_scrub(&inner)?,
        }
        Ok(engine)
    }

    pub fn target_count(&self) -> usize {
        self.inner.targets.len()
    }

    /// Targets still pending. Zero immediately after install under reduced
    /// motion.
    pub fn pending(&self) -> usize {
        self.inner.remaining.get()
    }
}

fn collect(markers: &Markers) -> Vec<Target> {
    let mut targets: Vec<Target> = Vec::new();

    for rule in &markers.profiles {
        for el in dom::query_all(&format!(".{}", rule.class)) {
            // Stagger items are collected with their container below.
            if el.class_list().contains(&markers.stagger_item_class) {
                continue;
            }
            let Some(el) = dom::as_html(&el) else { continue };
            targets.push(Target {
                el,
                profile: rule.kind.profile(),
                stagger_index: 0,
                revealed: Cell::new(false),
            });
        }
    }

    let item_selector = format!(".{}", markers.stagger_item_class);
    for container in dom::query_all(&format!(".{}", markers.stagger_container_class)) {
        for el in dom::query_all_in(&container, &item_selector) {
            if targets.iter().any(|t| t.el.is_same_node(Some(el.as_ref()))) {
                continue;
            }
            let index = sibling_index(&el, &markers.stagger_item_class);
            let Some(el) = dom::as_html(&el) else { continue };
            targets.push(Target {
                el,
                profile: MotionKind::Rise.profile(),
                stagger_index: index,
                revealed: Cell::new(false),
            });
        }
    }

    targets
}

/// Position of `el` among the children of its direct parent that carry the
/// stagger item class, in document order.
fn sibling_index(el: &web_sys::Element, item_class: &str) -> usize {
    let Some(parent) = el.parent_element() else { return 0 };
    let children = parent.children();
    let mut index = 0;
    for i in 0..children.length() {
        let Some(child) = children.item(i) else { continue };
        if !child.class_list().contains(item_class) {
            continue;
        }
        if child.is_same_node(Some(el.as_ref())) {
            return index;
        }
        index += 1;
    }
    0
}

fn reveal_all(inner: &Rc<Inner>) {
    for t in &inner.targets {
        reveal_target(inner, t);
    }
}

/// Terminal state: opacity 1, no transform, marker class set. One-shot; a
/// second call is a no-op.
fn reveal_target(inner: &Inner, t: &Target) {
    if t.revealed.replace(true) {
        return;
    }
    let style = t.el.style();
    let _ = style.set_property("opacity", "1");
    let _ = style.set_property("transform", "none");
    let _ = t.el.class_list().add_1(&inner.revealed_class);
    if let Ok(Some(parent)) = t.el.closest(&inner.stagger_container_selector) {
        let _ = parent.class_list().add_1(&inner.revealed_class);
    }
    inner.remaining.set(inner.remaining.get().saturating_sub(1));
}

fn install_threshold(inner: &Rc<Inner>, cfg: &SiteConfig) -> Result<(), JsValue> {
    if !dom::supports_intersection_observer() {
        info!("reveal: IntersectionObserver missing, revealing everything");
        reveal_all(inner);
        return Ok(());
    }

    // Stagger becomes a per-sibling transition delay.
    for t in &inner.targets {
        if t.stagger_index > 0 {
            let delay_ms = t.stagger_index as u32 * cfg.stagger_gap_ms;
            let _ = t.el.style().set_property("transition-delay", &format!("{delay_ms}ms"));
        }
    }

    let weak = Rc::downgrade(inner);
    let watch = IntersectionWatch::new(
        Some(&cfg.intersection_margin),
        Some(cfg.intersection_threshold),
        move |entry, observer| {
            if !entry.is_intersecting() {
                return;
            }
            let el = entry.target();
            observer.unobserve(&el);
            let Some(inner) = weak.upgrade() else { return };
            if let Some(t) = inner
                .targets
                .iter()
                .find(|t| t.el.is_same_node(Some(el.as_ref())))
            {
                reveal_target(&inner, t);
            }
        },
    )?;

    for t in &inner.targets {
        watch.observe(t.el.as_ref());
    }
    *inner.io.borrow_mut() = Some(watch);
    Ok(())
}

fn install_scrub(inner: &Rc<Inner>) -> Result<(), JsValue> {
    let weak = Rc::downgrade(inner);
    let gate = FrameGate::new(move || {
        if let Some(inner) = weak.upgrade() {
            evaluate(&inner);
        }
    });
    *inner.gate.borrow_mut() = Some(gate);

    // Above-the-fold content must be correct before the first scroll event.
    evaluate(inner);
    if inner.remaining.get() == 0 {
        // Everything was already in view; nothing to listen for.
        return Ok(());
    }

    let window = dom::window();
    let mut listeners = Vec::with_capacity(3);
    for event in ["scroll", "resize"] {
        let weak = Rc::downgrade(inner);
        listeners.push(EventHandle::listen_passive(window.as_ref(), event, move |_| {
            let Some(inner) = weak.upgrade() else { return };
            if inner.suspended.get() {
                return;
            }
            if let Some(gate) = inner.gate.borrow().as_ref() {
                gate.schedule();
            };
        })?);
    }

    // No wasted frames while the tab is in the background; one catch-up
    // evaluation on return.
    let weak = Rc::downgrade(inner);
    listeners.push(EventHandle::listen(
        dom::document().as_ref(),
        "visibilitychange",
        move |_| {
            let Some(inner) = weak.upgrade() else { return };
            let hidden = dom::document().hidden();
            inner.suspended.set(hidden);
            if !hidden {
                if let Some(gate) = inner.gate.borrow().as_ref() {
                    gate.schedule();
                }
            }
        },
    )?);

    *inner.listeners.borrow_mut() = listeners;
    Ok(())
}

fn evaluate(inner: &Rc<Inner>) {
    let viewport = dom::viewport_height();
    if viewport <= 0.0 {
        return;
    }
    for t in &inner.targets {
        if t.revealed.get() {
            continue;
        }
        // Detached elements have no usable geometry; skip for this frame.
        if !t.el.is_connected() {
            continue;
        }
        let top = t.el.get_bounding_client_rect().top();
        let raw = progress::scroll_progress(top, viewport, inner.start_frac, inner.end_frac);
        let delay = progress::stagger_delay(t.stagger_index, inner.gap);
        let (eased, done) = progress::scrub_frame(false, raw, delay, inner.ease);
        if done {
            reveal_target(inner, t);
        } else {
            apply_progress(t, eased);
        }
    }
    if inner.remaining.get() == 0 {
        // Everything revealed; the scroll path has nothing left to do.
        inner.listeners.borrow_mut().clear();
        inner.gate.borrow_mut().take();
        debug!("reveal: all targets revealed, scroll listeners detached");
    }
}

fn apply_progress(t: &Target, eased: f64) {
    let style = t.el.style();
    let _ = style.set_property("opacity", &format!("{eased:.4}"));
    let transform = t.profile.transform_at(eased);
    if transform.is_empty() {
        let _ = style.remove_property("transform");
    } else {
        let _ = style.set_property("transform", &transform);
    }
    // Inline scrub must not fight a stylesheet transition.
    let _ = style.set_property("transition", "none");
}
