//! Lifecycle for the whole interaction layer. One authoritative instance per
//! page: `mount` builds it (deferring to `DOMContentLoaded` when the
//! document is still parsing), `unmount` detaches every listener, observer
//! and timer. A second `mount` while one is live logs a warning and returns
//! an inert handle instead of double-wiring the page.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use log::{info, warn};
use wasm_bindgen::closure::Closure;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;

use crate::config::SiteConfig;
use crate::dom;
use crate::handlers::accordion::Accordion;
use crate::handlers::autoplay::Autoplay;
use crate::handlers::chrome::PageChrome;
use crate::handlers::forms::FormAccents;
use crate::handlers::lazy_images::LazyImages;
use crate::handlers::menu::MenuScrollLock;
use crate::handlers::navbar::NavbarShadow;
use crate::handlers::parallax::HeroParallax;
use crate::handlers::smooth_scroll::AnchorScroll;
use crate::handlers::sticky_cta::StickyCta;
use crate::reveal::engine::RevealEngine;

thread_local! {
    static MOUNTED: Cell<bool> = Cell::new(false);
}

enum Slot {
    /// Unmounted, or a duplicate handle that never owned anything.
    Inert,
    /// Waiting for `DOMContentLoaded`.
    Deferred,
    Active(LayerInner),
}

/// Everything the layer owns. Dropping this detaches all of it.
struct LayerInner {
    engine: RevealEngine,
    _chrome: PageChrome,
    _accordion: Option<Accordion>,
    _navbar: Option<NavbarShadow>,
    _parallax: Option<HeroParallax>,
    _smooth: AnchorScroll,
    _sticky: Option<StickyCta>,
    _autoplay: Option<Autoplay>,
    _lazy: Option<LazyImages>,
    _forms: FormAccents,
    _menu: Option<MenuScrollLock>,
}

impl LayerInner {
    fn build(cfg: &SiteConfig) -> Result<Self, JsValue> {
        let reduced = cfg.reduced_motion.unwrap_or_else(dom::reduced_motion_preferred);

        let engine = RevealEngine::install(cfg, reduced)?;
        let chrome = PageChrome::install(&cfg.selectors)?;
        let accordion = Accordion::install(&cfg.selectors)?;
        let navbar = NavbarShadow::install(&cfg.selectors)?;
        let parallax = HeroParallax::install(&cfg.selectors)?;
        let smooth = AnchorScroll::install(&cfg.selectors)?;
        let sticky = StickyCta::install(&cfg.selectors)?;
        let autoplay = Autoplay::install(&cfg.selectors, cfg.autoplay_interval_ms)?;
        let lazy = LazyImages::install()?;
        let forms = FormAccents::install(&cfg.selectors)?;
        let menu = MenuScrollLock::install(&cfg.selectors)?;

        info!("interaction layer ready: {} reveal targets", engine.target_count());

        Ok(Self {
            engine,
            _chrome: chrome,
            _accordion: accordion,
            _navbar: navbar,
            _parallax: parallax,
            _smooth: smooth,
            _sticky: sticky,
            _autoplay: autoplay,
            _lazy: lazy,
            _forms: forms,
            _menu: menu,
        })
    }
}

#[wasm_bindgen]
pub struct InteractionLayer {
    primary: bool,
    slot: Rc<RefCell<Slot>>,
}

#[wasm_bindgen]
impl InteractionLayer {
    /// Tears the layer down: every listener removed, every observer
    /// disconnected, every timer cancelled. Inert handles are a no-op.
    pub fn unmount(&mut self) {
        if !self.primary {
            return;
        }
        self.primary = false;
        *self.slot.borrow_mut() = Slot::Inert;
        MOUNTED.with(|m| m.set(false));
        info!("interaction layer unmounted");
    }

    pub fn is_active(&self) -> bool {
        matches!(*self.slot.borrow(), Slot::Active(_))
    }

    /// Reveal targets still pending; 0 once everything has fired (or under
    /// reduced motion, immediately).
    pub fn pending_reveals(&self) -> usize {
        match &*self.slot.borrow() {
            Slot::Active(inner) => inner.engine.pending(),
            _ => 0,
        }
    }
}

impl Drop for InteractionLayer {
    fn drop(&mut self) {
        self.unmount();
    }
}

/// Mounts with defaults. See [`mount_with`].
#[wasm_bindgen]
pub fn mount() -> Result<InteractionLayer, JsValue> {
    mount_with(JsValue::UNDEFINED)
}

/// Builds the page's single interaction layer from a JS config object (all
/// fields optional). Initialization waits for `DOMContentLoaded` when the
/// document is still parsing.
#[wasm_bindgen]
pub fn mount_with(config: JsValue) -> Result<InteractionLayer, JsValue> {
    let cfg: SiteConfig = if config.is_undefined() || config.is_null() {
        SiteConfig::default()
    } else {
        serde_wasm_bindgen::from_value(config)?
    };

    if MOUNTED.with(|m| m.get()) {
        warn!("interaction layer already mounted; ignoring second mount");
        return Ok(InteractionLayer {
            primary: false,
            slot: Rc::new(RefCell::new(Slot::Inert)),
        });
    }
    MOUNTED.with(|m| m.set(true));

    let slot = Rc::new(RefCell::new(Slot::Deferred));
    if dom::document().ready_state() == "loading" {
        let deferred = Rc::clone(&slot);
        let on_ready = Closure::once(move || initialize_into(&deferred, &cfg));
        if let Err(err) = dom::document()
            .add_event_listener_with_callback("DOMContentLoaded", on_ready.as_ref().unchecked_ref())
        {
            MOUNTED.with(|m| m.set(false));
            return Err(err);
        }
        // Fires once per page; intentionally leaked.
        on_ready.forget();
    } else {
        initialize_into(&slot, &cfg);
    }

    Ok(InteractionLayer { primary: true, slot })
}

fn initialize_into(slot: &Rc<RefCell<Slot>>, cfg: &SiteConfig) {
    // Unmounted before the document finished parsing.
    if !matches!(*slot.borrow(), Slot::Deferred) {
        return;
    }
    match LayerInner::build(cfg) {
        Ok(inner) => *slot.borrow_mut() = Slot::Active(inner),
        Err(err) => {
            warn!("interaction layer failed to initialize: {err:?}");
            *slot.borrow_mut() = Slot::Inert;
        }
    }
}
