//! Sticky call-to-action visibility: the floating CTA gets out of the way
//! while the contact form or the footer is on screen.

use log::debug;
use wasm_bindgen::JsValue;

use crate::config::Selectors;
use crate::dom::{self, IntersectionWatch};

const VISIBILITY_THRESHOLD: f64 = 0.2;

pub struct StickyCta {
    _watch: IntersectionWatch,
}

impl StickyCta {
    pub fn install(selectors: &Selectors) -> Result<Option<Self>, JsValue> {
        let Some(cta) = dom::query(&selectors.sticky_cta) else {
            debug!("sticky cta: not present");
            return Ok(None);
        };
        if !dom::supports_intersection_observer() {
            // Without an observer the CTA simply stays visible.
            return Ok(None);
        }

        let watch = IntersectionWatch::new(None, Some(VISIBILITY_THRESHOLD), move |entry, _| {
            if entry.is_intersecting() {
                let _ = cta.class_list().add_1("hidden");
            } else {
                let _ = cta.class_list().remove_1("hidden");
            }
        })?;

        let mut observed = 0;
        for selector in [&selectors.contact_form, &selectors.footer] {
            if let Some(el) = dom::query(selector) {
                watch.observe(&el);
                observed += 1;
            }
        }
        if observed == 0 {
            return Ok(None);
        }
        Ok(Some(Self { _watch: watch }))
    }
}
