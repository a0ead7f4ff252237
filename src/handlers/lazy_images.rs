//! Lazy image loading: placeholders carry the real source in `data-src`.
//! Shortly before a placeholder scrolls into view the real source is swapped
//! in and the image fades up on `load`. One-shot per image.

use log::debug;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{Element, HtmlImageElement};

use crate::dom::{self, IntersectionWatch};

const PRELOAD_MARGIN: &str = "50px";
const SOURCE_ATTRIBUTE: &str = "data-src";

pub struct LazyImages {
    _watch: Option<IntersectionWatch>,
}

impl LazyImages {
    pub fn install() -> Result<Option<Self>, JsValue> {
        let placeholders = dom::query_all(&format!("img[{SOURCE_ATTRIBUTE}]"));
        if placeholders.is_empty() {
            debug!("lazy images: none on this page");
            return Ok(None);
        }

        if !dom::supports_intersection_observer() {
            // No observer: load everything now rather than never.
            for img in &placeholders {
                swap_source(img, false);
            }
            return Ok(Some(Self { _watch: None }));
        }

        let watch = IntersectionWatch::new(Some(PRELOAD_MARGIN), None, |entry, observer| {
            if !entry.is_intersecting() {
                return;
            }
            let img = entry.target();
            observer.unobserve(&img);
            swap_source(&img, true);
        })?;

        for img in &placeholders {
            if let Some(img) = dom::as_html(img) {
                let _ = img.style().set_property("opacity", "0");
                let _ = img.style().set_property("transition", "opacity 0.5s ease");
            }
            watch.observe(img);
        }
        debug!("lazy images: observing {}", placeholders.len());
        Ok(Some(Self { _watch: Some(watch) }))
    }
}

fn swap_source(el: &Element, fade: bool) {
    let Some(src) = el.get_attribute(SOURCE_ATTRIBUTE) else { return };
    let Ok(img) = el.clone().dyn_into::<HtmlImageElement>() else { return };

    if fade {
        // Fade up once the real source has actually arrived.
        let on_load = {
            let img = img.clone();
            Closure::once(move || {
                let _ = img.style().set_property("opacity", "1");
            })
        };
        img.set_onload(Some(on_load.as_ref().unchecked_ref()));
        on_load.forget();
    }

    img.set_src(&src);
    let _ = img.remove_attribute(SOURCE_ATTRIBUTE);
}
