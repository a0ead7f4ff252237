//! Hero parallax: the cover image's background zooms slowly with scroll.
//! Desktop only; the effect is skipped entirely below 768px.

use log::debug;
use wasm_bindgen::JsValue;
use web_sys::HtmlElement;

use crate::config::Selectors;
use crate::dom::{self, EventHandle};

/// Pixels of scroll per unit of added scale.
const SCROLL_PER_SCALE: f64 = 2000.0;
const MAX_SCALE: f64 = 1.5;

pub struct HeroParallax {
    _scroll: EventHandle,
}

impl HeroParallax {
    pub fn install(selectors: &Selectors) -> Result<Option<Self>, JsValue> {
        let cover = dom::query(&selectors.cover_image).and_then(|el| dom::as_html(&el));
        let Some(cover) = cover else {
            debug!("parallax: no cover image");
            return Ok(None);
        };
        if !dom::media_matches("(min-width: 768px)") {
            debug!("parallax: viewport too small, skipping");
            return Ok(None);
        }

        let scroll = EventHandle::listen_passive(dom::window().as_ref(), "scroll", move |_| {
            apply(&cover, dom::scroll_y());
        })?;
        Ok(Some(Self { _scroll: scroll }))
    }
}

fn apply(cover: &HtmlElement, scroll_y: f64) {
    let scale = 1.0 + scroll_y / SCROLL_PER_SCALE;
    if scale < MAX_SCALE {
        let _ = cover
            .style()
            .set_property("background-size", &format!("{:.2}%", 100.0 * scale));
    }
}

#[cfg(test)]
mod tests {
    // The scale curve itself, without a DOM.
    fn scale_at(scroll_y: f64) -> f64 {
        1.0 + scroll_y / super::SCROLL_PER_SCALE
    }

    #[test]
    fn rest_position_is_unscaled() {
        assert_eq!(scale_at(0.0), 1.0);
    }

    #[test]
    fn grows_with_scroll_until_the_cap() {
        assert_eq!(scale_at(500.0), 1.25);
        assert!(scale_at(900.0) < super::MAX_SCALE);
        assert!(scale_at(1100.0) >= super::MAX_SCALE);
    }
}
