//! Mobile menu: while the builder's nav menu is open, page scrolling is
//! locked. The builder toggles the menu itself; we only mirror its open
//! class onto a body overflow lock.

use log::debug;
use wasm_bindgen::JsValue;

use crate::config::Selectors;
use crate::dom::{self, EventHandle};

pub struct MenuScrollLock {
    _click: EventHandle,
}

impl MenuScrollLock {
    pub fn install(selectors: &Selectors) -> Result<Option<Self>, JsValue> {
        let Some(button) = dom::query(&selectors.menu_button) else {
            debug!("menu: no button on this page");
            return Ok(None);
        };
        let Some(menu) = dom::query(&selectors.nav_menu) else {
            debug!("menu: no nav menu on this page");
            return Ok(None);
        };

        let open_class = selectors.menu_open_class.clone();
        let click = EventHandle::listen(button.as_ref(), "click", move |_| {
            let Some(body) = dom::document().body() else { return };
            // The click lands before the builder flips the class, so an
            // open menu here means it is about to close.
            if menu.class_list().contains(&open_class) {
                let _ = body.style().remove_property("overflow");
            } else {
                let _ = body.style().set_property("overflow", "hidden");
            }
        })?;

        Ok(Some(Self { _click: click }))
    }
}
