//! Contact form accents: the label above a focused field turns gold, and a
//! field the visitor has typed into keeps a gold border. Purely cosmetic;
//! validation and submission stay with the form's own backend wiring.

use log::debug;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{HtmlElement, HtmlInputElement};

use crate::config::Selectors;
use crate::dom::{self, EventHandle};

const ACCENT: &str = "var(--gold-primary)";

pub struct FormAccents {
    _listeners: Vec<EventHandle>,
}

impl FormAccents {
    pub fn install(selectors: &Selectors) -> Result<Self, JsValue> {
        let mut listeners = Vec::new();

        for field in dom::query_all(&selectors.text_fields) {
            let Some(input) = dom::as_html(&field) else { continue };

            let label = field
                .previous_element_sibling()
                .filter(|el| el.class_list().contains(&selectors.field_label_class))
                .and_then(|el| dom::as_html(&el));

            if let Some(label) = label {
                let focus_label = label.clone();
                listeners.push(EventHandle::listen(input.as_ref(), "focus", move |_| {
                    let _ = focus_label.style().set_property("color", ACCENT);
                })?);

                let blur_input = input.clone();
                listeners.push(EventHandle::listen(input.as_ref(), "blur", move |_| {
                    if field_value(&blur_input).is_empty() {
                        let _ = label.style().remove_property("color");
                    }
                })?);
            }

            let border_input = input.clone();
            listeners.push(EventHandle::listen(input.as_ref(), "input", move |_| {
                let _ = border_input.style().set_property("border-color", ACCENT);
            })?);
        }

        debug!("form accents: {} listeners", listeners.len());
        Ok(Self { _listeners: listeners })
    }
}

fn field_value(input: &HtmlElement) -> String {
    input
        .dyn_ref::<HtmlInputElement>()
        .map(|i| i.value())
        .unwrap_or_default()
}
