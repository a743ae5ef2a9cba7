// ============================================================================
// DOM ACCESS - window/document y mutaciones que usan las vistas
// ============================================================================

use wasm_bindgen::prelude::*;
use web_sys::{Document, Element, Window};

pub fn window() -> Result<Window, JsValue> {
    web_sys::window().ok_or_else(|| JsValue::from_str("No window"))
}

pub fn document() -> Result<Document, JsValue> {
    window()?
        .document()
        .ok_or_else(|| JsValue::from_str("No document"))
}

/// Contenedor raíz donde se monta una página (`<div id="app">`)
pub fn mount_point(id: &str) -> Result<Element, JsValue> {
    document()?
        .get_element_by_id(id)
        .ok_or_else(|| JsValue::from_str(&format!("No #{} element found", id)))
}

/// Vaciar un contenedor (desmontaje de página)
pub fn clear(container: &Element) {
    container.set_inner_html("");
}

pub fn set_text(element: &Element, text: &str) {
    element.set_text_content(Some(text));
}

/// Atributo booleano (disabled, hidden...): presente o ausente
pub fn set_flag(element: &Element, name: &str, on: bool) -> Result<(), JsValue> {
    if on {
        element.set_attribute(name, "")
    } else {
        element.remove_attribute(name)
    }
}

pub fn toggle_class(element: &Element, class: &str, on: bool) -> Result<(), JsValue> {
    element.class_list().toggle_with_force(class, on).map(|_| ())
}
