// ============================================================================
// ELEMENT BUILDER - Construcción encadenada de elementos
// ============================================================================
// El primer error de web-sys se guarda y se devuelve en `build()`, así la
// cadena no necesita un `?` en cada paso.
// ============================================================================

use wasm_bindgen::prelude::*;
use web_sys::Element;

use crate::dom::document;

pub struct ElementBuilder {
    element: Result<Element, JsValue>,
}

impl ElementBuilder {
    pub fn new(tag: &str) -> Self {
        Self {
            element: document().and_then(|doc| doc.create_element(tag)),
        }
    }

    fn apply(mut self, step: impl FnOnce(&Element) -> Result<(), JsValue>) -> Self {
        if let Ok(element) = &self.element {
            if let Err(e) = step(element) {
                self.element = Err(e);
            }
        }
        self
    }

    /// Reemplaza todas las clases
    pub fn class(self, class: &str) -> Self {
        self.apply(|el| {
            el.set_class_name(class);
            Ok(())
        })
    }

    pub fn id(self, id: &str) -> Self {
        self.attr("id", id)
    }

    pub fn text(self, text: &str) -> Self {
        self.apply(|el| {
            el.set_text_content(Some(text));
            Ok(())
        })
    }

    pub fn attr(self, name: &str, value: &str) -> Self {
        self.apply(|el| el.set_attribute(name, value))
    }

    /// Atributo booleano presente (`hidden`, `novalidate`...)
    pub fn flag(self, name: &str) -> Self {
        self.attr(name, "")
    }

    pub fn child(self, child: &Element) -> Self {
        self.apply(|el| el.append_child(child).map(|_| ()))
    }

    /// Hijo construido con otro builder; su error se propaga a este
    pub fn nested(self, child: ElementBuilder) -> Self {
        match child.build() {
            Ok(child) => self.child(&child),
            Err(e) => Self { element: Err(e) },
        }
    }

    pub fn build(self) -> Result<Element, JsValue> {
        self.element
    }
}
