// ============================================================================
// EVENT HANDLING - Sistema de eventos
// ============================================================================
// Los listeners de una vista se guardan en la propia vista: al desmontarla,
// el drop de cada EventListener quita el listener y libera el closure.
// Los listeners globales (window) se registran UNA VEZ al inicio de la app.
// ============================================================================

use wasm_bindgen::prelude::*;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys::{Event, EventTarget, HtmlInputElement};

/// Listener registrado; se elimina del target al hacer drop
pub struct EventListener {
    target: EventTarget,
    event_type: &'static str,
    closure: Closure<dyn FnMut(Event)>,
}

impl EventListener {
    /// Crear event listener genérico
    pub fn new<F>(target: &EventTarget, event_type: &'static str, handler: F) -> Result<Self, JsValue>
    where
        F: FnMut(Event) + 'static,
    {
        let closure = Closure::wrap(Box::new(handler) as Box<dyn FnMut(Event)>);
        target.add_event_listener_with_callback(event_type, closure.as_ref().unchecked_ref())?;
        Ok(Self {
            target: target.clone(),
            event_type,
            closure,
        })
    }
}

impl Drop for EventListener {
    fn drop(&mut self) {
        let _ = self.target.remove_event_listener_with_callback(
            self.event_type,
            self.closure.as_ref().unchecked_ref(),
        );
    }
}

/// Click handler simple
pub fn on_click<F>(target: &EventTarget, mut handler: F) -> Result<EventListener, JsValue>
where
    F: FnMut() + 'static,
{
    EventListener::new(target, "click", move |_e| handler())
}

/// Input handler: entrega el valor actual del <input>
pub fn on_input<F>(target: &EventTarget, mut handler: F) -> Result<EventListener, JsValue>
where
    F: FnMut(String) + 'static,
{
    EventListener::new(target, "input", move |e: Event| {
        if let Some(input) = e.target().and_then(|t| t.dyn_into::<HtmlInputElement>().ok()) {
            handler(input.value());
        }
    })
}

/// Submit handler: siempre hace prevent_default (sin recarga de página)
pub fn on_submit<F>(target: &EventTarget, mut handler: F) -> Result<EventListener, JsValue>
where
    F: FnMut() + 'static,
{
    EventListener::new(target, "submit", move |e: Event| {
        e.prevent_default();
        handler();
    })
}
