// ============================================================================
// LOGIN PWA - FRONTEND MVVM ESTRICTO (RUST PURO)
// ============================================================================
// Arquitectura MVVM estricta:
// - Views: Funciones que pintan DOM (sin lógica)
// - ViewModels: Estado del formulario + lógica UI
// - Services: Autenticación, navegación y persistencia de sesión
// - State: State Management con Rc<RefCell> + notificaciones
// - Models: Estructuras compartidas con backend
// ============================================================================
// Todo lo que no toca el navegador compila también en nativo, y ahí viven
// los tests (`cargo test`).
// ============================================================================

pub mod config;
pub mod models;
pub mod services;
pub mod state;
pub mod utils;
pub mod viewmodels;

#[cfg(target_arch = "wasm32")]
mod app;
#[cfg(target_arch = "wasm32")]
mod dom;
#[cfg(target_arch = "wasm32")]
mod views;

#[cfg(test)]
mod test_support;

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn main() -> Result<(), JsValue> {
    use crate::config::CONFIG;

    // Inicializar panic hook para mejor debugging
    console_error_panic_hook::set_once();

    // Inicializar logging (en producción sin ENABLE_LOGGING solo warnings)
    let level = if CONFIG.is_logging_enabled() {
        log::Level::Info
    } else {
        log::Level::Warn
    };
    wasm_logger::init(wasm_logger::Config::new(level));
    log::info!("🚀 Login PWA - Rust Puro + MVVM ({})", CONFIG.environment);

    let app = app::App::new()?;
    app::start(app);

    Ok(())
}
