// ============================================================================
// NAVIGATION - Capacidad de navegar a un destino con nombre
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct NavigateOptions {
    /// Reemplazar la entrada actual del historial (el "atrás" no vuelve aquí)
    pub replace_history: bool,
}

impl NavigateOptions {
    pub fn replace() -> Self {
        Self {
            replace_history: true,
        }
    }
}

pub trait Navigator {
    fn go_to(&self, destination: &str, options: NavigateOptions);
}

impl<N: Navigator + ?Sized> Navigator for std::rc::Rc<N> {
    fn go_to(&self, destination: &str, options: NavigateOptions) {
        (**self).go_to(destination, options)
    }
}

/// Pantalla a mostrar para una ruta
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    Login,
    Dashboard,
    /// La ruta pedida no se puede mostrar: ir a otra (replace)
    Redirect(String),
}

/// Guardas de ruta: el dashboard exige sesión y cualquier ruta
/// desconocida cae en el login.
pub fn resolve_route(
    path: &str,
    is_authenticated: bool,
    login_route: &str,
    authenticated_route: &str,
) -> Route {
    if path == authenticated_route {
        if is_authenticated {
            Route::Dashboard
        } else {
            Route::Redirect(login_route.to_string())
        }
    } else if path == login_route {
        Route::Login
    } else {
        Route::Redirect(login_route.to_string())
    }
}

/// Navegador basado en la History API.
/// El aviso de cambio de ruta se difiere al siguiente tick para no
/// re-renderizar dentro del handler que pidió la navegación.
#[cfg(target_arch = "wasm32")]
pub struct BrowserNavigator {
    on_route_change: std::rc::Rc<dyn Fn(String)>,
}

#[cfg(target_arch = "wasm32")]
impl BrowserNavigator {
    pub fn new<F>(on_route_change: F) -> Self
    where
        F: Fn(String) + 'static,
    {
        Self {
            on_route_change: std::rc::Rc::new(on_route_change),
        }
    }

    /// Ruta actual (pathname)
    pub fn current_path() -> String {
        web_sys::window()
            .and_then(|w| w.location().pathname().ok())
            .unwrap_or_else(|| "/".to_string())
    }
}

#[cfg(target_arch = "wasm32")]
impl Navigator for BrowserNavigator {
    fn go_to(&self, destination: &str, options: NavigateOptions) {
        use gloo_timers::callback::Timeout;
        use wasm_bindgen::JsValue;

        let Some(history) = web_sys::window().and_then(|w| w.history().ok()) else {
            log::error!("❌ [ROUTER] History API no disponible");
            return;
        };

        let result = if options.replace_history {
            history.replace_state_with_url(&JsValue::NULL, "", Some(destination))
        } else {
            history.push_state_with_url(&JsValue::NULL, "", Some(destination))
        };

        if let Err(e) = result {
            log::error!("❌ [ROUTER] Error navegando a {}: {:?}", destination, e);
            return;
        }

        log::info!(
            "🧭 [ROUTER] Navegando a {} (replace={})",
            destination,
            options.replace_history
        );

        let callback = self.on_route_change.clone();
        let destination = destination.to_string();
        Timeout::new(0, move || callback(destination)).forget();
    }
}
