// ============================================================================
// APP - Router + composición de servicios
// ============================================================================
// - Un único AuthState compartido (sesión)
// - Elige el backend: ApiClient si hay BACKEND_URL, demo si no
// - Monta/desmonta la página según la ruta (guardas en resolve_route)
// ============================================================================

use std::cell::RefCell;
use std::rc::Rc;

use gloo_timers::callback::Timeout;
use wasm_bindgen::prelude::*;
use web_sys::Element;

use crate::config::CONFIG;
use crate::dom::{clear, mount_point, window, EventListener};
use crate::services::{
    resolve_route, ApiClient, Authenticator, BrowserNavigator, DemoAuthenticator,
    NavigateOptions, Navigator, Route, SessionAuthenticator, SessionService,
};
use crate::state::{AuthState, SessionProvider, Subscription};
use crate::views::{DashboardPage, LoginPage};

thread_local! {
    static APP: RefCell<Option<App>> = RefCell::new(None);
}

enum Page {
    Login(LoginPage),
    Dashboard(DashboardPage),
}

impl Page {
    fn route(&self) -> Route {
        match self {
            Page::Login(_) => Route::Login,
            Page::Dashboard(_) => Route::Dashboard,
        }
    }
}

pub struct App {
    root: Element,
    auth: AuthState,
    authenticator: Rc<dyn Authenticator>,
    navigator: Rc<BrowserNavigator>,
    page: Option<Page>,
    _session_service: SessionService,
    _auth_guard: Subscription,
    _popstate: EventListener,
}

impl App {
    pub fn new() -> Result<Self, JsValue> {
        let root = mount_point("app")?;

        let auth = AuthState::new();
        // Restaura la sesión guardada antes de resolver la primera ruta
        let session_service = SessionService::start(&auth);

        let authenticator: Rc<dyn Authenticator> = match CONFIG.backend_url.as_deref() {
            Some(url) => {
                log::info!("🌐 [AUTH] Backend: {}", url);
                Rc::new(SessionAuthenticator::new(ApiClient::new(url), auth.clone()))
            }
            None => {
                log::info!("🧪 [AUTH] Sin BACKEND_URL, usando autenticador demo");
                Rc::new(SessionAuthenticator::new(
                    DemoAuthenticator::new(CONFIG.demo_session_minutes, CONFIG.demo_latency_ms),
                    auth.clone(),
                ))
            }
        };

        let navigator = Rc::new(BrowserNavigator::new(|path| render_route(&path)));

        // Guarda: perder la sesión estando en el dashboard vuelve al login
        let auth_guard = {
            let auth_clone = auth.clone();
            let navigator = navigator.clone();
            auth.subscribe(move || {
                if !auth_clone.is_authenticated()
                    && BrowserNavigator::current_path() == CONFIG.authenticated_route
                {
                    log::info!("🔒 [ROUTER] Sesión perdida, volviendo al login");
                    navigator.go_to(&CONFIG.login_route, NavigateOptions::replace());
                }
            })
        };

        // Atrás/adelante del navegador
        let popstate = EventListener::new(&window()?, "popstate", |_e| {
            render_route(&BrowserNavigator::current_path());
        })?;

        Ok(Self {
            root,
            auth,
            authenticator,
            navigator,
            page: None,
            _session_service: session_service,
            _auth_guard: auth_guard,
            _popstate: popstate,
        })
    }

    /// Mostrar la página que corresponde a `path`
    pub fn show(&mut self, path: &str) -> Result<(), JsValue> {
        let route = resolve_route(
            path,
            self.auth.is_authenticated(),
            &CONFIG.login_route,
            &CONFIG.authenticated_route,
        );

        if let Route::Redirect(target) = &route {
            log::info!("↪️ [ROUTER] {} no disponible, redirigiendo a {}", path, target);
            self.navigator.go_to(target, NavigateOptions::replace());
            return Ok(());
        }

        if self.page.as_ref().map(Page::route) == Some(route.clone()) {
            return Ok(());
        }

        // Desmontar primero: el drop libera listeners y el ViewModel
        self.page = None;
        clear(&self.root);

        self.page = Some(match route {
            Route::Dashboard => Page::Dashboard(DashboardPage::mount(&self.root, &self.auth)?),
            _ => {
                let provider: Rc<dyn SessionProvider> = Rc::new(self.auth.clone());
                let navigator: Rc<dyn Navigator> = self.navigator.clone();
                Page::Login(LoginPage::mount(
                    &self.root,
                    self.authenticator.clone(),
                    provider,
                    navigator,
                )?)
            }
        });

        log::info!("✅ [ROUTER] Página {:?} montada", route);
        Ok(())
    }
}

/// Guardar la App en el thread_local y pintar la ruta actual
pub fn start(app: App) {
    APP.with(|cell| *cell.borrow_mut() = Some(app));
    render_route(&BrowserNavigator::current_path());
}

/// Re-renderizar para `path`. Si la App ya está prestada (render en curso),
/// se reintenta en el siguiente tick.
pub fn render_route(path: &str) {
    let done = APP.with(|cell| {
        let Ok(mut guard) = cell.try_borrow_mut() else {
            return false;
        };
        match guard.as_mut() {
            Some(app) => {
                if let Err(e) = app.show(path) {
                    log::error!("❌ [ROUTER] Error renderizando {}: {:?}", path, e);
                }
            }
            None => log::warn!("⚠️ [ROUTER] App no está inicializada"),
        }
        true
    });

    if !done {
        let path = path.to_string();
        Timeout::new(0, move || render_route(&path)).forget();
    }
}
