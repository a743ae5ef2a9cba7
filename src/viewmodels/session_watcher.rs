// ============================================================================
// SESSION WATCHER - Observa la sesión externa desde la pantalla de login
// ============================================================================
// - Sesión autenticada -> navegar al área autenticada (replace en historial)
// - Aviso de expiración -> banner del formulario + acuse (una sola vez)
// Ambas reacciones son idempotentes ante notificaciones repetidas.
// ============================================================================

use std::cell::Cell;
use std::rc::Rc;

use crate::services::{NavigateOptions, Navigator};
use crate::state::{SessionProvider, Subscription};
use crate::viewmodels::LoginViewModel;

struct Observer {
    provider: Rc<dyn SessionProvider>,
    navigator: Rc<dyn Navigator>,
    destination: String,
    view_model: LoginViewModel,
    /// Último valor visto de is_authenticated
    authenticated: Cell<bool>,
}

impl Observer {
    fn evaluate(&self) {
        let signal = self.provider.signal();

        if signal.is_authenticated != self.authenticated.get() {
            self.authenticated.set(signal.is_authenticated);
            if signal.is_authenticated {
                log::info!("🔓 [LOGIN] Sesión activa, redirigiendo a {}", self.destination);
                self.navigator
                    .go_to(&self.destination, NavigateOptions::replace());
            }
        }

        if !signal.expired_message.is_empty() {
            log::info!("📢 [LOGIN] Mostrando aviso de sesión");
            self.view_model.show_notice(signal.expired_message);
            self.provider.acknowledge_expired();
        }
    }
}

/// Vive mientras la pantalla de login esté montada
pub struct SessionWatcher {
    _subscription: Subscription,
}

impl SessionWatcher {
    /// Evalúa el estado actual (mount) y se suscribe a los cambios
    pub fn start(
        provider: Rc<dyn SessionProvider>,
        navigator: Rc<dyn Navigator>,
        destination: &str,
        view_model: LoginViewModel,
    ) -> Self {
        let observer = Rc::new(Observer {
            provider: provider.clone(),
            navigator,
            destination: destination.to_string(),
            view_model,
            authenticated: Cell::new(false),
        });

        observer.evaluate();

        let subscription = {
            let observer = observer.clone();
            provider.subscribe(Box::new(move || observer.evaluate()))
        };

        Self {
            _subscription: subscription,
        }
    }
}
