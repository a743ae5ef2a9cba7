// ============================================================================
// LOGIN SCREEN - Ciclo de vida (mount/unmount) del formulario de login
// ============================================================================

use std::rc::Rc;

use crate::services::{Authenticator, Navigator};
use crate::state::SessionProvider;
use crate::viewmodels::{LoginViewModel, SessionWatcher};

/// Formulario + watcher de sesión. Nada sobrevive entre montajes.
pub struct LoginScreen {
    view_model: LoginViewModel,
    watcher: Option<SessionWatcher>,
}

impl LoginScreen {
    pub fn mount(
        authenticator: Rc<dyn Authenticator>,
        provider: Rc<dyn SessionProvider>,
        navigator: Rc<dyn Navigator>,
        destination: &str,
    ) -> Self {
        log::info!("🎬 [LOGIN] Montando pantalla de login");
        let view_model = LoginViewModel::new(authenticator);
        let watcher = SessionWatcher::start(provider, navigator, destination, view_model.clone());

        Self {
            view_model,
            watcher: Some(watcher),
        }
    }

    pub fn view_model(&self) -> &LoginViewModel {
        &self.view_model
    }
}

impl Drop for LoginScreen {
    fn drop(&mut self) {
        log::info!("🧹 [LOGIN] Desmontando pantalla de login");
        self.watcher.take();
        self.view_model.dispose();
    }
}
