// ============================================================================
// AUTH STATE - Estado de autenticación (dueño de la SessionSignal)
// ============================================================================

use crate::models::{Session, SessionSignal};
use crate::state::reactivity::{ReactiveState, Subscription};

/// Proveedor de sesión tal como lo ve el formulario de login:
/// lectura del estado, acuse del aviso de expiración y notificaciones push.
pub trait SessionProvider {
    fn signal(&self) -> SessionSignal;

    /// Consumir (borrar) el aviso de expiración
    fn acknowledge_expired(&self);

    fn subscribe(&self, callback: Box<dyn Fn()>) -> Subscription;
}

#[derive(Debug, Clone, Default, PartialEq)]
struct AuthData {
    session: Option<Session>,
    expired_message: Option<String>,
}

/// Estado de autenticación compartido por toda la app
#[derive(Clone)]
pub struct AuthState {
    data: ReactiveState<AuthData>,
}

impl AuthState {
    pub fn new() -> Self {
        Self {
            data: ReactiveState::new(AuthData::default()),
        }
    }

    pub fn is_authenticated(&self) -> bool {
        self.data.with(|d| d.session.is_some())
    }

    pub fn session(&self) -> Option<Session> {
        self.data.with(|d| d.session.clone())
    }

    /// Login correcto: guardar sesión. Un aviso de expiración previo ya no aplica.
    pub fn sign_in(&self, session: Session) {
        log::info!("✅ [AUTH] Sesión iniciada");
        self.data.update(|d| {
            d.session = Some(session);
            d.expired_message = None;
        });
    }

    /// La sesión expiró: se descarta y se deja un aviso para el login
    pub fn expire(&self, message: &str) {
        log::warn!("⏰ [AUTH] Sesión expirada");
        self.data.update(|d| {
            d.session = None;
            d.expired_message = Some(message.to_string());
        });
    }

    /// Suscribirse a cualquier cambio de autenticación
    pub fn subscribe<F>(&self, callback: F) -> Subscription
    where
        F: Fn() + 'static,
    {
        self.data.subscribe(callback)
    }

    /// Logout explícito - limpiar todo
    pub fn logout(&self) {
        log::info!("👋 [AUTH] Logout");
        self.data.update(|d| {
            d.session = None;
            d.expired_message = None;
        });
    }
}

impl Default for AuthState {
    fn default() -> Self {
        Self::new()
    }
}

impl SessionProvider for AuthState {
    fn signal(&self) -> SessionSignal {
        self.data.with(|d| SessionSignal {
            is_authenticated: d.session.is_some(),
            expired_message: d.expired_message.clone().unwrap_or_default(),
        })
    }

    fn acknowledge_expired(&self) {
        // Sin aviso pendiente no hay cambio que notificar
        if self.data.with(|d| d.expired_message.is_none()) {
            return;
        }
        self.data.update(|d| d.expired_message = None);
    }

    fn subscribe(&self, callback: Box<dyn Fn()>) -> Subscription {
        self.data.subscribe(callback)
    }
}
