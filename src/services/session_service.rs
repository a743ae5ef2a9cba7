// ============================================================================
// SESSION SERVICE - Persistencia y expiración de la sesión
// ============================================================================
// - Restaura la sesión guardada al arrancar (o deja el aviso de expiración)
// - Guarda/borra la sesión en localStorage según cambie AuthState
// - Programa un timer para expirar la sesión en `expires_at`
// ============================================================================

use chrono::{DateTime, Utc};

use crate::models::Session;

/// Qué hacer con la sesión encontrada en storage
#[derive(Debug, Clone, PartialEq)]
pub enum StoredSession {
    None,
    Active(Session),
    Expired,
}

pub fn classify_stored_session(stored: Option<Session>, now: DateTime<Utc>) -> StoredSession {
    match stored {
        None => StoredSession::None,
        Some(session) if session.token.is_empty() => StoredSession::Expired,
        Some(session) if session.is_expired_at(now) => StoredSession::Expired,
        Some(session) => StoredSession::Active(session),
    }
}

/// Máximo que acepta setTimeout (i32::MAX ms, ~24.8 días)
pub const MAX_TIMER_DELAY_MS: u32 = i32::MAX as u32;

/// Decisión del timer de expiración
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExpiryCheck {
    /// Sin fecha de expiración: no hay timer
    Never,
    Expire,
    /// Volver a comprobar dentro de N ms (acotado a `MAX_TIMER_DELAY_MS`)
    Wait(u32),
}

/// Se evalúa al programar y otra vez cuando el timer dispara: un delay
/// acotado puede vencer antes que la sesión.
pub fn check_expiry(session: &Session, now: DateTime<Utc>) -> ExpiryCheck {
    if session.is_expired_at(now) {
        return ExpiryCheck::Expire;
    }
    match session.remaining_ms(now) {
        None => ExpiryCheck::Never,
        Some(ms) => ExpiryCheck::Wait(ms.min(MAX_TIMER_DELAY_MS as u64) as u32),
    }
}

#[cfg(target_arch = "wasm32")]
pub use browser::SessionService;

#[cfg(target_arch = "wasm32")]
mod browser {
    use std::cell::{Cell, RefCell};
    use std::rc::Rc;

    use chrono::Utc;
    use gloo_storage::{LocalStorage, Storage};
    use gloo_timers::callback::Timeout;

    use super::{check_expiry, classify_stored_session, ExpiryCheck, StoredSession};
    use crate::models::Session;
    use crate::state::{AuthState, Subscription};
    use crate::utils::{MSG_SESSION_EXPIRED, STORAGE_KEY_SESSION};

    /// Mantiene localStorage y el timer de expiración en sincronía con AuthState
    pub struct SessionService {
        _subscription: Subscription,
    }

    #[derive(Default)]
    struct Tracker {
        last_token: RefCell<Option<String>>,
        /// Cada sesión nueva invalida los timers anteriores
        generation: Cell<u64>,
    }

    impl SessionService {
        pub fn start(auth: &AuthState) -> Self {
            restore(auth);

            let tracker = Rc::new(Tracker::default());

            // Estado inicial (sesión restaurada)
            sync(auth, &tracker);

            let subscription = {
                let auth_clone = auth.clone();
                auth.subscribe(move || sync(&auth_clone, &tracker))
            };

            Self {
                _subscription: subscription,
            }
        }
    }

    fn restore(auth: &AuthState) {
        let stored = LocalStorage::get::<Session>(STORAGE_KEY_SESSION).ok();
        match classify_stored_session(stored, Utc::now()) {
            StoredSession::None => log::info!("ℹ️ [SESSION] No hay sesión guardada"),
            StoredSession::Active(session) => {
                log::info!("💾 [SESSION] Sesión restaurada desde storage");
                auth.sign_in(session);
            }
            StoredSession::Expired => {
                log::info!("⏰ [SESSION] Sesión guardada expirada, limpiando");
                LocalStorage::delete(STORAGE_KEY_SESSION);
                auth.expire(MSG_SESSION_EXPIRED);
            }
        }
    }

    /// Reaccionar a un cambio de AuthState. Solo actúa si cambió el token.
    fn sync(auth: &AuthState, tracker: &Rc<Tracker>) {
        let session = auth.session();
        let token = session.as_ref().map(|s| s.token.clone());
        if *tracker.last_token.borrow() == token {
            return;
        }
        *tracker.last_token.borrow_mut() = token;

        let generation = tracker.generation.get() + 1;
        tracker.generation.set(generation);

        match session {
            Some(session) => {
                if let Err(e) = LocalStorage::set(STORAGE_KEY_SESSION, &session) {
                    log::error!("❌ [SESSION] Error guardando sesión: {}", e);
                }
                schedule_expiry(auth, tracker, generation, session);
            }
            None => {
                LocalStorage::delete(STORAGE_KEY_SESSION);
                log::info!("🗑️ [SESSION] Sesión eliminada de storage");
            }
        }
    }

    /// Programar el timer de la sesión `generation`. Al disparar se vuelve
    /// a comprobar el deadline real y, si aún no llegó, se re-programa.
    fn schedule_expiry(auth: &AuthState, tracker: &Rc<Tracker>, generation: u64, session: Session) {
        let delay = match check_expiry(&session, Utc::now()) {
            ExpiryCheck::Never => return,
            ExpiryCheck::Expire => 0,
            ExpiryCheck::Wait(delay) => delay,
        };

        let auth = auth.clone();
        let tracker = tracker.clone();
        Timeout::new(delay, move || {
            if tracker.generation.get() != generation {
                return;
            }
            match check_expiry(&session, Utc::now()) {
                ExpiryCheck::Expire => auth.expire(MSG_SESSION_EXPIRED),
                ExpiryCheck::Wait(_) => {
                    log::info!("⏲️ [SESSION] Timer acotado vencido, sesión aún válida");
                    schedule_expiry(&auth, &tracker, generation, session);
                }
                ExpiryCheck::Never => {}
            }
        })
        .forget();
        log::info!("⏲️ [SESSION] Expiración comprobada en {} ms", delay);
    }
}
