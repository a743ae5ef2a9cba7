use std::rc::Rc;

use chrono::{Duration, Utc};
use futures::future::LocalBoxFuture;
use futures::FutureExt;

use crate::models::{AuthError, Session};
use crate::state::AuthState;

/// Cambia credenciales por una sesión. Las implementaciones solo hacen I/O,
/// nunca tocan el estado del formulario.
pub trait Authenticator {
    fn authenticate(
        &self,
        email: &str,
        password: &str,
    ) -> LocalBoxFuture<'static, Result<Session, AuthError>>;
}

impl<A: Authenticator + ?Sized> Authenticator for Rc<A> {
    fn authenticate(
        &self,
        email: &str,
        password: &str,
    ) -> LocalBoxFuture<'static, Result<Session, AuthError>> {
        (**self).authenticate(email, password)
    }
}

/// Envuelve un backend de credenciales y guarda la sesión devuelta en el
/// `AuthState` compartido antes de resolver. Ese sign-in es el cambio de
/// sesión que espera la pantalla de login.
pub struct SessionAuthenticator<A> {
    inner: A,
    auth: AuthState,
}

impl<A: Authenticator> SessionAuthenticator<A> {
    pub fn new(inner: A, auth: AuthState) -> Self {
        Self { inner, auth }
    }
}

impl<A: Authenticator> Authenticator for SessionAuthenticator<A> {
    fn authenticate(
        &self,
        email: &str,
        password: &str,
    ) -> LocalBoxFuture<'static, Result<Session, AuthError>> {
        let pending = self.inner.authenticate(email, password);
        let auth = self.auth.clone();

        async move {
            let session = pending.await?;
            auth.sign_in(session.clone());
            Ok(session)
        }
        .boxed_local()
    }
}

/// Autenticador local para cuando no hay backend configurado.
/// Acepta cualquier credencial que haya pasado la validación del formulario.
#[derive(Clone)]
pub struct DemoAuthenticator {
    session_minutes: i64,
    latency_ms: u32,
}

impl DemoAuthenticator {
    pub fn new(session_minutes: i64, latency_ms: u32) -> Self {
        Self {
            session_minutes,
            latency_ms,
        }
    }
}

impl Authenticator for DemoAuthenticator {
    fn authenticate(
        &self,
        email: &str,
        _password: &str,
    ) -> LocalBoxFuture<'static, Result<Session, AuthError>> {
        let email = email.to_string();
        let minutes = self.session_minutes;
        let latency_ms = self.latency_ms;

        async move {
            #[cfg(target_arch = "wasm32")]
            gloo_timers::future::TimeoutFuture::new(latency_ms).await;
            #[cfg(not(target_arch = "wasm32"))]
            let _ = latency_ms;

            log::info!("🧪 [AUTH] Login de demo aceptado");
            let now = Utc::now();
            Ok(Session {
                token: format!("demo-{}", now.timestamp_millis()),
                email,
                expires_at: Some(now + Duration::minutes(minutes)),
            })
        }
        .boxed_local()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::SessionProvider;
    use crate::test_support::FakeAuthenticator;
    use futures::executor::block_on;

    #[test]
    fn session_authenticator_signs_in_on_success() {
        let auth = AuthState::new();
        let fake = Rc::new(FakeAuthenticator::succeeding());
        let authenticator = SessionAuthenticator::new(fake.clone(), auth.clone());

        let result = block_on(authenticator.authenticate("user@example.com", "password123"));

        assert!(result.is_ok());
        assert!(auth.signal().is_authenticated);
        assert_eq!(
            fake.calls(),
            vec![("user@example.com".to_string(), "password123".to_string())]
        );
    }

    #[test]
    fn session_authenticator_leaves_state_untouched_on_failure() {
        let auth = AuthState::new();
        let fake = FakeAuthenticator::failing(AuthError::Network("offline".into()));
        let authenticator = SessionAuthenticator::new(fake, auth.clone());

        let result = block_on(authenticator.authenticate("user@example.com", "password123"));

        assert_eq!(result, Err(AuthError::Network("offline".into())));
        assert!(!auth.signal().is_authenticated);
    }

    #[test]
    fn demo_authenticator_issues_expiring_session() {
        let demo = DemoAuthenticator::new(30, 0);
        let before = Utc::now();

        let session = block_on(demo.authenticate("demo@example.com", "abcd1234")).unwrap();

        assert_eq!(session.email, "demo@example.com");
        assert!(session.token.starts_with("demo-"));
        let expires_at = session.expires_at.unwrap();
        assert!(expires_at >= before + Duration::minutes(30));
        assert!(!session.is_expired_at(Utc::now()));
    }
}
