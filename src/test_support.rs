// Fakes compartidos por los tests unitarios

use std::cell::RefCell;

use futures::channel::oneshot;
use futures::future::LocalBoxFuture;
use futures::FutureExt;

use crate::models::{AuthError, Session};
use crate::services::{Authenticator, NavigateOptions, Navigator};

pub fn test_session(email: &str) -> Session {
    Session {
        token: "test-token".into(),
        email: email.into(),
        expires_at: None,
    }
}

type Reply = Result<Session, AuthError>;

enum Mode {
    Succeed,
    Fail(AuthError),
    /// Las llamadas quedan pendientes hasta `resolve_next`
    Manual,
}

/// Authenticator que registra cada llamada
pub struct FakeAuthenticator {
    mode: Mode,
    calls: RefCell<Vec<(String, String)>>,
    pending: RefCell<Vec<oneshot::Sender<Reply>>>,
}

impl FakeAuthenticator {
    fn with_mode(mode: Mode) -> Self {
        Self {
            mode,
            calls: RefCell::new(Vec::new()),
            pending: RefCell::new(Vec::new()),
        }
    }

    pub fn succeeding() -> Self {
        Self::with_mode(Mode::Succeed)
    }

    pub fn failing(error: AuthError) -> Self {
        Self::with_mode(Mode::Fail(error))
    }

    pub fn manual() -> Self {
        Self::with_mode(Mode::Manual)
    }

    pub fn calls(&self) -> Vec<(String, String)> {
        self.calls.borrow().clone()
    }

    pub fn call_count(&self) -> usize {
        self.calls.borrow().len()
    }

    /// Resolver la llamada pendiente más antigua
    pub fn resolve_next(&self, reply: Reply) {
        let sender = self.pending.borrow_mut().remove(0);
        let _ = sender.send(reply);
    }
}

impl Authenticator for FakeAuthenticator {
    fn authenticate(&self, email: &str, password: &str) -> LocalBoxFuture<'static, Reply> {
        self.calls
            .borrow_mut()
            .push((email.to_string(), password.to_string()));

        match &self.mode {
            Mode::Succeed => {
                let session = test_session(email);
                async move { Ok(session) }.boxed_local()
            }
            Mode::Fail(error) => {
                let error = error.clone();
                async move { Err(error) }.boxed_local()
            }
            Mode::Manual => {
                let (tx, rx) = oneshot::channel();
                self.pending.borrow_mut().push(tx);
                async move {
                    rx.await
                        .unwrap_or_else(|_| Err(AuthError::Network("abandoned".into())))
                }
                .boxed_local()
            }
        }
    }
}

/// Navigator que registra los destinos en vez de tocar el navegador
#[derive(Default)]
pub struct RecordingNavigator {
    visits: RefCell<Vec<(String, NavigateOptions)>>,
}

impl RecordingNavigator {
    pub fn visits(&self) -> Vec<(String, NavigateOptions)> {
        self.visits.borrow().clone()
    }
}

impl Navigator for RecordingNavigator {
    fn go_to(&self, destination: &str, options: NavigateOptions) {
        self.visits
            .borrow_mut()
            .push((destination.to_string(), options));
    }
}
