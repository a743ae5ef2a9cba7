// ============================================================================
// LOGIN VIEWMODEL - Máquina de estados del envío del formulario
// ============================================================================
// Idle -> (validación síncrona) -> Submitting -> Succeeded | Failed(msg)
// - Validación inválida: errores por campo, sin llamada de red
// - Submitting/Succeeded: todos los controles deshabilitados, submit ignorado
// - Éxito: NO navega (lo hace el SessionWatcher cuando la sesión cambia);
//   el formulario queda bloqueado hasta el unmount
// - Resolución tardía tras unmount: se descarta
// ============================================================================

use std::cell::RefCell;
use std::rc::Rc;

use futures::future::LocalBoxFuture;
use futures::FutureExt;

use crate::models::{FormInput, SubmissionState, ValidationResult};
use crate::services::Authenticator;
use crate::state::{Notifier, Subscription};
use crate::utils::{
    LABEL_HIDE_PASSWORD, LABEL_LOGGING_IN, LABEL_LOG_IN, LABEL_SHOW_PASSWORD, MSG_LOGIN_FAILED,
};
use crate::viewmodels::validator;

#[derive(Default)]
struct LoginForm {
    input: FormInput,
    validation: ValidationResult,
    state: SubmissionState,
    /// Aviso externo (sesión expirada) mostrado en el banner
    notice: Option<String>,
    disposed: bool,
}

impl LoginForm {
    fn banner(&self) -> Option<String> {
        match &self.state {
            SubmissionState::Failed(message) => Some(message.clone()),
            _ => self.notice.clone(),
        }
    }
}

/// Resultado inmediato de pulsar "log in"
pub enum SubmitOutcome {
    /// Validación fallida: errores por campo, sin trabajo asíncrono
    Invalid,
    /// Ya hay un envío en curso (o el formulario fue desmontado)
    Ignored,
    /// Llamada al Authenticator en curso; el caller debe ejecutar el future
    Pending(LocalBoxFuture<'static, ()>),
}

impl std::fmt::Debug for SubmitOutcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SubmitOutcome::Invalid => f.write_str("Invalid"),
            SubmitOutcome::Ignored => f.write_str("Ignored"),
            SubmitOutcome::Pending(_) => f.write_str("Pending(..)"),
        }
    }
}

/// Snapshot de lo que la vista debe pintar
#[derive(Debug, Clone, PartialEq)]
pub struct LoginView {
    pub email: String,
    pub password: String,
    pub password_input_type: &'static str,
    pub toggle_label: &'static str,
    pub password_visible: bool,
    /// Un solo flag para inputs y botón
    pub disabled: bool,
    pub busy: bool,
    pub submit_label: &'static str,
    pub banner: Option<String>,
    pub email_error: Option<String>,
    pub password_error: Option<String>,
}

/// ViewModel del formulario de login
#[derive(Clone)]
pub struct LoginViewModel {
    form: Rc<RefCell<LoginForm>>,
    authenticator: Rc<dyn Authenticator>,
    notifier: Notifier,
}

impl LoginViewModel {
    pub fn new(authenticator: Rc<dyn Authenticator>) -> Self {
        Self {
            form: Rc::new(RefCell::new(LoginForm::default())),
            authenticator,
            notifier: Notifier::new(),
        }
    }

    /// Suscribirse a cambios (para re-pintar)
    pub fn subscribe<F>(&self, callback: F) -> Subscription
    where
        F: Fn() + 'static,
    {
        self.notifier.subscribe(callback)
    }

    pub fn set_email(&self, email: String) {
        self.edit(|input| input.email = email);
    }

    pub fn set_password(&self, password: String) {
        self.edit(|input| input.password = password);
    }

    /// Edición directa del usuario. Ignorada mientras los inputs están deshabilitados.
    fn edit(&self, apply: impl FnOnce(&mut FormInput)) {
        {
            let mut form = self.form.borrow_mut();
            if form.disposed || form.state.is_locked() {
                log::debug!("✋ [LOGIN] Edición ignorada (formulario bloqueado)");
                return;
            }
            apply(&mut form.input);
        }
        self.notifier.notify();
    }

    /// Mostrar/ocultar contraseña. Independiente del estado de envío.
    pub fn toggle_password_visibility(&self) {
        {
            let mut form = self.form.borrow_mut();
            if form.disposed {
                return;
            }
            form.input.password_visible = !form.input.password_visible;
        }
        self.notifier.notify();
    }

    /// Pulsar "log in"
    pub fn submit(&self) -> SubmitOutcome {
        let (email, password) = {
            let mut form = self.form.borrow_mut();
            if form.disposed {
                return SubmitOutcome::Ignored;
            }
            if form.state.is_locked() {
                log::warn!("⚠️ [LOGIN] Submit ignorado: login en curso o ya completado");
                return SubmitOutcome::Ignored;
            }

            // Nuevo intento: limpiar banner anterior
            form.notice = None;
            form.state = SubmissionState::Idle;

            log::debug!("🔎 [LOGIN] Validando formulario");
            form.validation = validator::validate(&form.input.email, &form.input.password);
            if !form.validation.is_valid() {
                log::info!("❌ [LOGIN] Validación fallida, no se llama al backend");
                drop(form);
                self.notifier.notify();
                return SubmitOutcome::Invalid;
            }

            form.state = SubmissionState::Submitting;
            (form.input.email.clone(), form.input.password.clone())
        };
        self.notifier.notify();

        log::info!("🔐 [LOGIN] Iniciando login...");
        let pending = self.authenticator.authenticate(&email, &password);
        let form = Rc::downgrade(&self.form);
        let notifier = self.notifier.clone();

        SubmitOutcome::Pending(
            async move {
                let result = pending.await;

                let Some(form) = form.upgrade() else {
                    log::warn!("🗑️ [LOGIN] Resultado de login descartado (vista destruida)");
                    return;
                };
                {
                    let mut form = form.borrow_mut();
                    if form.disposed {
                        log::warn!("🗑️ [LOGIN] Resultado de login descartado (vista desmontada)");
                        return;
                    }
                    form.state = match result {
                        Ok(_) => {
                            log::info!("✅ [LOGIN] Login exitoso, esperando cambio de sesión");
                            SubmissionState::Succeeded
                        }
                        Err(e) => {
                            log::error!("❌ [LOGIN] Error en login: {}", e);
                            form.notice = None;
                            SubmissionState::Failed(
                                e.display_message().unwrap_or(MSG_LOGIN_FAILED).to_string(),
                            )
                        }
                    };
                }
                notifier.notify();
            }
            .boxed_local(),
        )
    }

    /// Aviso externo (p.ej. sesión expirada) mostrado en el banner
    pub fn show_notice(&self, message: String) {
        {
            let mut form = self.form.borrow_mut();
            if form.disposed {
                return;
            }
            // La sesión ya no es válida: un éxito previo tampoco lo es
            if matches!(form.state, SubmissionState::Failed(_) | SubmissionState::Succeeded) {
                form.state = SubmissionState::Idle;
            }
            form.notice = Some(message);
        }
        self.notifier.notify();
    }

    /// Cerrar el banner
    pub fn dismiss_banner(&self) {
        {
            let mut form = self.form.borrow_mut();
            if matches!(form.state, SubmissionState::Failed(_)) {
                form.state = SubmissionState::Idle;
            }
            form.notice = None;
        }
        self.notifier.notify();
    }

    /// Unmount: el estado vuelve a los valores por defecto y las
    /// resoluciones pendientes quedan descartadas.
    pub fn dispose(&self) {
        let mut form = self.form.borrow_mut();
        *form = LoginForm {
            disposed: true,
            ..LoginForm::default()
        };
    }

    pub fn is_disposed(&self) -> bool {
        self.form.borrow().disposed
    }

    pub fn submission_state(&self) -> SubmissionState {
        self.form.borrow().state.clone()
    }

    pub fn validation(&self) -> ValidationResult {
        self.form.borrow().validation.clone()
    }

    pub fn input(&self) -> FormInput {
        self.form.borrow().input.clone()
    }

    pub fn banner(&self) -> Option<String> {
        self.form.borrow().banner()
    }

    /// Snapshot para la vista
    pub fn view(&self) -> LoginView {
        let form = self.form.borrow();
        let busy = form.state.is_locked();
        let visible = form.input.password_visible;
        let non_empty = |s: &String| (!s.is_empty()).then(|| s.clone());

        LoginView {
            email: form.input.email.clone(),
            password: form.input.password.clone(),
            password_input_type: if visible { "text" } else { "password" },
            toggle_label: if visible { LABEL_HIDE_PASSWORD } else { LABEL_SHOW_PASSWORD },
            password_visible: visible,
            disabled: busy,
            busy,
            submit_label: if busy { LABEL_LOGGING_IN } else { LABEL_LOG_IN },
            banner: form.banner(),
            email_error: non_empty(&form.validation.email_error),
            password_error: non_empty(&form.validation.password_error),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::AuthError;
    use crate::test_support::{test_session, FakeAuthenticator};
    use crate::utils::{MSG_INVALID_EMAIL, MSG_PASSWORD_LETTERS_DIGITS, MSG_PASSWORD_TOO_SHORT};
    use futures::executor::LocalPool;
    use futures::task::LocalSpawnExt;
    use std::cell::Cell;

    fn view_model(fake: &Rc<FakeAuthenticator>) -> LoginViewModel {
        LoginViewModel::new(fake.clone())
    }

    fn fill(vm: &LoginViewModel, email: &str, password: &str) {
        vm.set_email(email.to_string());
        vm.set_password(password.to_string());
    }

    fn spawn(pool: &LocalPool, outcome: SubmitOutcome) {
        match outcome {
            SubmitOutcome::Pending(fut) => pool.spawner().spawn_local(fut).unwrap(),
            other => panic!("expected a pending submission, got {:?}", other),
        }
    }

    #[test]
    fn invalid_email_never_reaches_authenticator() {
        let fake = Rc::new(FakeAuthenticator::succeeding());
        let vm = view_model(&fake);
        fill(&vm, "invalid-email", "password123");

        let outcome = vm.submit();

        assert!(matches!(outcome, SubmitOutcome::Invalid));
        assert_eq!(fake.call_count(), 0);
        let view = vm.view();
        assert_eq!(view.email_error.as_deref(), Some(MSG_INVALID_EMAIL));
        assert_eq!(view.password_error, None);
        assert_eq!(view.banner, None);
        assert!(!view.disabled);
    }

    #[test]
    fn weak_passwords_report_the_first_failing_rule() {
        let fake = Rc::new(FakeAuthenticator::succeeding());
        let vm = view_model(&fake);

        fill(&vm, "valid@example.com", "web123");
        assert!(matches!(vm.submit(), SubmitOutcome::Invalid));
        assert_eq!(vm.view().password_error.as_deref(), Some(MSG_PASSWORD_TOO_SHORT));

        vm.set_password("12345678".to_string());
        assert!(matches!(vm.submit(), SubmitOutcome::Invalid));
        assert_eq!(
            vm.view().password_error.as_deref(),
            Some(MSG_PASSWORD_LETTERS_DIGITS)
        );
        assert_eq!(fake.call_count(), 0);
    }

    #[test]
    fn valid_submit_calls_authenticator_once_with_untouched_values() {
        let fake = Rc::new(FakeAuthenticator::manual());
        let vm = view_model(&fake);
        let mut pool = LocalPool::new();
        fill(&vm, " test@example.com", "password123 ");

        // El espacio inicial invalida el email: se envía tal cual o no se envía
        assert!(matches!(vm.submit(), SubmitOutcome::Invalid));
        assert_eq!(fake.call_count(), 0);

        fill(&vm, "test@example.com", "password123 ");
        spawn(&pool, vm.submit());
        pool.run_until_stalled();

        assert_eq!(
            fake.calls(),
            vec![("test@example.com".to_string(), "password123 ".to_string())]
        );
    }

    #[test]
    fn submitting_disables_everything_and_ignores_resubmits() {
        let fake = Rc::new(FakeAuthenticator::manual());
        let vm = view_model(&fake);
        let mut pool = LocalPool::new();
        fill(&vm, "test@example.com", "password123");

        spawn(&pool, vm.submit());
        pool.run_until_stalled();

        let view = vm.view();
        assert!(view.disabled);
        assert!(view.busy);
        assert_eq!(view.submit_label, LABEL_LOGGING_IN);
        assert_eq!(vm.submission_state(), SubmissionState::Submitting);

        assert!(matches!(vm.submit(), SubmitOutcome::Ignored));
        vm.set_email("other@example.com".to_string());
        assert_eq!(vm.input().email, "test@example.com");
        assert_eq!(fake.call_count(), 1);
    }

    #[test]
    fn failure_shows_server_message_and_reenables_inputs() {
        let fake = Rc::new(FakeAuthenticator::manual());
        let vm = view_model(&fake);
        let mut pool = LocalPool::new();
        fill(&vm, "wrong@example.com", "wrongpass123");

        spawn(&pool, vm.submit());
        pool.run_until_stalled();
        fake.resolve_next(Err(AuthError::Rejected {
            status: 401,
            message: Some("invalid credentials".into()),
        }));
        pool.run_until_stalled();

        let view = vm.view();
        assert_eq!(view.banner.as_deref(), Some("invalid credentials"));
        assert!(!view.disabled);
        assert_eq!(view.submit_label, LABEL_LOG_IN);
        assert_eq!(view.email, "wrong@example.com");
        assert_eq!(view.password, "wrongpass123");
        assert_eq!(
            vm.submission_state(),
            SubmissionState::Failed("invalid credentials".into())
        );
    }

    #[test]
    fn failure_without_message_uses_fallback() {
        let fake = Rc::new(FakeAuthenticator::failing(AuthError::Network(
            "connection refused".into(),
        )));
        let vm = view_model(&fake);
        let mut pool = LocalPool::new();
        fill(&vm, "test@example.com", "password123");

        spawn(&pool, vm.submit());
        pool.run_until_stalled();

        assert_eq!(vm.banner().as_deref(), Some(MSG_LOGIN_FAILED));
    }

    #[test]
    fn success_keeps_form_locked_until_navigation() {
        let fake = Rc::new(FakeAuthenticator::manual());
        let vm = view_model(&fake);
        let mut pool = LocalPool::new();
        fill(&vm, "test@example.com", "password123");

        spawn(&pool, vm.submit());
        pool.run_until_stalled();
        fake.resolve_next(Ok(test_session("test@example.com")));
        pool.run_until_stalled();

        assert_eq!(vm.submission_state(), SubmissionState::Succeeded);
        assert_eq!(vm.banner(), None);
        let view = vm.view();
        assert!(view.disabled);
        assert!(view.busy);
        assert_eq!(view.submit_label, LABEL_LOGGING_IN);

        // Entre el éxito y el cambio de ruta no hay segundo login ni ediciones
        assert!(matches!(vm.submit(), SubmitOutcome::Ignored));
        vm.set_password("changed123".to_string());
        assert_eq!(vm.input().password, "password123");
        assert_eq!(fake.call_count(), 1);
    }

    #[test]
    fn expiry_notice_after_success_unlocks_the_form() {
        let fake = Rc::new(FakeAuthenticator::succeeding());
        let vm = view_model(&fake);
        let mut pool = LocalPool::new();
        fill(&vm, "test@example.com", "password123");
        spawn(&pool, vm.submit());
        pool.run_until_stalled();
        assert_eq!(vm.submission_state(), SubmissionState::Succeeded);

        vm.show_notice("session expired".into());

        assert_eq!(vm.submission_state(), SubmissionState::Idle);
        assert!(!vm.view().disabled);
        assert_eq!(vm.banner().as_deref(), Some("session expired"));
    }

    #[test]
    fn next_submit_clears_previous_failure() {
        let fake = Rc::new(FakeAuthenticator::manual());
        let vm = view_model(&fake);
        let mut pool = LocalPool::new();
        fill(&vm, "test@example.com", "password123");

        spawn(&pool, vm.submit());
        pool.run_until_stalled();
        fake.resolve_next(Err(AuthError::rejected(401, r#"{"message":"nope"}"#)));
        pool.run_until_stalled();
        assert_eq!(vm.banner().as_deref(), Some("nope"));

        // Segundo intento con email inválido: banner limpio, solo error de campo
        vm.set_email("broken".to_string());
        assert!(matches!(vm.submit(), SubmitOutcome::Invalid));
        assert_eq!(vm.banner(), None);
        assert_eq!(vm.submission_state(), SubmissionState::Idle);
    }

    #[test]
    fn field_errors_stay_until_next_submit() {
        let fake = Rc::new(FakeAuthenticator::succeeding());
        let vm = view_model(&fake);
        fill(&vm, "nope", "password123");
        vm.submit();

        vm.set_email("fixed@example.com".to_string());
        assert_eq!(vm.view().email_error.as_deref(), Some(MSG_INVALID_EMAIL));
    }

    #[test]
    fn toggling_visibility_twice_restores_masked_input() {
        let fake = Rc::new(FakeAuthenticator::manual());
        let vm = view_model(&fake);
        let mut pool = LocalPool::new();
        assert_eq!(vm.view().password_input_type, "password");

        vm.toggle_password_visibility();
        assert_eq!(vm.view().password_input_type, "text");
        assert_eq!(vm.view().toggle_label, LABEL_HIDE_PASSWORD);

        // También durante un envío
        fill(&vm, "test@example.com", "password123");
        spawn(&pool, vm.submit());
        pool.run_until_stalled();
        vm.toggle_password_visibility();

        let view = vm.view();
        assert_eq!(view.password_input_type, "password");
        assert_eq!(view.toggle_label, LABEL_SHOW_PASSWORD);
    }

    #[test]
    fn late_resolution_after_dispose_is_discarded() {
        let fake = Rc::new(FakeAuthenticator::manual());
        let vm = view_model(&fake);
        let mut pool = LocalPool::new();
        fill(&vm, "test@example.com", "password123");
        let notified = Rc::new(Cell::new(0));
        let n = notified.clone();
        let _sub = vm.subscribe(move || n.set(n.get() + 1));

        spawn(&pool, vm.submit());
        pool.run_until_stalled();
        let before = notified.get();

        vm.dispose();
        fake.resolve_next(Err(AuthError::rejected(401, r#"{"message":"late"}"#)));
        pool.run_until_stalled();

        assert_eq!(notified.get(), before);
        assert_eq!(vm.banner(), None);
        assert_eq!(vm.input(), FormInput::default());
        assert!(matches!(vm.submit(), SubmitOutcome::Ignored));
    }

    #[test]
    fn late_resolution_after_drop_is_discarded() {
        let fake = Rc::new(FakeAuthenticator::manual());
        let mut pool = LocalPool::new();
        {
            let vm = view_model(&fake);
            fill(&vm, "test@example.com", "password123");
            spawn(&pool, vm.submit());
            pool.run_until_stalled();
        }
        fake.resolve_next(Ok(test_session("test@example.com")));
        pool.run_until_stalled();
        assert_eq!(fake.call_count(), 1);
    }

    #[test]
    fn notice_and_dismiss() {
        let fake = Rc::new(FakeAuthenticator::failing(AuthError::rejected(
            401,
            r#"{"message":"bad"}"#,
        )));
        let vm = view_model(&fake);
        let mut pool = LocalPool::new();
        fill(&vm, "test@example.com", "password123");
        spawn(&pool, vm.submit());
        pool.run_until_stalled();
        assert_eq!(vm.banner().as_deref(), Some("bad"));

        vm.show_notice("session expired".into());
        assert_eq!(vm.banner().as_deref(), Some("session expired"));
        assert_eq!(vm.submission_state(), SubmissionState::Idle);

        vm.dismiss_banner();
        assert_eq!(vm.banner(), None);
    }
}
