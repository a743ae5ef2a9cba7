// ============================================================================
// FORM - Modelos efímeros del formulario de login
// ============================================================================

/// Valores tecleados por el usuario
#[derive(Clone, PartialEq, Default)]
pub struct FormInput {
    pub email: String,
    pub password: String,
    pub password_visible: bool,
}

impl std::fmt::Debug for FormInput {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FormInput")
            .field("email", &self.email)
            .field("password_len", &self.password.chars().count())
            .field("password_visible", &self.password_visible)
            .finish()
    }
}

/// Resultado de validación por campo. Cadena vacía = sin error.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ValidationResult {
    pub email_error: String,
    pub password_error: String,
}

impl ValidationResult {
    pub fn is_valid(&self) -> bool {
        self.email_error.is_empty() && self.password_error.is_empty()
    }
}

/// Estado de envío del formulario
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum SubmissionState {
    #[default]
    Idle,
    Submitting,
    /// Login correcto: el formulario sigue bloqueado hasta que la
    /// navegación lo desmonte
    Succeeded,
    Failed(String),
}

impl SubmissionState {
    /// Inputs y submit deshabilitados
    pub fn is_locked(&self) -> bool {
        matches!(self, SubmissionState::Submitting | SubmissionState::Succeeded)
    }
}

/// Señal de sesión externa (solo lectura para el formulario)
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SessionSignal {
    pub is_authenticated: bool,
    /// Cadena vacía = no hay aviso pendiente
    pub expired_message: String,
}
