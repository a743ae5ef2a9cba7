// ============================================================================
// CONSTANTES - Textos visibles y claves de storage
// ============================================================================

pub const MSG_INVALID_EMAIL: &str = "invalid email format.";
pub const MSG_PASSWORD_TOO_SHORT: &str = "password must be at least 8 characters.";
pub const MSG_PASSWORD_LETTERS_DIGITS: &str = "password must contain both letters and digits.";
pub const MSG_LOGIN_FAILED: &str = "login failed, please try again later";
pub const MSG_SESSION_EXPIRED: &str = "your session has expired, please log in again.";
pub const MSG_DEMO_HINT: &str =
    "demo mode: any email / a password of 8+ characters with letters and digits";

pub const LABEL_EMAIL: &str = "email";
pub const LABEL_PASSWORD: &str = "password";
pub const LABEL_LOG_IN: &str = "log in";
pub const LABEL_LOGGING_IN: &str = "logging in...";
pub const LABEL_SHOW_PASSWORD: &str = "show password";
pub const LABEL_HIDE_PASSWORD: &str = "hide password";
pub const LABEL_DISMISS: &str = "dismiss";
pub const LABEL_LOG_OUT: &str = "log out";

pub const PLACEHOLDER_EMAIL: &str = "you@example.com";
pub const PLACEHOLDER_PASSWORD: &str = "at least 8 characters, letters and digits";

/// Longitud mínima de la contraseña, contada en caracteres
pub const PASSWORD_MIN_LEN: usize = 8;

/// Clave de localStorage para la sesión persistida
pub const STORAGE_KEY_SESSION: &str = "loginPwa_session";
