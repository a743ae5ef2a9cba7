// ============================================================================
// VALIDATOR - Reglas de formato/fuerza (funciones puras)
// ============================================================================

use regex::Regex;

use crate::models::ValidationResult;
use crate::utils::{
    MSG_INVALID_EMAIL, MSG_PASSWORD_LETTERS_DIGITS, MSG_PASSWORD_TOO_SHORT, PASSWORD_MIN_LEN,
};

lazy_static::lazy_static! {
    // local@domain.tld, sin espacios ni '@' extra
    static ref EMAIL_RE: Regex = Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$")
        .expect("email pattern is valid");
}

/// Validar ambos campos. Cada campo se valida por separado.
pub fn validate(email: &str, password: &str) -> ValidationResult {
    ValidationResult {
        email_error: email_error(email).unwrap_or_default().to_string(),
        password_error: password_error(password).unwrap_or_default().to_string(),
    }
}

pub fn email_error(email: &str) -> Option<&'static str> {
    if EMAIL_RE.is_match(email) {
        None
    } else {
        Some(MSG_INVALID_EMAIL)
    }
}

/// Primera regla incumplida gana
pub fn password_error(password: &str) -> Option<&'static str> {
    if password.chars().count() < PASSWORD_MIN_LEN {
        return Some(MSG_PASSWORD_TOO_SHORT);
    }

    let has_letter = password.chars().any(|c| c.is_ascii_alphabetic());
    let has_digit = password.chars().any(|c| c.is_ascii_digit());
    if !has_letter || !has_digit {
        return Some(MSG_PASSWORD_LETTERS_DIGITS);
    }

    None
}
