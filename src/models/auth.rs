use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Body enviado al servicio de credenciales
#[derive(Clone, PartialEq, Serialize, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

// Nunca imprimir la contraseña, ni en logs de debug.
impl std::fmt::Debug for LoginRequest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LoginRequest")
            .field("email", &self.email)
            .field("password", &"***")
            .finish()
    }
}

#[derive(Clone, PartialEq, Serialize, Deserialize, Debug)]
pub struct LoginResponse {
    pub token: String,
    /// Duración de la sesión en segundos, si el backend la envía
    #[serde(default)]
    pub expires_in: Option<i64>,
    #[serde(default)]
    pub user: Option<UserInfo>,
}

#[derive(Clone, PartialEq, Serialize, Deserialize, Debug)]
pub struct UserInfo {
    pub email: String,
}

/// Body de error que devuelve el backend en una respuesta no-2xx
#[derive(Clone, PartialEq, Serialize, Deserialize, Debug, Default)]
pub struct ApiErrorBody {
    #[serde(default)]
    pub message: Option<String>,
}

/// Fallo de un intento de autenticación
#[derive(Debug, Clone, PartialEq, Error)]
pub enum AuthError {
    #[error("credentials rejected (HTTP {status})")]
    Rejected {
        status: u16,
        message: Option<String>,
    },
    #[error("network error: {0}")]
    Network(String),
    #[error("unexpected response: {0}")]
    Parse(String),
}

impl AuthError {
    /// Construir el rechazo desde el body crudo; un body que no es el JSON
    /// esperado simplemente no aporta mensaje.
    pub fn rejected(status: u16, body: &str) -> Self {
        let message = serde_json::from_str::<ApiErrorBody>(body)
            .ok()
            .and_then(|b| b.message);
        AuthError::Rejected { status, message }
    }

    /// Mensaje legible que trae el fallo, si lo hay.
    /// Un mensaje en blanco cuenta como ausente.
    pub fn display_message(&self) -> Option<&str> {
        match self {
            AuthError::Rejected { message, .. } => message
                .as_deref()
                .filter(|m| !m.trim().is_empty()),
            AuthError::Network(_) | AuthError::Parse(_) => None,
        }
    }
}
