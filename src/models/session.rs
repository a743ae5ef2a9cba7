use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use crate::models::auth::LoginResponse;

// ============================================================================
// SESSION - Sesión autenticada (lo que produce un login correcto)
// ============================================================================

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Session {
    /// Token emitido por el backend
    pub token: String,

    /// Email con el que se inició sesión
    pub email: String,

    /// Momento de expiración (None = sin expiración conocida)
    #[serde(default)]
    pub expires_at: Option<DateTime<Utc>>,
}

impl Session {
    /// Construir sesión a partir de la respuesta del backend.
    /// Un `expires_in` fuera de rango se trata como expiración desconocida.
    pub fn from_response(response: LoginResponse, email: &str, now: DateTime<Utc>) -> Self {
        Self {
            expires_at: response.expires_in.and_then(|secs| {
                let expires_at = Duration::try_seconds(secs)
                    .and_then(|lifetime| now.checked_add_signed(lifetime));
                if expires_at.is_none() {
                    log::warn!("⚠️ [SESSION] expires_in fuera de rango ({}), sin expiración", secs);
                }
                expires_at
            }),
            email: response
                .user
                .map(|u| u.email)
                .unwrap_or_else(|| email.to_string()),
            token: response.token,
        }
    }

    /// ¿Expirada en `now`?
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        self.expires_at.map_or(false, |at| at <= now)
    }

    /// Milisegundos restantes hasta la expiración (0 si ya expiró)
    pub fn remaining_ms(&self, now: DateTime<Utc>) -> Option<u64> {
        self.expires_at
            .map(|at| (at - now).num_milliseconds().max(0) as u64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::auth::UserInfo;
    use chrono::TimeZone;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 1, 10, 12, 0, 0).unwrap()
    }

    #[test]
    fn from_response_computes_expiry_and_prefers_server_email() {
        let response = LoginResponse {
            token: "t0k".into(),
            expires_in: Some(3600),
            user: Some(UserInfo {
                email: "Canonical@Example.com".into(),
            }),
        };
        let session = Session::from_response(response, "typed@example.com", now());

        assert_eq!(session.email, "Canonical@Example.com");
        assert_eq!(session.expires_at, Some(now() + Duration::hours(1)));
        assert_eq!(session.remaining_ms(now()), Some(3_600_000));
    }

    #[test]
    fn out_of_range_lifetime_means_unknown_expiry() {
        for secs in [i64::MAX, i64::MAX / 100, i64::MIN] {
            let response = LoginResponse {
                token: "t".into(),
                expires_in: Some(secs),
                user: None,
            };
            let session = Session::from_response(response, "typed@example.com", now());

            assert_eq!(session.expires_at, None);
            assert_eq!(session.token, "t");
        }
    }

    #[test]
    fn session_without_expiry_never_expires() {
        let response = LoginResponse {
            token: "t".into(),
            expires_in: None,
            user: None,
        };
        let session = Session::from_response(response, "typed@example.com", now());

        assert_eq!(session.email, "typed@example.com");
        assert!(!session.is_expired_at(now() + Duration::days(365)));
        assert_eq!(session.remaining_ms(now()), None);
    }

    #[test]
    fn expiry_is_inclusive_of_the_deadline() {
        let session = Session {
            token: "t".into(),
            email: "e@x.io".into(),
            expires_at: Some(now()),
        };
        assert!(session.is_expired_at(now()));
        assert!(!session.is_expired_at(now() - Duration::seconds(1)));
        assert_eq!(session.remaining_ms(now() + Duration::minutes(5)), Some(0));
    }
}
