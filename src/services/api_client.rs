// ============================================================================
// API CLIENT - SOLO COMUNICACIÓN HTTP (Stateless)
// ============================================================================
// NO tiene lógica de negocio, solo hace requests HTTP
// ============================================================================

use chrono::Utc;
use futures::future::LocalBoxFuture;
use futures::FutureExt;
use gloo_net::http::Request;

use crate::models::{AuthError, LoginRequest, LoginResponse, Session};
use crate::services::Authenticator;

/// Cliente del servicio de credenciales
#[derive(Clone)]
pub struct ApiClient {
    base_url: String,
}

impl ApiClient {
    pub fn new(base_url: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    /// POST /auth/login
    pub async fn login(&self, request: &LoginRequest) -> Result<LoginResponse, AuthError> {
        let url = format!("{}/auth/login", self.base_url);
        log::debug!("🔐 [API] Login para {}", request.email);

        let response = Request::post(&url)
            .json(request)
            .map_err(|e| AuthError::Network(format!("Serialization error: {}", e)))?
            .send()
            .await
            .map_err(|e| AuthError::Network(e.to_string()))?;

        if !response.ok() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            log::warn!("⚠️ [API] Login rechazado: HTTP {}", status);
            return Err(AuthError::rejected(status, &body));
        }

        response
            .json::<LoginResponse>()
            .await
            .map_err(|e| AuthError::Parse(e.to_string()))
    }
}

impl Authenticator for ApiClient {
    fn authenticate(
        &self,
        email: &str,
        password: &str,
    ) -> LocalBoxFuture<'static, Result<Session, AuthError>> {
        let client = self.clone();
        let request = LoginRequest {
            email: email.to_string(),
            password: password.to_string(),
        };

        async move {
            let response = client.login(&request).await?;
            Ok(Session::from_response(response, &request.email, Utc::now()))
        }
        .boxed_local()
    }
}
