use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// URL base del servicio de credenciales. None = modo demo (autenticador local).
    pub backend_url: Option<String>,
    pub environment: String,
    pub enable_logging: bool,
    pub login_route: String,
    pub authenticated_route: String,
    pub demo_session_minutes: i64,
    pub demo_latency_ms: u32,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            backend_url: None,
            environment: "development".to_string(),
            enable_logging: true,
            login_route: "/login".to_string(),
            authenticated_route: "/dashboard".to_string(),
            demo_session_minutes: 60,
            demo_latency_ms: 600,
        }
    }
}

impl AppConfig {
    /// Carga la configuración desde variables de entorno en tiempo de compilación
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            backend_url: option_env!("BACKEND_URL")
                .map(|url| url.trim().trim_end_matches('/').to_string())
                .filter(|url| !url.is_empty()),
            environment: option_env!("ENVIRONMENT")
                .unwrap_or("development").to_string(),
            enable_logging: option_env!("ENABLE_LOGGING")
                .unwrap_or("true").parse().unwrap_or(true),
            login_route: option_env!("LOGIN_ROUTE")
                .map(str::to_string)
                .unwrap_or(defaults.login_route),
            authenticated_route: option_env!("AUTHENTICATED_ROUTE")
                .map(str::to_string)
                .unwrap_or(defaults.authenticated_route),
            demo_session_minutes: option_env!("DEMO_SESSION_MINUTES")
                .unwrap_or("60").parse().unwrap_or(60),
            demo_latency_ms: option_env!("DEMO_LATENCY_MS")
                .unwrap_or("600").parse().unwrap_or(600),
        }
    }

    /// Sin backend configurado se usa el autenticador de demo
    pub fn is_demo(&self) -> bool {
        self.backend_url.is_none()
    }

    pub fn is_logging_enabled(&self) -> bool {
        self.enable_logging
    }
}

// Configuración global estática
lazy_static::lazy_static! {
    pub static ref CONFIG: AppConfig = AppConfig::from_env();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_routes_and_demo_mode() {
        let config = AppConfig::default();
        assert!(config.is_demo());
        assert_eq!(config.login_route, "/login");
        assert_eq!(config.authenticated_route, "/dashboard");
        assert_eq!(config.environment, "development");
    }

    #[test]
    fn backend_url_disables_demo_mode() {
        let config = AppConfig {
            backend_url: Some("https://auth.example.com".into()),
            ..AppConfig::default()
        };
        assert!(!config.is_demo());
    }
}
