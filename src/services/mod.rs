pub mod auth_service;
pub mod navigation;
pub mod session_service;
#[cfg(target_arch = "wasm32")]
pub mod api_client;

pub use auth_service::*;
pub use navigation::*;
pub use session_service::*;
#[cfg(target_arch = "wasm32")]
pub use api_client::ApiClient;
