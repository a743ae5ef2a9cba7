pub mod auth;
pub mod form;
pub mod session;

pub use auth::{ApiErrorBody, AuthError, LoginRequest, LoginResponse, UserInfo};
pub use form::{FormInput, SessionSignal, SubmissionState, ValidationResult};
pub use session::Session;
