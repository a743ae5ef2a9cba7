// ============================================================================
// VIEWS - Solo DOM, sin lógica (la lógica vive en los ViewModels)
// ============================================================================

pub mod dashboard;
pub mod login;

pub use dashboard::DashboardPage;
pub use login::LoginPage;
