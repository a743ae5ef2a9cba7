pub mod validator;
pub mod login_viewmodel;
pub mod session_watcher;
pub mod login_screen;

pub use validator::validate;
pub use login_viewmodel::{LoginView, LoginViewModel, SubmitOutcome};
pub use session_watcher::SessionWatcher;
pub use login_screen::LoginScreen;
