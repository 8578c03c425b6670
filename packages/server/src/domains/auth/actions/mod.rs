//! Auth domain actions - business logic functions
//!
//! Actions are async functions called directly from route handlers. They
//! return outcome enums for domain results; `Err` is reserved for
//! infrastructure failure.

mod login;
mod signup;

pub use login::{begin_login, confirm_login, BeginLoginResult, ConfirmLoginResult};
pub use signup::{begin_signup, confirm_signup, BeginSignupResult, ConfirmSignupResult};
