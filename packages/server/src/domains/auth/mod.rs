//! Auth domain - phone-based identity verification and sessions
//!
//! Responsibilities:
//! - Signup: OTP dispatch plus the pending -> verified account transition
//! - Login: OTP dispatch and session token issuance for verified accounts
//! - JWT session tokens (fixed 9-hour lifetime, no refresh)

pub mod actions;
pub mod jwt;

pub use jwt::{Claims, JwtService, SESSION_HOURS};
