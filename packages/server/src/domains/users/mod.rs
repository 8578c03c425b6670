//! Users domain - the identity records behind phone verification
//!
//! A user row is the durable half of the verification state machine: absent
//! means unregistered, `pending` means a signup code is in flight, `verified`
//! is terminal. The auth domain drives the transitions; this domain owns the
//! rows.

pub mod data;
pub mod models;

pub use data::UserData;
pub use models::{NewUser, User, VerificationStatus};
