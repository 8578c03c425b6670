//! Authorization module.
//!
//! Every authenticated request is authorized in two steps: the JWT middleware
//! verifies the bearer token, then [`resolve_caller`] re-derives the verified
//! user row from the token's phone number. Resource-level ownership is
//! enforced by the stores themselves (owner-scoped query predicates), not by
//! application-level checks.

mod errors;
mod guard;

pub use errors::AuthError;
pub use guard::{fetch_own_profile, resolve_caller};
