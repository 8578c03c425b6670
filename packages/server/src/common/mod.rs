// Common types and utilities shared across the application

pub mod auth;
pub mod entity_ids;
pub mod id;
pub mod phone;

pub use auth::AuthError;
pub use entity_ids::*;
pub use id::{Id, V4, V7};
pub use phone::is_valid_phone_number;
