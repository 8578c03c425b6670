// HTTP routes
pub mod auth;
pub mod health;
pub mod media;
pub mod multipart;
pub mod products;
pub mod services;
pub mod users;

use serde::Serialize;

pub use auth::*;
pub use health::*;
pub use media::*;
pub use products::*;
pub use services::*;
pub use users::*;

/// Message-only JSON response body
#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: String,
}
