use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::common::UserId;
use crate::domains::users::models::user::User as UserModel;

/// Public API representation of a user (for JSON responses)
///
/// The phone number is included because a user can only ever fetch their own
/// profile; nothing here is visible to other callers.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserData {
    /// Unique identifier
    pub id: UserId,

    /// Phone number in E.164 form (the identity key)
    pub phone_number: String,

    /// Display name chosen at signup
    pub username: String,

    /// "pending" until the signup code is confirmed, then "verified"
    pub verification_status: String,

    /// When the user first signed up
    pub created_at: DateTime<Utc>,
}

impl From<UserModel> for UserData {
    fn from(user: UserModel) -> Self {
        Self {
            id: user.id,
            phone_number: user.phone_number,
            username: user.username,
            verification_status: user.verification_status,
            created_at: user.created_at,
        }
    }
}
