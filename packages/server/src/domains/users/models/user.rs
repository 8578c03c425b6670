use anyhow::Result;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::PgPool;

use crate::common::UserId;

/// Verification status enum for type-safe querying
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum VerificationStatus {
    Pending,
    Verified,
}

impl std::fmt::Display for VerificationStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            VerificationStatus::Pending => write!(f, "pending"),
            VerificationStatus::Verified => write!(f, "verified"),
        }
    }
}

impl std::str::FromStr for VerificationStatus {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "pending" => Ok(VerificationStatus::Pending),
            "verified" => Ok(VerificationStatus::Verified),
            _ => Err(anyhow::anyhow!("Invalid verification status: {}", s)),
        }
    }
}

/// User model - SQL persistence layer
///
/// One row per phone number: created as `pending` on first signup, flipped to
/// `verified` exactly once by the signup confirmation, never deleted.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct User {
    pub id: UserId,
    pub phone_number: String,
    pub username: String,
    pub verification_status: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Input for creating a new pending user
#[derive(Debug, Clone)]
pub struct NewUser {
    pub phone_number: String,
    pub username: String,
}

impl User {
    pub fn is_verified(&self) -> bool {
        self.verification_status == VerificationStatus::Verified.to_string()
    }

    /// Find user by phone number
    pub async fn find_by_phone(phone_number: &str, pool: &PgPool) -> Result<Option<Self>> {
        sqlx::query_as::<_, Self>("SELECT * FROM users WHERE phone_number = $1")
            .bind(phone_number)
            .fetch_optional(pool)
            .await
            .map_err(Into::into)
    }

    /// Find user by ID
    pub async fn find_by_id(id: UserId, pool: &PgPool) -> Result<Option<Self>> {
        sqlx::query_as::<_, Self>("SELECT * FROM users WHERE id = $1")
            .bind(id)
            .fetch_optional(pool)
            .await
            .map_err(Into::into)
    }

    /// Insert a pending user, deduplicated on phone number.
    ///
    /// When a row for the phone number already exists (any status), the
    /// existing row is returned untouched. The insert and the existence check
    /// are a single statement, so two concurrent signups for the same phone
    /// number can never create two rows.
    pub async fn upsert_pending(new_user: NewUser, pool: &PgPool) -> Result<Self> {
        let inserted = sqlx::query_as::<_, Self>(
            "INSERT INTO users (id, phone_number, username, verification_status)
             VALUES ($1, $2, $3, 'pending')
             ON CONFLICT (phone_number) DO NOTHING
             RETURNING *",
        )
        .bind(UserId::new())
        .bind(&new_user.phone_number)
        .bind(&new_user.username)
        .fetch_optional(pool)
        .await?;

        match inserted {
            Some(user) => Ok(user),
            // Lost the race (or the row predates this call): fetch the winner
            None => {
                Self::find_by_phone(&new_user.phone_number, pool)
                    .await?
                    .ok_or_else(|| {
                        anyhow::anyhow!("user row vanished during upsert for {}", new_user.phone_number)
                    })
            }
        }
    }

    /// Transition a pending user to verified.
    ///
    /// The update is scoped to `verification_status = 'pending'`, so the
    /// transition fires at most once: a concurrent duplicate confirmation
    /// finds no matching row and gets None.
    pub async fn mark_verified(phone_number: &str, pool: &PgPool) -> Result<Option<Self>> {
        sqlx::query_as::<_, Self>(
            "UPDATE users
             SET verification_status = 'verified', updated_at = NOW()
             WHERE phone_number = $1
               AND verification_status = 'pending'
             RETURNING *",
        )
        .bind(phone_number)
        .fetch_optional(pool)
        .await
        .map_err(Into::into)
    }
}
