// Trait definitions for dependency injection
//
// These are INFRASTRUCTURE traits only - no business logic.
// Business logic (like "confirm a signup") should be domain functions that use these traits.
//
// Naming convention: Base* for trait names (e.g., BaseOtpService, BaseBlobStore)

use anyhow::Result;
use async_trait::async_trait;
use bytes::Bytes;
use chrono::{DateTime, Utc};
use futures::stream::BoxStream;
use serde::{Deserialize, Serialize};

use crate::common::{BlobId, UserId};
use crate::domains::catalog::models::OwnedRecord;
use crate::domains::users::models::{NewUser, User};

// =============================================================================
// OTP Provider Trait (Infrastructure - one-time code delivery and checking)
// =============================================================================

/// Delivery channel for one-time codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OtpChannel {
    Sms,
    Call,
}

impl OtpChannel {
    pub fn as_str(&self) -> &'static str {
        match self {
            OtpChannel::Sms => "sms",
            OtpChannel::Call => "call",
        }
    }
}

/// Provider verdict for a submitted code.
///
/// Only `Approved` proves control of the phone number; `Pending` means the
/// code did not match, `Canceled` means the verification expired or was
/// revoked by the provider.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OtpVerdict {
    Approved,
    Pending,
    Canceled,
}

impl std::fmt::Display for OtpVerdict {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OtpVerdict::Approved => write!(f, "approved"),
            OtpVerdict::Pending => write!(f, "pending"),
            OtpVerdict::Canceled => write!(f, "canceled"),
        }
    }
}

#[async_trait]
pub trait BaseOtpService: Send + Sync {
    /// Dispatch a one-time code to a phone number
    async fn send_code(&self, phone_number: &str, channel: OtpChannel) -> Result<()>;

    /// Check a submitted code and return the provider's verdict
    async fn check_code(&self, phone_number: &str, code: &str) -> Result<OtpVerdict>;
}

// =============================================================================
// Blob Store Trait (Infrastructure - attachment bytes)
// =============================================================================

/// Media kind tag derived from the declared content type at upload time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MediaKind {
    Image,
    Video,
}

impl std::fmt::Display for MediaKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MediaKind::Image => write!(f, "image"),
            MediaKind::Video => write!(f, "video"),
        }
    }
}

impl std::str::FromStr for MediaKind {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "image" => Ok(MediaKind::Image),
            "video" => Ok(MediaKind::Video),
            _ => Err(anyhow::anyhow!("Invalid media kind: {}", s)),
        }
    }
}

/// A binary object to be written to the blob store.
#[derive(Debug, Clone)]
pub struct NewBlob {
    pub owner_id: UserId,
    pub kind: MediaKind,
    pub filename: Option<String>,
    pub content_type: String,
    pub bytes: Bytes,
}

/// Metadata describing a stored blob.
#[derive(Debug, Clone)]
pub struct BlobMeta {
    pub id: BlobId,
    pub owner_id: UserId,
    pub kind: MediaKind,
    pub filename: Option<String>,
    pub content_type: String,
    pub size_bytes: i64,
    /// Hex SHA-256 digest of the stored bytes
    pub sha256: String,
    pub created_at: DateTime<Utc>,
}

/// An opened blob: metadata plus a lazy byte stream.
///
/// The stream is finite and not restartable; open the blob again for another
/// pass over the bytes.
pub struct BlobObject {
    pub meta: BlobMeta,
    pub stream: BoxStream<'static, Result<Bytes>>,
}

#[async_trait]
pub trait BaseBlobStore: Send + Sync {
    /// Store an object durably, returning its handle
    async fn put(&self, blob: NewBlob) -> Result<BlobId>;

    /// Open an object for streaming; None when the handle is unknown
    async fn open(&self, id: BlobId) -> Result<Option<BlobObject>>;
}

// =============================================================================
// User Store Trait (Infrastructure - identity rows)
// =============================================================================

#[async_trait]
pub trait BaseUserStore: Send + Sync {
    async fn find_by_phone(&self, phone_number: &str) -> Result<Option<User>>;

    async fn find_by_id(&self, id: UserId) -> Result<Option<User>>;

    /// Insert a pending user, deduplicated on phone number; returns the
    /// canonical row (freshly inserted or pre-existing)
    async fn upsert_pending(&self, new_user: NewUser) -> Result<User>;

    /// Conditionally transition pending -> verified; None when no pending
    /// row exists for the phone number (at-most-once under races)
    async fn mark_verified(&self, phone_number: &str) -> Result<Option<User>>;

    /// Cheap liveness probe of the underlying storage (used by /health)
    async fn ping(&self) -> Result<()>;
}

// =============================================================================
// Catalog Store Trait (Infrastructure - owner-scoped record CRUD)
// =============================================================================

#[async_trait]
pub trait BaseCatalogStore<R: OwnedRecord>: Send + Sync {
    async fn insert(&self, new: R::New) -> Result<R>;

    async fn list_by_owner(&self, owner_id: UserId) -> Result<Vec<R>>;

    /// Owner-scoped lookup: a record owned by someone else returns None,
    /// indistinguishable from a missing record
    async fn find_owned(&self, key: R::Key, owner_id: UserId) -> Result<Option<R>>;

    /// Owner-scoped partial update: None when zero rows were modified,
    /// including a patch whose values all match the stored record
    async fn update_owned(&self, key: R::Key, owner_id: UserId, patch: R::Patch)
        -> Result<Option<R>>;

    /// Owner-scoped delete: false when nothing matched
    async fn delete_owned(&self, key: R::Key, owner_id: UserId) -> Result<bool>;
}
