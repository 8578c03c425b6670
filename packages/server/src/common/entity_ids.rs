//! Typed ID definitions for all domain entities.
//!
//! This module defines type aliases for each domain entity, providing
//! compile-time type safety for ID usage throughout the application.
//!
//! # Example
//!
//! ```rust
//! use server_core::common::{ProductId, UserId};
//!
//! // These are incompatible types - compiler prevents mixing them up
//! let user_id: UserId = UserId::new();
//! let product_id: ProductId = ProductId::new();
//!
//! // This would be a compile error:
//! // let wrong: ProductId = user_id;
//! ```

// Re-export the core Id type and version markers
pub use super::id::{Id, V4, V7};

// ============================================================================
// Entity marker types
// ============================================================================

/// Marker type for User entities (vendors).
pub struct User;

/// Marker type for Product entities (catalog records with a price).
pub struct Product;

/// Marker type for Service entities (catalog records with a rate).
pub struct Service;

/// Marker type for Blob entities (stored attachment objects).
pub struct Blob;

// ============================================================================
// Type aliases - the primary API
// ============================================================================

/// Typed ID for User entities.
pub type UserId = Id<User>;

/// Typed ID for Product entities.
pub type ProductId = Id<Product>;

/// Typed ID for Service entities.
pub type ServiceId = Id<Service>;

/// Typed ID for Blob entities (attachment handles).
pub type BlobId = Id<Blob>;
