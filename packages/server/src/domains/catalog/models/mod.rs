pub mod product;
pub mod service;

pub use product::{CreateProduct, Product, UpdateProduct};
pub use service::{CreateService, Service, UpdateService};

use std::fmt::Debug;
use std::hash::Hash;

use crate::common::UserId;

/// A catalog record owned by exactly one user.
///
/// Products and services share their whole lifecycle (owner-scoped CRUD with
/// partial updates); this trait is what lets the store layer and the in-memory
/// test double stay generic over the two kinds.
pub trait OwnedRecord: Clone + Debug + Send + Sync + 'static {
    /// Typed primary key.
    type Key: Copy + Eq + Hash + Debug + Send + Sync + 'static;
    /// Input for creating a record (no id or timestamps yet).
    type New: Send + Sync + 'static;
    /// Partial update: only `Some` fields are applied, the rest are preserved.
    type Patch: Debug + Send + Sync + 'static;

    fn key(&self) -> Self::Key;

    /// The owning user. Immutable after creation.
    fn owner_id(&self) -> UserId;

    /// Materialize a record from creation input, assigning a fresh id.
    fn from_new(new: Self::New) -> Self;

    /// Merge a patch over this record.
    ///
    /// Returns false when every supplied field already equals the stored
    /// value; callers report that case as a failed update, mirroring a
    /// zero-rows-modified conditional write.
    fn apply_patch(&mut self, patch: &Self::Patch) -> bool;
}
