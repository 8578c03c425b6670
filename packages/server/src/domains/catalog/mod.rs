//! Catalog domain - vendor-owned products and services
//!
//! Two record kinds with a symmetric lifecycle: create with attachments,
//! list/fetch/update/delete scoped to the owning user. Ownership is enforced
//! by the query predicate on every operation, so a foreign record behaves
//! exactly like a missing one.

pub mod data;
pub mod models;

pub use data::{ProductData, ServiceData};
pub use models::{
    CreateProduct, CreateService, OwnedRecord, Product, Service, UpdateProduct, UpdateService,
};
