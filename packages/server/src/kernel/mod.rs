//! Kernel module - server infrastructure and dependencies.

pub mod blob_store;
pub mod deps;
pub mod pg;
pub mod test_dependencies;
pub mod traits;

pub use blob_store::{PgBlobStore, BLOB_CHUNK_SIZE};
pub use deps::{ServerDeps, TwilioOtpAdapter};
pub use pg::{PgProductStore, PgServiceStore, PgUserStore};
pub use traits::{
    BaseBlobStore, BaseCatalogStore, BaseOtpService, BaseUserStore, BlobMeta, BlobObject,
    MediaKind, NewBlob, OtpChannel, OtpVerdict,
};
