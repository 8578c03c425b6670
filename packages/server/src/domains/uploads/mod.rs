//! Uploads domain - attachment ingestion for catalog records

pub mod orchestrator;

pub use orchestrator::{store_batch, StoredAttachments, UploadedFile};
