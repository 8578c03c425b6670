//! Multipart form ingestion for catalog creation requests.
//!
//! Creation requests carry text fields (name, description, price or rate)
//! and any number of file parts. The per-file size ceiling is enforced here,
//! while the bytes are read, so an oversized file is rejected before
//! anything reaches the blob store.

use std::collections::HashMap;

use axum::extract::multipart::{Multipart, MultipartError};
use bytes::BytesMut;
use rust_decimal::Decimal;

use crate::domains::uploads::UploadedFile;
use crate::server::error::ApiError;

/// Per-file ceiling: 20 MB
pub const MAX_FILE_BYTES: usize = 20 * 1024 * 1024;

/// Text fields and files lifted out of a multipart request
pub struct CatalogForm {
    pub fields: HashMap<String, String>,
    pub files: Vec<UploadedFile>,
}

impl CatalogForm {
    /// Get a required text field; empty counts as missing
    pub fn require(&self, name: &str) -> Result<&str, ApiError> {
        self.fields
            .get(name)
            .map(|s| s.trim())
            .filter(|s| !s.is_empty())
            .ok_or_else(|| ApiError::BadRequest(format!("Missing required field: {}", name)))
    }

    /// Get a required decimal field
    pub fn require_decimal(&self, name: &str) -> Result<Decimal, ApiError> {
        self.require(name)?
            .parse::<Decimal>()
            .map_err(|_| ApiError::BadRequest(format!("Invalid value for field: {}", name)))
    }
}

/// Read a whole multipart body into text fields and file parts.
///
/// A part with a filename is a file; anything else is a text field. File
/// bytes are read chunkwise and capped at MAX_FILE_BYTES each.
pub async fn read_catalog_form(mut multipart: Multipart) -> Result<CatalogForm, ApiError> {
    let mut fields = HashMap::new();
    let mut files = Vec::new();

    while let Some(mut field) = multipart.next_field().await.map_err(bad_multipart)? {
        if field.file_name().is_some() {
            let filename = field.file_name().map(String::from).filter(|f| !f.is_empty());
            let content_type = field.content_type().map(String::from);

            let mut buf = BytesMut::new();
            while let Some(chunk) = field.chunk().await.map_err(bad_multipart)? {
                if buf.len() + chunk.len() > MAX_FILE_BYTES {
                    return Err(ApiError::PayloadTooLarge);
                }
                buf.extend_from_slice(&chunk);
            }

            files.push(UploadedFile {
                filename,
                content_type,
                bytes: buf.freeze(),
            });
        } else if let Some(name) = field.name().map(String::from) {
            let value = field.text().await.map_err(bad_multipart)?;
            fields.insert(name, value);
        }
    }

    Ok(CatalogForm { fields, files })
}

fn bad_multipart(err: MultipartError) -> ApiError {
    ApiError::BadRequest(format!("Malformed multipart body: {}", err))
}
