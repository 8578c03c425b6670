//! Attachment batch storage.
//!
//! Files arrive with a product or service creation request and are written
//! to the blob store before the catalog record. The two writes are
//! independent: a record insert that fails after its files were stored
//! leaves those blobs unreferenced, and nothing reconciles them later.

use anyhow::Result;
use bytes::Bytes;
use tracing::{info, warn};

use crate::common::{BlobId, UserId};
use crate::kernel::{MediaKind, NewBlob, ServerDeps};

/// A file lifted out of a multipart request
#[derive(Debug, Clone)]
pub struct UploadedFile {
    pub filename: Option<String>,
    pub content_type: Option<String>,
    pub bytes: Bytes,
}

/// Handles for a stored batch, split by media kind
#[derive(Debug, Clone, Default)]
pub struct StoredAttachments {
    pub images: Vec<BlobId>,
    pub videos: Vec<BlobId>,
}

/// Classify a file by its declared content type. A missing type falls back
/// to a guess from the filename extension; anything that is not image/* or
/// video/* classifies as None.
fn classify(file: &UploadedFile) -> Option<(MediaKind, String)> {
    let content_type = match &file.content_type {
        Some(declared) => declared.clone(),
        None => {
            let guessed = file
                .filename
                .as_deref()
                .and_then(|name| mime_guess::from_path(name).first())?;
            guessed.essence_str().to_string()
        }
    };

    if content_type.starts_with("image/") {
        Some((MediaKind::Image, content_type))
    } else if content_type.starts_with("video/") {
        Some((MediaKind::Video, content_type))
    } else {
        None
    }
}

/// Store a batch of uploaded files for an owner, returning the handles.
///
/// Unrecognized files are dropped without error and appear in neither
/// returned list. Each file is stored on its own: when storing file N
/// fails, files 1..N-1 stay in the blob store and the whole request fails.
pub async fn store_batch(
    files: Vec<UploadedFile>,
    owner_id: UserId,
    deps: &ServerDeps,
) -> Result<StoredAttachments> {
    let mut stored = StoredAttachments::default();

    for file in files {
        let Some((kind, content_type)) = classify(&file) else {
            warn!(
                "Dropping upload {:?} with unrecognized content type {:?}",
                file.filename, file.content_type
            );
            continue;
        };

        let handle = deps
            .blobs
            .put(NewBlob {
                owner_id,
                kind,
                filename: file.filename,
                content_type,
                bytes: file.bytes,
            })
            .await?;

        match kind {
            MediaKind::Image => stored.images.push(handle),
            MediaKind::Video => stored.videos.push(handle),
        }
    }

    info!(
        "Stored {} image(s) and {} video(s) for owner {}",
        stored.images.len(),
        stored.videos.len(),
        owner_id
    );
    Ok(stored)
}
