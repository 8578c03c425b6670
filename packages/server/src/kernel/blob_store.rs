//! Postgres blob storage.
//!
//! Attachment bytes are stored in two tables: a `blobs` row holding the
//! metadata (content type, media kind, size, digest) and `blob_chunks` rows
//! holding the bytes in fixed-size pieces. Writes are transactional; reads
//! stream one chunk per query so a large video never sits in memory whole.

use anyhow::Result;
use async_trait::async_trait;
use bytes::Bytes;
use chrono::{DateTime, Utc};
use futures::stream::{self, BoxStream, StreamExt};
use sha2::{Digest, Sha256};
use sqlx::PgPool;

use crate::common::{BlobId, UserId};
use crate::kernel::traits::{BaseBlobStore, BlobMeta, BlobObject, MediaKind, NewBlob};

/// Chunk size for stored bytes. Each chunk is one row in `blob_chunks`.
pub const BLOB_CHUNK_SIZE: usize = 256 * 1024;

#[derive(Debug, sqlx::FromRow)]
struct BlobRow {
    id: BlobId,
    owner_id: UserId,
    filename: Option<String>,
    content_type: String,
    media_kind: String,
    size_bytes: i64,
    sha256: String,
    created_at: DateTime<Utc>,
}

impl BlobRow {
    fn into_meta(self) -> Result<BlobMeta> {
        Ok(BlobMeta {
            id: self.id,
            owner_id: self.owner_id,
            kind: self.media_kind.parse::<MediaKind>()?,
            filename: self.filename,
            content_type: self.content_type,
            size_bytes: self.size_bytes,
            sha256: self.sha256,
            created_at: self.created_at,
        })
    }
}

pub struct PgBlobStore {
    pool: PgPool,
}

impl PgBlobStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl BaseBlobStore for PgBlobStore {
    async fn put(&self, blob: NewBlob) -> Result<BlobId> {
        let id = BlobId::new();
        let digest = hex::encode(Sha256::digest(&blob.bytes));
        let size_bytes = blob.bytes.len() as i64;

        let mut tx = self.pool.begin().await?;

        sqlx::query(
            "INSERT INTO blobs (id, owner_id, filename, content_type, media_kind, size_bytes, sha256)
             VALUES ($1, $2, $3, $4, $5, $6, $7)",
        )
        .bind(id)
        .bind(blob.owner_id)
        .bind(&blob.filename)
        .bind(&blob.content_type)
        .bind(blob.kind.to_string())
        .bind(size_bytes)
        .bind(&digest)
        .execute(&mut *tx)
        .await?;

        for (seq, chunk) in blob.bytes.chunks(BLOB_CHUNK_SIZE).enumerate() {
            sqlx::query("INSERT INTO blob_chunks (blob_id, seq, data) VALUES ($1, $2, $3)")
                .bind(id)
                .bind(seq as i32)
                .bind(chunk)
                .execute(&mut *tx)
                .await?;
        }

        tx.commit().await?;
        Ok(id)
    }

    async fn open(&self, id: BlobId) -> Result<Option<BlobObject>> {
        let row: Option<BlobRow> = sqlx::query_as("SELECT * FROM blobs WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        let Some(row) = row else {
            return Ok(None);
        };

        let meta = row.into_meta()?;
        let stream = chunk_stream(self.pool.clone(), id);

        Ok(Some(BlobObject { meta, stream }))
    }
}

struct ChunkCursor {
    pool: PgPool,
    blob_id: BlobId,
    seq: i32,
    failed: bool,
}

/// Stream the chunks of a blob in order, one query per chunk.
///
/// The stream ends at the first missing sequence number. A query error is
/// yielded once, then the stream ends.
fn chunk_stream(pool: PgPool, blob_id: BlobId) -> BoxStream<'static, Result<Bytes>> {
    let cursor = ChunkCursor {
        pool,
        blob_id,
        seq: 0,
        failed: false,
    };

    stream::unfold(cursor, |mut cursor| async move {
        if cursor.failed {
            return None;
        }

        let chunk: Result<Option<Vec<u8>>, sqlx::Error> =
            sqlx::query_scalar("SELECT data FROM blob_chunks WHERE blob_id = $1 AND seq = $2")
                .bind(cursor.blob_id)
                .bind(cursor.seq)
                .fetch_optional(&cursor.pool)
                .await;

        match chunk {
            Ok(Some(data)) => {
                cursor.seq += 1;
                Some((Ok(Bytes::from(data)), cursor))
            }
            Ok(None) => None,
            Err(e) => {
                cursor.failed = true;
                Some((Err(anyhow::Error::from(e)), cursor))
            }
        }
    })
    .boxed()
}
