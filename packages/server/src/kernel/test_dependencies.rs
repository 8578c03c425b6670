// TestDependencies - mock implementations for testing
//
// Provides in-memory services that can be injected into ServerDeps for tests.

use anyhow::Result;
use async_trait::async_trait;
use bytes::Bytes;
use futures::stream::{self, StreamExt};
use sha2::{Digest, Sha256};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use crate::common::{BlobId, UserId};
use crate::domains::auth::JwtService;
use crate::domains::catalog::models::{OwnedRecord, Product, Service};
use crate::domains::users::models::{NewUser, User, VerificationStatus};
use crate::kernel::blob_store::BLOB_CHUNK_SIZE;
use crate::kernel::deps::ServerDeps;
use crate::kernel::traits::{
    BaseBlobStore, BaseCatalogStore, BaseOtpService, BaseUserStore, BlobMeta, BlobObject,
    MediaKind, NewBlob, OtpChannel, OtpVerdict,
};

// =============================================================================
// Mock OTP Service
// =============================================================================

pub struct MockOtpService {
    accepted_code: Arc<Mutex<String>>,
    queued_verdicts: Arc<Mutex<Vec<OtpVerdict>>>,
    fail_sends: Arc<Mutex<bool>>,
    send_calls: Arc<Mutex<Vec<(String, OtpChannel)>>>,
    check_calls: Arc<Mutex<Vec<(String, String)>>>,
}

impl MockOtpService {
    pub fn new() -> Self {
        Self {
            accepted_code: Arc::new(Mutex::new("123456".to_string())),
            queued_verdicts: Arc::new(Mutex::new(Vec::new())),
            fail_sends: Arc::new(Mutex::new(false)),
            send_calls: Arc::new(Mutex::new(Vec::new())),
            check_calls: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Set the code that checks as approved (default "123456")
    pub fn with_accepted_code(self, code: &str) -> Self {
        *self.accepted_code.lock().unwrap() = code.to_string();
        self
    }

    /// Queue a verdict returned by the next check regardless of the code
    pub fn with_verdict(self, verdict: OtpVerdict) -> Self {
        self.queued_verdicts.lock().unwrap().push(verdict);
        self
    }

    /// Make every send fail, simulating a provider outage
    pub fn with_send_failure(self) -> Self {
        *self.fail_sends.lock().unwrap() = true;
        self
    }

    /// Get all (phone, channel) pairs a code was sent to
    pub fn send_calls(&self) -> Vec<(String, OtpChannel)> {
        self.send_calls.lock().unwrap().clone()
    }

    /// Get all (phone, code) pairs that were checked
    pub fn check_calls(&self) -> Vec<(String, String)> {
        self.check_calls.lock().unwrap().clone()
    }

    /// Check if a code was sent to a phone number
    pub fn was_sent_to(&self, phone_number: &str) -> bool {
        self.send_calls
            .lock()
            .unwrap()
            .iter()
            .any(|(p, _)| p == phone_number)
    }
}

impl Default for MockOtpService {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl BaseOtpService for MockOtpService {
    async fn send_code(&self, phone_number: &str, channel: OtpChannel) -> Result<()> {
        self.send_calls
            .lock()
            .unwrap()
            .push((phone_number.to_string(), channel));

        if *self.fail_sends.lock().unwrap() {
            return Err(anyhow::anyhow!("otp provider unavailable"));
        }
        Ok(())
    }

    async fn check_code(&self, phone_number: &str, code: &str) -> Result<OtpVerdict> {
        self.check_calls
            .lock()
            .unwrap()
            .push((phone_number.to_string(), code.to_string()));

        let mut queued = self.queued_verdicts.lock().unwrap();
        if !queued.is_empty() {
            return Ok(queued.remove(0));
        }

        if code == self.accepted_code.lock().unwrap().as_str() {
            Ok(OtpVerdict::Approved)
        } else {
            Ok(OtpVerdict::Pending)
        }
    }
}

// =============================================================================
// Memory User Store
// =============================================================================

pub struct MemoryUserStore {
    rows: Arc<Mutex<HashMap<String, User>>>,
    fail_ping: Arc<Mutex<bool>>,
}

impl MemoryUserStore {
    pub fn new() -> Self {
        Self {
            rows: Arc::new(Mutex::new(HashMap::new())),
            fail_ping: Arc::new(Mutex::new(false)),
        }
    }

    /// Seed a user row directly
    pub fn with_user(self, user: User) -> Self {
        self.rows
            .lock()
            .unwrap()
            .insert(user.phone_number.clone(), user);
        self
    }

    /// Make the liveness probe fail, simulating lost storage
    pub fn with_ping_failure(self) -> Self {
        *self.fail_ping.lock().unwrap() = true;
        self
    }

    pub fn user_count(&self) -> usize {
        self.rows.lock().unwrap().len()
    }
}

impl Default for MemoryUserStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl BaseUserStore for MemoryUserStore {
    async fn find_by_phone(&self, phone_number: &str) -> Result<Option<User>> {
        Ok(self.rows.lock().unwrap().get(phone_number).cloned())
    }

    async fn find_by_id(&self, id: UserId) -> Result<Option<User>> {
        Ok(self
            .rows
            .lock()
            .unwrap()
            .values()
            .find(|u| u.id == id)
            .cloned())
    }

    async fn upsert_pending(&self, new_user: NewUser) -> Result<User> {
        let mut rows = self.rows.lock().unwrap();

        if let Some(existing) = rows.get(&new_user.phone_number) {
            return Ok(existing.clone());
        }

        let now = chrono::Utc::now();
        let user = User {
            id: UserId::new(),
            phone_number: new_user.phone_number.clone(),
            username: new_user.username,
            verification_status: VerificationStatus::Pending.to_string(),
            created_at: now,
            updated_at: now,
        };
        rows.insert(new_user.phone_number, user.clone());
        Ok(user)
    }

    async fn mark_verified(&self, phone_number: &str) -> Result<Option<User>> {
        let mut rows = self.rows.lock().unwrap();

        match rows.get_mut(phone_number) {
            Some(user) if !user.is_verified() => {
                user.verification_status = VerificationStatus::Verified.to_string();
                user.updated_at = chrono::Utc::now();
                Ok(Some(user.clone()))
            }
            _ => Ok(None),
        }
    }

    async fn ping(&self) -> Result<()> {
        if *self.fail_ping.lock().unwrap() {
            return Err(anyhow::anyhow!("storage unavailable"));
        }
        Ok(())
    }
}

// =============================================================================
// Memory Catalog Store
// =============================================================================

pub struct MemoryCatalogStore<R: OwnedRecord> {
    rows: Arc<Mutex<Vec<R>>>,
}

impl<R: OwnedRecord> MemoryCatalogStore<R> {
    pub fn new() -> Self {
        Self {
            rows: Arc::new(Mutex::new(Vec::new())),
        }
    }

    pub fn record_count(&self) -> usize {
        self.rows.lock().unwrap().len()
    }
}

impl<R: OwnedRecord> Default for MemoryCatalogStore<R> {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl<R: OwnedRecord> BaseCatalogStore<R> for MemoryCatalogStore<R> {
    async fn insert(&self, new: R::New) -> Result<R> {
        let record = R::from_new(new);
        self.rows.lock().unwrap().push(record.clone());
        Ok(record)
    }

    async fn list_by_owner(&self, owner_id: UserId) -> Result<Vec<R>> {
        Ok(self
            .rows
            .lock()
            .unwrap()
            .iter()
            .filter(|r| r.owner_id() == owner_id)
            .cloned()
            .collect())
    }

    async fn find_owned(&self, key: R::Key, owner_id: UserId) -> Result<Option<R>> {
        Ok(self
            .rows
            .lock()
            .unwrap()
            .iter()
            .find(|r| r.key() == key && r.owner_id() == owner_id)
            .cloned())
    }

    async fn update_owned(
        &self,
        key: R::Key,
        owner_id: UserId,
        patch: R::Patch,
    ) -> Result<Option<R>> {
        let mut rows = self.rows.lock().unwrap();

        let Some(row) = rows
            .iter_mut()
            .find(|r| r.key() == key && r.owner_id() == owner_id)
        else {
            return Ok(None);
        };

        // A patch that changes nothing counts as zero rows modified, same as
        // the row-value predicate in the Postgres store.
        if !row.apply_patch(&patch) {
            return Ok(None);
        }
        Ok(Some(row.clone()))
    }

    async fn delete_owned(&self, key: R::Key, owner_id: UserId) -> Result<bool> {
        let mut rows = self.rows.lock().unwrap();
        let before = rows.len();
        rows.retain(|r| !(r.key() == key && r.owner_id() == owner_id));
        Ok(rows.len() < before)
    }
}

// =============================================================================
// Memory Blob Store
// =============================================================================

pub struct MemoryBlobStore {
    objects: Arc<Mutex<HashMap<BlobId, (BlobMeta, Bytes)>>>,
    fail_after: Arc<Mutex<Option<usize>>>,
    put_count: Arc<Mutex<usize>>,
}

impl MemoryBlobStore {
    pub fn new() -> Self {
        Self {
            objects: Arc::new(Mutex::new(HashMap::new())),
            fail_after: Arc::new(Mutex::new(None)),
            put_count: Arc::new(Mutex::new(0)),
        }
    }

    /// Let the first `n` puts succeed, then fail every later one
    pub fn with_put_failure_after(self, n: usize) -> Self {
        *self.fail_after.lock().unwrap() = Some(n);
        self
    }

    /// Number of objects currently stored
    pub fn stored_count(&self) -> usize {
        self.objects.lock().unwrap().len()
    }

    /// Number of put attempts, including failed ones
    pub fn put_count(&self) -> usize {
        *self.put_count.lock().unwrap()
    }

    pub fn contains(&self, id: BlobId) -> bool {
        self.objects.lock().unwrap().contains_key(&id)
    }

    pub fn meta_of(&self, id: BlobId) -> Option<BlobMeta> {
        self.objects
            .lock()
            .unwrap()
            .get(&id)
            .map(|(meta, _)| meta.clone())
    }

    pub fn kind_of(&self, id: BlobId) -> Option<MediaKind> {
        self.meta_of(id).map(|m| m.kind)
    }
}

impl Default for MemoryBlobStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl BaseBlobStore for MemoryBlobStore {
    async fn put(&self, blob: NewBlob) -> Result<BlobId> {
        let attempts = {
            let mut count = self.put_count.lock().unwrap();
            *count += 1;
            *count
        };

        if let Some(n) = *self.fail_after.lock().unwrap() {
            if attempts > n {
                return Err(anyhow::anyhow!("blob store write failed"));
            }
        }

        let id = BlobId::new();
        let meta = BlobMeta {
            id,
            owner_id: blob.owner_id,
            kind: blob.kind,
            filename: blob.filename,
            content_type: blob.content_type,
            size_bytes: blob.bytes.len() as i64,
            sha256: hex::encode(Sha256::digest(&blob.bytes)),
            created_at: chrono::Utc::now(),
        };

        self.objects
            .lock()
            .unwrap()
            .insert(id, (meta, blob.bytes));
        Ok(id)
    }

    async fn open(&self, id: BlobId) -> Result<Option<BlobObject>> {
        let Some((meta, bytes)) = self.objects.lock().unwrap().get(&id).cloned() else {
            return Ok(None);
        };

        let chunks: Vec<Result<Bytes>> = bytes
            .chunks(BLOB_CHUNK_SIZE)
            .map(|c| Ok(Bytes::copy_from_slice(c)))
            .collect();

        Ok(Some(BlobObject {
            meta,
            stream: stream::iter(chunks).boxed(),
        }))
    }
}

// =============================================================================
// TestDependencies
// =============================================================================

pub struct TestDependencies {
    pub users: Arc<MemoryUserStore>,
    pub products: Arc<MemoryCatalogStore<Product>>,
    pub services: Arc<MemoryCatalogStore<Service>>,
    pub blobs: Arc<MemoryBlobStore>,
    pub otp: Arc<MockOtpService>,
    pub jwt_service: Arc<JwtService>,
}

impl TestDependencies {
    pub fn new() -> Self {
        Self {
            users: Arc::new(MemoryUserStore::new()),
            products: Arc::new(MemoryCatalogStore::new()),
            services: Arc::new(MemoryCatalogStore::new()),
            blobs: Arc::new(MemoryBlobStore::new()),
            otp: Arc::new(MockOtpService::new()),
            jwt_service: Arc::new(JwtService::new("test_secret_key", "test_issuer".to_string())),
        }
    }

    /// Set a mock OTP service
    pub fn mock_otp(mut self, otp: MockOtpService) -> Self {
        self.otp = Arc::new(otp);
        self
    }

    /// Set a memory user store
    pub fn mock_users(mut self, users: MemoryUserStore) -> Self {
        self.users = Arc::new(users);
        self
    }

    /// Set a memory blob store
    pub fn mock_blobs(mut self, blobs: MemoryBlobStore) -> Self {
        self.blobs = Arc::new(blobs);
        self
    }

    /// Build a ServerDeps backed by these test services. The Arc handles
    /// stay usable for assertions after the call.
    pub fn server_deps(&self) -> ServerDeps {
        ServerDeps::new(
            self.users.clone(),
            self.products.clone(),
            self.services.clone(),
            self.blobs.clone(),
            self.otp.clone(),
            self.jwt_service.clone(),
        )
    }
}

impl Default for TestDependencies {
    fn default() -> Self {
        Self::new()
    }
}
