//! Server dependencies (using traits for testability)
//!
//! This module provides the central dependency container used by all domain
//! actions and routes. All external services sit behind trait abstractions so
//! tests can swap in in-memory implementations.

use std::sync::Arc;

use anyhow::Result;
use async_trait::async_trait;
use sqlx::PgPool;
use twilio::TwilioService;

use crate::domains::auth::JwtService;
use crate::domains::catalog::models::{Product, Service};
use crate::kernel::blob_store::PgBlobStore;
use crate::kernel::pg::{PgProductStore, PgServiceStore, PgUserStore};
use crate::kernel::traits::{
    BaseBlobStore, BaseCatalogStore, BaseOtpService, BaseUserStore, OtpChannel, OtpVerdict,
};

// =============================================================================
// TwilioService Adapter (implements BaseOtpService trait)
// =============================================================================

/// Wrapper around TwilioService that implements the BaseOtpService trait
pub struct TwilioOtpAdapter(pub Arc<TwilioService>);

impl TwilioOtpAdapter {
    pub fn new(service: Arc<TwilioService>) -> Self {
        Self(service)
    }
}

#[async_trait]
impl BaseOtpService for TwilioOtpAdapter {
    async fn send_code(&self, phone_number: &str, channel: OtpChannel) -> Result<()> {
        self.0
            .send_code(phone_number, channel.as_str())
            .await
            .map(|_| ())
            .map_err(|e| anyhow::anyhow!("{}", e))
    }

    async fn check_code(&self, phone_number: &str, code: &str) -> Result<OtpVerdict> {
        let check = match self.0.check_code(phone_number, code).await {
            Ok(check) => check,
            // Twilio answers 404 once a verification has expired or was
            // never started; the code can no longer be approved.
            Err(twilio::TwilioError::Api { status: 404, .. }) => {
                return Ok(OtpVerdict::Canceled);
            }
            Err(e) => return Err(anyhow::anyhow!("{}", e)),
        };

        // Twilio answers 200 for a wrong code; only the status string tells
        // the outcome apart.
        let verdict = match check.status.as_str() {
            "approved" => OtpVerdict::Approved,
            "canceled" => OtpVerdict::Canceled,
            _ => OtpVerdict::Pending,
        };

        Ok(verdict)
    }
}

// =============================================================================
// ServerDeps
// =============================================================================

/// Server dependencies accessible to actions and routes (traits for testability)
#[derive(Clone)]
pub struct ServerDeps {
    pub users: Arc<dyn BaseUserStore>,
    pub products: Arc<dyn BaseCatalogStore<Product>>,
    pub services: Arc<dyn BaseCatalogStore<Service>>,
    pub blobs: Arc<dyn BaseBlobStore>,
    pub otp: Arc<dyn BaseOtpService>,
    /// JWT service for token creation
    pub jwt_service: Arc<JwtService>,
}

impl ServerDeps {
    /// Create new ServerDeps with the given dependencies
    pub fn new(
        users: Arc<dyn BaseUserStore>,
        products: Arc<dyn BaseCatalogStore<Product>>,
        services: Arc<dyn BaseCatalogStore<Service>>,
        blobs: Arc<dyn BaseBlobStore>,
        otp: Arc<dyn BaseOtpService>,
        jwt_service: Arc<JwtService>,
    ) -> Self {
        Self {
            users,
            products,
            services,
            blobs,
            otp,
            jwt_service,
        }
    }

    /// Production wiring: every store backed by the given Postgres pool,
    /// codes delivered through Twilio Verify.
    pub fn postgres(
        pool: PgPool,
        twilio: Arc<TwilioService>,
        jwt_service: Arc<JwtService>,
    ) -> Self {
        Self {
            users: Arc::new(PgUserStore::new(pool.clone())),
            products: Arc::new(PgProductStore::new(pool.clone())),
            services: Arc::new(PgServiceStore::new(pool.clone())),
            blobs: Arc::new(PgBlobStore::new(pool)),
            otp: Arc::new(TwilioOtpAdapter::new(twilio)),
            jwt_service,
        }
    }
}
