//! Postgres-backed implementations of the storage traits.
//!
//! These are thin adapters: the SQL itself lives on the domain models, and
//! each method here delegates to the matching model method.

use anyhow::Result;
use async_trait::async_trait;
use sqlx::PgPool;

use crate::common::{ProductId, ServiceId, UserId};
use crate::domains::catalog::models::{
    CreateProduct, CreateService, Product, Service, UpdateProduct, UpdateService,
};
use crate::domains::users::models::{NewUser, User};
use crate::kernel::traits::{BaseCatalogStore, BaseUserStore};

pub struct PgUserStore {
    pool: PgPool,
}

impl PgUserStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl BaseUserStore for PgUserStore {
    async fn find_by_phone(&self, phone_number: &str) -> Result<Option<User>> {
        User::find_by_phone(phone_number, &self.pool).await
    }

    async fn find_by_id(&self, id: UserId) -> Result<Option<User>> {
        User::find_by_id(id, &self.pool).await
    }

    async fn upsert_pending(&self, new_user: NewUser) -> Result<User> {
        User::upsert_pending(new_user, &self.pool).await
    }

    async fn mark_verified(&self, phone_number: &str) -> Result<Option<User>> {
        User::mark_verified(phone_number, &self.pool).await
    }

    async fn ping(&self) -> Result<()> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }
}

pub struct PgProductStore {
    pool: PgPool,
}

impl PgProductStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl BaseCatalogStore<Product> for PgProductStore {
    async fn insert(&self, new: CreateProduct) -> Result<Product> {
        Product::create(new, &self.pool).await
    }

    async fn list_by_owner(&self, owner_id: UserId) -> Result<Vec<Product>> {
        Product::list_by_owner(owner_id, &self.pool).await
    }

    async fn find_owned(&self, key: ProductId, owner_id: UserId) -> Result<Option<Product>> {
        Product::find_owned(key, owner_id, &self.pool).await
    }

    async fn update_owned(
        &self,
        key: ProductId,
        owner_id: UserId,
        patch: UpdateProduct,
    ) -> Result<Option<Product>> {
        Product::update_owned(key, owner_id, &patch, &self.pool).await
    }

    async fn delete_owned(&self, key: ProductId, owner_id: UserId) -> Result<bool> {
        Product::delete_owned(key, owner_id, &self.pool).await
    }
}

pub struct PgServiceStore {
    pool: PgPool,
}

impl PgServiceStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl BaseCatalogStore<Service> for PgServiceStore {
    async fn insert(&self, new: CreateService) -> Result<Service> {
        Service::create(new, &self.pool).await
    }

    async fn list_by_owner(&self, owner_id: UserId) -> Result<Vec<Service>> {
        Service::list_by_owner(owner_id, &self.pool).await
    }

    async fn find_owned(&self, key: ServiceId, owner_id: UserId) -> Result<Option<Service>> {
        Service::find_owned(key, owner_id, &self.pool).await
    }

    async fn update_owned(
        &self,
        key: ServiceId,
        owner_id: UserId,
        patch: UpdateService,
    ) -> Result<Option<Service>> {
        Service::update_owned(key, owner_id, &patch, &self.pool).await
    }

    async fn delete_owned(&self, key: ServiceId, owner_id: UserId) -> Result<bool> {
        Service::delete_owned(key, owner_id, &self.pool).await
    }
}
