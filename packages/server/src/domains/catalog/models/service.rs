use anyhow::Result;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::PgPool;

use super::OwnedRecord;
use crate::common::{BlobId, ServiceId, UserId};

/// Service model - offered work in a vendor's catalog, priced as an hourly rate
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Service {
    pub id: ServiceId,
    pub owner_id: UserId,

    pub name: String,
    pub description: String,
    pub rate: Decimal,

    pub images: Vec<BlobId>,
    pub videos: Vec<BlobId>,

    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Input for creating a new service
#[derive(Debug, Clone)]
pub struct CreateService {
    pub owner_id: UserId,
    pub name: String,
    pub description: String,
    pub rate: Decimal,
    pub images: Vec<BlobId>,
    pub videos: Vec<BlobId>,
}

/// Input for updating a service (partial; attachments are set at creation)
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateService {
    pub name: Option<String>,
    pub description: Option<String>,
    pub rate: Option<Decimal>,
}

impl OwnedRecord for Service {
    type Key = ServiceId;
    type New = CreateService;
    type Patch = UpdateService;

    fn key(&self) -> ServiceId {
        self.id
    }

    fn owner_id(&self) -> UserId {
        self.owner_id
    }

    fn from_new(new: CreateService) -> Self {
        let now = Utc::now();
        Self {
            id: ServiceId::new(),
            owner_id: new.owner_id,
            name: new.name,
            description: new.description,
            rate: new.rate,
            images: new.images,
            videos: new.videos,
            created_at: now,
            updated_at: now,
        }
    }

    fn apply_patch(&mut self, patch: &UpdateService) -> bool {
        let mut changed = false;
        if let Some(name) = &patch.name {
            if *name != self.name {
                self.name = name.clone();
                changed = true;
            }
        }
        if let Some(description) = &patch.description {
            if *description != self.description {
                self.description = description.clone();
                changed = true;
            }
        }
        if let Some(rate) = patch.rate {
            if rate != self.rate {
                self.rate = rate;
                changed = true;
            }
        }
        if changed {
            self.updated_at = Utc::now();
        }
        changed
    }
}

impl Service {
    /// Create a new service
    pub async fn create(input: CreateService, pool: &PgPool) -> Result<Self> {
        sqlx::query_as::<_, Self>(
            "INSERT INTO services (id, owner_id, name, description, rate, images, videos)
             VALUES ($1, $2, $3, $4, $5, $6, $7)
             RETURNING *",
        )
        .bind(ServiceId::new())
        .bind(input.owner_id)
        .bind(&input.name)
        .bind(&input.description)
        .bind(input.rate)
        .bind(&input.images)
        .bind(&input.videos)
        .fetch_one(pool)
        .await
        .map_err(Into::into)
    }

    /// List all services owned by a user
    pub async fn list_by_owner(owner_id: UserId, pool: &PgPool) -> Result<Vec<Self>> {
        sqlx::query_as::<_, Self>(
            "SELECT * FROM services WHERE owner_id = $1 ORDER BY created_at DESC",
        )
        .bind(owner_id)
        .fetch_all(pool)
        .await
        .map_err(Into::into)
    }

    /// Find a service by id, scoped to its owner.
    pub async fn find_owned(id: ServiceId, owner_id: UserId, pool: &PgPool) -> Result<Option<Self>> {
        sqlx::query_as::<_, Self>("SELECT * FROM services WHERE id = $1 AND owner_id = $2")
            .bind(id)
            .bind(owner_id)
            .fetch_optional(pool)
            .await
            .map_err(Into::into)
    }

    /// Apply a partial update, scoped to the owner.
    ///
    /// Returns None when zero rows were modified (missing, foreign, or no-op).
    pub async fn update_owned(
        id: ServiceId,
        owner_id: UserId,
        input: &UpdateService,
        pool: &PgPool,
    ) -> Result<Option<Self>> {
        sqlx::query_as::<_, Self>(
            "UPDATE services SET
                name = COALESCE($3, name),
                description = COALESCE($4, description),
                rate = COALESCE($5, rate),
                updated_at = NOW()
             WHERE id = $1 AND owner_id = $2
               AND (name, description, rate) IS DISTINCT FROM
                   (COALESCE($3, name), COALESCE($4, description), COALESCE($5, rate))
             RETURNING *",
        )
        .bind(id)
        .bind(owner_id)
        .bind(&input.name)
        .bind(&input.description)
        .bind(input.rate)
        .fetch_optional(pool)
        .await
        .map_err(Into::into)
    }

    /// Delete a service, scoped to the owner. Returns whether a row was deleted.
    pub async fn delete_owned(id: ServiceId, owner_id: UserId, pool: &PgPool) -> Result<bool> {
        let result = sqlx::query("DELETE FROM services WHERE id = $1 AND owner_id = $2")
            .bind(id)
            .bind(owner_id)
            .execute(pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
