use anyhow::Result;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::PgPool;

use super::OwnedRecord;
use crate::common::{BlobId, ProductId, UserId};

/// Product model - a sellable item in a vendor's catalog
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Product {
    pub id: ProductId,
    pub owner_id: UserId,

    pub name: String,
    pub description: String,
    pub price: Decimal,

    // Attachment handles (references into the blob store, never bytes)
    pub images: Vec<BlobId>,
    pub videos: Vec<BlobId>,

    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Input for creating a new product
#[derive(Debug, Clone)]
pub struct CreateProduct {
    pub owner_id: UserId,
    pub name: String,
    pub description: String,
    pub price: Decimal,
    pub images: Vec<BlobId>,
    pub videos: Vec<BlobId>,
}

/// Input for updating a product (partial; attachments are set at creation)
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateProduct {
    pub name: Option<String>,
    pub description: Option<String>,
    pub price: Option<Decimal>,
}

impl OwnedRecord for Product {
    type Key = ProductId;
    type New = CreateProduct;
    type Patch = UpdateProduct;

    fn key(&self) -> ProductId {
        self.id
    }

    fn owner_id(&self) -> UserId {
        self.owner_id
    }

    fn from_new(new: CreateProduct) -> Self {
        let now = Utc::now();
        Self {
            id: ProductId::new(),
            owner_id: new.owner_id,
            name: new.name,
            description: new.description,
            price: new.price,
            images: new.images,
            videos: new.videos,
            created_at: now,
            updated_at: now,
        }
    }

    fn apply_patch(&mut self, patch: &UpdateProduct) -> bool {
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
        if let Some(price) = patch.price {
            if price != self.price {
                self.price = price;
                changed = true;
            }
        }
        if changed {
            self.updated_at = Utc::now();
        }
        changed
    }
}

impl Product {
    /// Create a new product
    pub async fn create(input: CreateProduct, pool: &PgPool) -> Result<Self> {
        sqlx::query_as::<_, Self>(
            "INSERT INTO products (id, owner_id, name, description, price, images, videos)
             VALUES ($1, $2, $3, $4, $5, $6, $7)
             RETURNING *",
        )
        .bind(ProductId::new())
        .bind(input.owner_id)
        .bind(&input.name)
        .bind(&input.description)
        .bind(input.price)
        .bind(&input.images)
        .bind(&input.videos)
        .fetch_one(pool)
        .await
        .map_err(Into::into)
    }

    /// List all products owned by a user
    pub async fn list_by_owner(owner_id: UserId, pool: &PgPool) -> Result<Vec<Self>> {
        sqlx::query_as::<_, Self>(
            "SELECT * FROM products WHERE owner_id = $1 ORDER BY created_at DESC",
        )
        .bind(owner_id)
        .fetch_all(pool)
        .await
        .map_err(Into::into)
    }

    /// Find a product by id, scoped to its owner.
    ///
    /// A record owned by someone else is indistinguishable from a missing
    /// record: both return None.
    pub async fn find_owned(id: ProductId, owner_id: UserId, pool: &PgPool) -> Result<Option<Self>> {
        sqlx::query_as::<_, Self>("SELECT * FROM products WHERE id = $1 AND owner_id = $2")
            .bind(id)
            .bind(owner_id)
            .fetch_optional(pool)
            .await
            .map_err(Into::into)
    }

    /// Apply a partial update, scoped to the owner.
    ///
    /// Returns None when zero rows were modified. The row-value predicate
    /// makes an update whose supplied fields all match the stored values
    /// count as zero rows, so a no-op patch is reported as a failed update.
    pub async fn update_owned(
        id: ProductId,
        owner_id: UserId,
        input: &UpdateProduct,
        pool: &PgPool,
    ) -> Result<Option<Self>> {
        sqlx::query_as::<_, Self>(
            "UPDATE products SET
                name = COALESCE($3, name),
                description = COALESCE($4, description),
                price = COALESCE($5, price),
                updated_at = NOW()
             WHERE id = $1 AND owner_id = $2
               AND (name, description, price) IS DISTINCT FROM
                   (COALESCE($3, name), COALESCE($4, description), COALESCE($5, price))
             RETURNING *",
        )
        .bind(id)
        .bind(owner_id)
        .bind(&input.name)
        .bind(&input.description)
        .bind(input.price)
        .fetch_optional(pool)
        .await
        .map_err(Into::into)
    }

    /// Delete a product, scoped to the owner. Returns whether a row was deleted.
    ///
    /// Referenced attachment handles are left in the blob store.
    pub async fn delete_owned(id: ProductId, owner_id: UserId, pool: &PgPool) -> Result<bool> {
        let result = sqlx::query("DELETE FROM products WHERE id = $1 AND owner_id = $2")
            .bind(id)
            .bind(owner_id)
            .execute(pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_product() -> Product {
        Product::from_new(CreateProduct {
            owner_id: UserId::new(),
            name: "Hand-carved bowl".to_string(),
            description: "Olive wood, 20cm".to_string(),
            price: Decimal::new(2499, 2),
            images: vec![BlobId::new()],
            videos: vec![],
        })
    }

    #[test]
    fn test_apply_patch_merges_only_supplied_fields() {
        let mut product = sample_product();
        let original_description = product.description.clone();
        let original_price = product.price;

        let changed = product.apply_patch(&UpdateProduct {
            name: Some("Hand-carved salad bowl".to_string()),
            ..Default::default()
        });

        assert!(changed);
        assert_eq!(product.name, "Hand-carved salad bowl");
        assert_eq!(product.description, original_description);
        assert_eq!(product.price, original_price);
    }

    #[test]
    fn test_apply_patch_reports_no_op() {
        let mut product = sample_product();
        let changed = product.apply_patch(&UpdateProduct {
            name: Some(product.name.clone()),
            price: Some(product.price),
            ..Default::default()
        });
        assert!(!changed);
    }

    #[test]
    fn test_apply_patch_empty_patch_is_no_op() {
        let mut product = sample_product();
        assert!(!product.apply_patch(&UpdateProduct::default()));
    }
}
