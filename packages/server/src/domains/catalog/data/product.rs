use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::common::{BlobId, ProductId, UserId};
use crate::domains::catalog::models::product::Product as ProductModel;

/// Public API representation of a product (for JSON responses)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProductData {
    pub id: ProductId,
    pub owner_id: UserId,
    pub name: String,
    pub description: String,
    pub price: Decimal,
    /// Image attachment handles, streamable via GET /image/:file_id
    pub images: Vec<BlobId>,
    /// Video attachment handles, streamable via GET /video/:file_id
    pub videos: Vec<BlobId>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<ProductModel> for ProductData {
    fn from(product: ProductModel) -> Self {
        Self {
            id: product.id,
            owner_id: product.owner_id,
            name: product.name,
            description: product.description,
            price: product.price,
            images: product.images,
            videos: product.videos,
            created_at: product.created_at,
            updated_at: product.updated_at,
        }
    }
}
