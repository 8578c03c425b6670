use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::common::{BlobId, ServiceId, UserId};
use crate::domains::catalog::models::service::Service as ServiceModel;

/// Public API representation of a service (for JSON responses)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServiceData {
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

impl From<ServiceModel> for ServiceData {
    fn from(service: ServiceModel) -> Self {
        Self {
            id: service.id,
            owner_id: service.owner_id,
            name: service.name,
            description: service.description,
            rate: service.rate,
            images: service.images,
            videos: service.videos,
            created_at: service.created_at,
            updated_at: service.updated_at,
        }
    }
}
