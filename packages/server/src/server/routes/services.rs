//! Service catalog endpoints, owner-scoped.
//!
//! Mirrors the product endpoints with one historical quirk: listing zero
//! services answers 404 where products answer an empty list.

use axum::extract::{Extension, Multipart, Path, State};
use axum::http::StatusCode;
use axum::Json;

use crate::common::ServiceId;
use crate::domains::catalog::data::ServiceData;
use crate::domains::catalog::models::{CreateService, UpdateService};
use crate::domains::uploads::store_batch;
use crate::server::app::AxumAppState;
use crate::server::error::ApiError;
use crate::server::middleware::AuthUser;
use crate::server::routes::multipart::read_catalog_form;
use crate::server::routes::MessageResponse;

/// POST /vendor/services - create a service with optional attachments
pub async fn create_service_handler(
    State(state): State<AxumAppState>,
    Extension(auth): Extension<AuthUser>,
    multipart: Multipart,
) -> Result<(StatusCode, Json<ServiceData>), ApiError> {
    let form = read_catalog_form(multipart).await?;

    let name = form.require("name")?.to_string();
    let description = form.require("description")?.to_string();
    let rate = form.require_decimal("rate")?;

    let stored = store_batch(form.files, auth.user_id, &state.server_deps).await?;

    let service = state
        .server_deps
        .services
        .insert(CreateService {
            owner_id: auth.user_id,
            name,
            description,
            rate,
            images: stored.images,
            videos: stored.videos,
        })
        .await?;

    Ok((StatusCode::CREATED, Json(ServiceData::from(service))))
}

/// GET /vendor/services - list the caller's services
pub async fn list_services_handler(
    State(state): State<AxumAppState>,
    Extension(auth): Extension<AuthUser>,
) -> Result<Json<Vec<ServiceData>>, ApiError> {
    let services = state.server_deps.services.list_by_owner(auth.user_id).await?;

    if services.is_empty() {
        return Err(ApiError::NotFound("No services found".to_string()));
    }

    Ok(Json(services.into_iter().map(ServiceData::from).collect()))
}

/// GET /vendor/services/:id - fetch one owned service
pub async fn get_service_handler(
    State(state): State<AxumAppState>,
    Extension(auth): Extension<AuthUser>,
    Path(id): Path<ServiceId>,
) -> Result<Json<ServiceData>, ApiError> {
    let service = state
        .server_deps
        .services
        .find_owned(id, auth.user_id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Service not found".to_string()))?;

    Ok(Json(ServiceData::from(service)))
}

/// PUT /vendor/services/:id - partial update of an owned service
pub async fn update_service_handler(
    State(state): State<AxumAppState>,
    Extension(auth): Extension<AuthUser>,
    Path(id): Path<ServiceId>,
    Json(patch): Json<UpdateService>,
) -> Result<Json<ServiceData>, ApiError> {
    if state
        .server_deps
        .services
        .find_owned(id, auth.user_id)
        .await?
        .is_none()
    {
        return Err(ApiError::NotFound("Service not found".to_string()));
    }

    let updated = state
        .server_deps
        .services
        .update_owned(id, auth.user_id, patch)
        .await?
        .ok_or_else(|| ApiError::BadRequest("Update failed".to_string()))?;

    Ok(Json(ServiceData::from(updated)))
}

/// DELETE /vendor/services/:id - delete an owned service
pub async fn delete_service_handler(
    State(state): State<AxumAppState>,
    Extension(auth): Extension<AuthUser>,
    Path(id): Path<ServiceId>,
) -> Result<Json<MessageResponse>, ApiError> {
    let deleted = state
        .server_deps
        .services
        .delete_owned(id, auth.user_id)
        .await?;

    if !deleted {
        return Err(ApiError::NotFound("Service not found".to_string()));
    }

    Ok(Json(MessageResponse {
        message: "Service deleted".to_string(),
    }))
}
