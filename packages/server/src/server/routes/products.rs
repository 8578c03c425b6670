//! Product catalog endpoints, owner-scoped.
//!
//! Every query is keyed on the caller's user id, so a product owned by
//! someone else answers exactly like a product that does not exist.

use axum::extract::{Extension, Multipart, Path, State};
use axum::http::StatusCode;
use axum::Json;

use crate::common::ProductId;
use crate::domains::catalog::data::ProductData;
use crate::domains::catalog::models::{CreateProduct, UpdateProduct};
use crate::domains::uploads::store_batch;
use crate::server::app::AxumAppState;
use crate::server::error::ApiError;
use crate::server::middleware::AuthUser;
use crate::server::routes::multipart::read_catalog_form;
use crate::server::routes::MessageResponse;

/// POST /vendor/products - create a product with optional attachments
///
/// Attachments are stored first; a record insert that fails afterwards
/// leaves them in the blob store unreferenced.
pub async fn create_product_handler(
    State(state): State<AxumAppState>,
    Extension(auth): Extension<AuthUser>,
    multipart: Multipart,
) -> Result<(StatusCode, Json<ProductData>), ApiError> {
    let form = read_catalog_form(multipart).await?;

    let name = form.require("name")?.to_string();
    let description = form.require("description")?.to_string();
    let price = form.require_decimal("price")?;

    let stored = store_batch(form.files, auth.user_id, &state.server_deps).await?;

    let product = state
        .server_deps
        .products
        .insert(CreateProduct {
            owner_id: auth.user_id,
            name,
            description,
            price,
            images: stored.images,
            videos: stored.videos,
        })
        .await?;

    Ok((StatusCode::CREATED, Json(ProductData::from(product))))
}

/// GET /vendor/products - list the caller's products
pub async fn list_products_handler(
    State(state): State<AxumAppState>,
    Extension(auth): Extension<AuthUser>,
) -> Result<Json<Vec<ProductData>>, ApiError> {
    let products = state.server_deps.products.list_by_owner(auth.user_id).await?;

    Ok(Json(products.into_iter().map(ProductData::from).collect()))
}

/// GET /vendor/products/:id - fetch one owned product
pub async fn get_product_handler(
    State(state): State<AxumAppState>,
    Extension(auth): Extension<AuthUser>,
    Path(id): Path<ProductId>,
) -> Result<Json<ProductData>, ApiError> {
    let product = state
        .server_deps
        .products
        .find_owned(id, auth.user_id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Product not found".to_string()))?;

    Ok(Json(ProductData::from(product)))
}

/// PUT /vendor/products/:id - partial update of an owned product
///
/// Omitted fields are preserved. A write that modifies zero rows, including
/// a patch identical to the stored values, is reported as a failed update.
pub async fn update_product_handler(
    State(state): State<AxumAppState>,
    Extension(auth): Extension<AuthUser>,
    Path(id): Path<ProductId>,
    Json(patch): Json<UpdateProduct>,
) -> Result<Json<ProductData>, ApiError> {
    if state
        .server_deps
        .products
        .find_owned(id, auth.user_id)
        .await?
        .is_none()
    {
        return Err(ApiError::NotFound("Product not found".to_string()));
    }

    let updated = state
        .server_deps
        .products
        .update_owned(id, auth.user_id, patch)
        .await?
        .ok_or_else(|| ApiError::BadRequest("Update failed".to_string()))?;

    Ok(Json(ProductData::from(updated)))
}

/// DELETE /vendor/products/:id - delete an owned product
///
/// Attachment handles referenced by the record stay in the blob store.
pub async fn delete_product_handler(
    State(state): State<AxumAppState>,
    Extension(auth): Extension<AuthUser>,
    Path(id): Path<ProductId>,
) -> Result<Json<MessageResponse>, ApiError> {
    let deleted = state
        .server_deps
        .products
        .delete_owned(id, auth.user_id)
        .await?;

    if !deleted {
        return Err(ApiError::NotFound("Product not found".to_string()));
    }

    Ok(Json(MessageResponse {
        message: "Product deleted".to_string(),
    }))
}
