//! Integration tests for the vendor catalog.
//!
//! Covers the protected endpoints:
//! - POST/GET /vendor/products and /vendor/products/:id
//! - POST/GET /vendor/services and /vendor/services/:id
//! All reads and writes are scoped to the record owner.

mod common;

use axum::http::StatusCode;
use common::*;
use serde_json::json;

const VENDOR_A: &str = "+15555550101";
const VENDOR_B: &str = "+15555550102";

/// Multipart form for a product with no attachments.
fn product_form(name: &str, price: &str) -> MultipartBuilder {
    MultipartBuilder::new()
        .text("name", name)
        .text("description", "Handmade to order")
        .text("price", price)
}

/// Multipart form for a service with no attachments.
fn service_form(name: &str, rate: &str) -> MultipartBuilder {
    MultipartBuilder::new()
        .text("name", name)
        .text("description", "Available weekdays")
        .text("rate", rate)
}

// ============================================================================
// Products
// ============================================================================

#[tokio::test]
async fn test_create_product_returns_record() {
    let app = TestApp::new();
    let (user_id, token) = seed_verified_vendor(&app, VENDOR_A, "asha").await.unwrap();

    let response = app
        .post_multipart("/vendor/products", &token, product_form("Woven basket", "19.99"))
        .await;
    assert_eq!(response.status(), StatusCode::CREATED);

    let body = response_json(response).await;
    assert_eq!(body["name"], "Woven basket");
    assert_eq!(body["description"], "Handmade to order");
    assert_eq!(body["price"], "19.99");
    assert_eq!(body["owner_id"], user_id.to_string());
    assert!(body["images"].as_array().unwrap().is_empty());
    assert!(body["videos"].as_array().unwrap().is_empty());

    assert_eq!(app.deps.products.record_count(), 1);
}

#[tokio::test]
async fn test_create_product_validates_fields() {
    let app = TestApp::new();
    let (_, token) = seed_verified_vendor(&app, VENDOR_A, "asha").await.unwrap();

    // Missing price
    let form = MultipartBuilder::new()
        .text("name", "Woven basket")
        .text("description", "Handmade to order");
    let response = app.post_multipart("/vendor/products", &token, form).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = response_json(response).await;
    assert_eq!(body["message"], "Missing required field: price");

    // Unparseable price
    let response = app
        .post_multipart("/vendor/products", &token, product_form("Woven basket", "cheap"))
        .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = response_json(response).await;
    assert_eq!(body["message"], "Invalid value for field: price");

    assert_eq!(app.deps.products.record_count(), 0);
}

#[tokio::test]
async fn test_product_listing_is_scoped_to_owner() {
    let app = TestApp::new();
    let (_, token_a) = seed_verified_vendor(&app, VENDOR_A, "asha").await.unwrap();
    let (_, token_b) = seed_verified_vendor(&app, VENDOR_B, "brian").await.unwrap();

    app.post_multipart("/vendor/products", &token_a, product_form("Basket", "19.99"))
        .await;
    app.post_multipart("/vendor/products", &token_a, product_form("Bowl", "24.99"))
        .await;
    app.post_multipart("/vendor/products", &token_b, product_form("Vase", "39.99"))
        .await;

    let response = app.get_auth("/vendor/products", &token_a).await;
    assert_eq!(response.status(), StatusCode::OK);
    let body = response_json(response).await;
    assert_eq!(body.as_array().unwrap().len(), 2);

    let response = app.get_auth("/vendor/products", &token_b).await;
    let body = response_json(response).await;
    assert_eq!(body.as_array().unwrap().len(), 1);
    assert_eq!(body[0]["name"], "Vase");
}

#[tokio::test]
async fn test_empty_product_listing_is_ok() {
    let app = TestApp::new();
    let (_, token) = seed_verified_vendor(&app, VENDOR_A, "asha").await.unwrap();

    let response = app.get_auth("/vendor/products", &token).await;
    assert_eq!(response.status(), StatusCode::OK);

    let body = response_json(response).await;
    assert_eq!(body, json!([]));
}

#[tokio::test]
async fn test_get_product_is_scoped_to_owner() {
    let app = TestApp::new();
    let (_, token_a) = seed_verified_vendor(&app, VENDOR_A, "asha").await.unwrap();
    let (_, token_b) = seed_verified_vendor(&app, VENDOR_B, "brian").await.unwrap();

    let response = app
        .post_multipart("/vendor/products", &token_a, product_form("Basket", "19.99"))
        .await;
    let body = response_json(response).await;
    let id = body["id"].as_str().unwrap().to_string();

    let response = app.get_auth(&format!("/vendor/products/{}", id), &token_a).await;
    assert_eq!(response.status(), StatusCode::OK);

    // Someone else's record answers exactly like a missing one
    let response = app.get_auth(&format!("/vendor/products/{}", id), &token_b).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let body = response_json(response).await;
    assert_eq!(body["message"], "Product not found");
}

#[tokio::test]
async fn test_update_product_merges_partial_patch() {
    let app = TestApp::new();
    let (_, token) = seed_verified_vendor(&app, VENDOR_A, "asha").await.unwrap();

    let response = app
        .post_multipart("/vendor/products", &token, product_form("Basket", "19.99"))
        .await;
    let body = response_json(response).await;
    let id = body["id"].as_str().unwrap().to_string();

    let response = app
        .put_json(
            &format!("/vendor/products/{}", id),
            &token,
            json!({ "price": "24.99" }),
        )
        .await;
    assert_eq!(response.status(), StatusCode::OK);

    // Omitted fields keep their stored values
    let body = response_json(response).await;
    assert_eq!(body["name"], "Basket");
    assert_eq!(body["description"], "Handmade to order");
    assert_eq!(body["price"], "24.99");
}

#[tokio::test]
async fn test_update_that_changes_nothing_fails() {
    let app = TestApp::new();
    let (_, token) = seed_verified_vendor(&app, VENDOR_A, "asha").await.unwrap();

    let response = app
        .post_multipart("/vendor/products", &token, product_form("Basket", "19.99"))
        .await;
    let body = response_json(response).await;
    let id = body["id"].as_str().unwrap().to_string();

    // Empty patch
    let response = app
        .put_json(&format!("/vendor/products/{}", id), &token, json!({}))
        .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = response_json(response).await;
    assert_eq!(body["message"], "Update failed");

    // Patch identical to the stored values
    let response = app
        .put_json(
            &format!("/vendor/products/{}", id),
            &token,
            json!({ "name": "Basket", "price": "19.99" }),
        )
        .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_foreign_update_leaves_record_intact() {
    let app = TestApp::new();
    let (_, token_a) = seed_verified_vendor(&app, VENDOR_A, "asha").await.unwrap();
    let (_, token_b) = seed_verified_vendor(&app, VENDOR_B, "brian").await.unwrap();

    let response = app
        .post_multipart("/vendor/products", &token_a, product_form("Basket", "19.99"))
        .await;
    let body = response_json(response).await;
    let id = body["id"].as_str().unwrap().to_string();

    let response = app
        .put_json(
            &format!("/vendor/products/{}", id),
            &token_b,
            json!({ "name": "Hijacked" }),
        )
        .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let response = app.get_auth(&format!("/vendor/products/{}", id), &token_a).await;
    let body = response_json(response).await;
    assert_eq!(body["name"], "Basket");
}

#[tokio::test]
async fn test_delete_product_is_scoped_to_owner() {
    let app = TestApp::new();
    let (_, token_a) = seed_verified_vendor(&app, VENDOR_A, "asha").await.unwrap();
    let (_, token_b) = seed_verified_vendor(&app, VENDOR_B, "brian").await.unwrap();

    let response = app
        .post_multipart("/vendor/products", &token_a, product_form("Basket", "19.99"))
        .await;
    let body = response_json(response).await;
    let id = body["id"].as_str().unwrap().to_string();

    // A foreign delete removes nothing
    let response = app.delete(&format!("/vendor/products/{}", id), &token_b).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert_eq!(app.deps.products.record_count(), 1);

    let response = app.delete(&format!("/vendor/products/{}", id), &token_a).await;
    assert_eq!(response.status(), StatusCode::OK);
    let body = response_json(response).await;
    assert_eq!(body["message"], "Product deleted");

    let response = app.get_auth(&format!("/vendor/products/{}", id), &token_a).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert_eq!(app.deps.products.record_count(), 0);
}

// ============================================================================
// Services
// ============================================================================

#[tokio::test]
async fn test_create_service_returns_record() {
    let app = TestApp::new();
    let (user_id, token) = seed_verified_vendor(&app, VENDOR_A, "asha").await.unwrap();

    let response = app
        .post_multipart("/vendor/services", &token, service_form("Tailoring", "45.50"))
        .await;
    assert_eq!(response.status(), StatusCode::CREATED);

    let body = response_json(response).await;
    assert_eq!(body["name"], "Tailoring");
    assert_eq!(body["rate"], "45.50");
    assert_eq!(body["owner_id"], user_id.to_string());

    assert_eq!(app.deps.services.record_count(), 1);
}

#[tokio::test]
async fn test_create_service_requires_rate() {
    let app = TestApp::new();
    let (_, token) = seed_verified_vendor(&app, VENDOR_A, "asha").await.unwrap();

    let form = MultipartBuilder::new()
        .text("name", "Tailoring")
        .text("description", "Available weekdays");
    let response = app.post_multipart("/vendor/services", &token, form).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let body = response_json(response).await;
    assert_eq!(body["message"], "Missing required field: rate");
}

#[tokio::test]
async fn test_empty_service_listing_answers_not_found() {
    let app = TestApp::new();
    let (_, token) = seed_verified_vendor(&app, VENDOR_A, "asha").await.unwrap();

    let response = app.get_auth("/vendor/services", &token).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let body = response_json(response).await;
    assert_eq!(body["message"], "No services found");
}

#[tokio::test]
async fn test_service_listing_after_create() {
    let app = TestApp::new();
    let (_, token) = seed_verified_vendor(&app, VENDOR_A, "asha").await.unwrap();

    app.post_multipart("/vendor/services", &token, service_form("Tailoring", "45.50"))
        .await;

    let response = app.get_auth("/vendor/services", &token).await;
    assert_eq!(response.status(), StatusCode::OK);

    let body = response_json(response).await;
    assert_eq!(body.as_array().unwrap().len(), 1);
    assert_eq!(body[0]["name"], "Tailoring");
}

#[tokio::test]
async fn test_update_and_delete_service() {
    let app = TestApp::new();
    let (_, token) = seed_verified_vendor(&app, VENDOR_A, "asha").await.unwrap();

    let response = app
        .post_multipart("/vendor/services", &token, service_form("Tailoring", "45.50"))
        .await;
    let body = response_json(response).await;
    let id = body["id"].as_str().unwrap().to_string();

    let response = app
        .put_json(
            &format!("/vendor/services/{}", id),
            &token,
            json!({ "rate": "60.00" }),
        )
        .await;
    assert_eq!(response.status(), StatusCode::OK);
    let body = response_json(response).await;
    assert_eq!(body["rate"], "60.00");

    let response = app.delete(&format!("/vendor/services/{}", id), &token).await;
    assert_eq!(response.status(), StatusCode::OK);
    let body = response_json(response).await;
    assert_eq!(body["message"], "Service deleted");

    let response = app.get_auth(&format!("/vendor/services/{}", id), &token).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let body = response_json(response).await;
    assert_eq!(body["message"], "Service not found");
}
