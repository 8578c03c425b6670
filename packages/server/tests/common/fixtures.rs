//! Test fixtures for vendors and sessions.
//!
//! These fixtures call the store traits directly, so tests that are not
//! about the verification flow can skip straight to an authenticated state.

use anyhow::Result;
use axum::http::StatusCode;
use serde_json::json;

use server_core::common::UserId;
use server_core::domains::users::models::NewUser;
use server_core::kernel::BaseUserStore;

use super::harness::{response_json, TestApp};

/// The code the mock OTP service accepts by default.
pub const TEST_OTP_CODE: &str = "123456";

/// Create a verified user directly in the store and mint a session token.
pub async fn seed_verified_vendor(
    app: &TestApp,
    phone_number: &str,
    username: &str,
) -> Result<(UserId, String)> {
    let user = app
        .deps
        .users
        .upsert_pending(NewUser {
            phone_number: phone_number.to_string(),
            username: username.to_string(),
        })
        .await?;
    app.deps.users.mark_verified(phone_number).await?;

    let token = app.deps.jwt_service.create_token(phone_number)?;
    Ok((user.id, token))
}

/// Walk the full signup and login flow over HTTP, returning the session token.
pub async fn signup_and_login(app: &TestApp, phone_number: &str, username: &str) -> Result<String> {
    let response = app
        .post_json(
            "/signup",
            json!({ "phone_number": phone_number, "username": username }),
        )
        .await;
    assert_eq!(response.status(), StatusCode::OK);

    let response = app
        .post_json(
            "/verify-signup",
            json!({ "phone_number": phone_number, "code": TEST_OTP_CODE }),
        )
        .await;
    assert_eq!(response.status(), StatusCode::OK);

    let response = app
        .post_json("/login", json!({ "phone_number": phone_number }))
        .await;
    assert_eq!(response.status(), StatusCode::OK);

    let response = app
        .post_json(
            "/verify-login",
            json!({ "phone_number": phone_number, "code": TEST_OTP_CODE }),
        )
        .await;
    assert_eq!(response.status(), StatusCode::OK);

    let body = response_json(response).await;
    let token = body["token"]
        .as_str()
        .expect("login response carries a token")
        .to_string();

    Ok(token)
}
