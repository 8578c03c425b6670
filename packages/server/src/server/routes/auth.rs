//! Signup and login endpoints.
//!
//! All four endpoints are public. Phone numbers are validated at this
//! boundary; the actions behind it assume E.164 input.

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use serde::{Deserialize, Serialize};

use crate::common::is_valid_phone_number;
use crate::domains::auth::actions::{
    begin_login, begin_signup, confirm_login, confirm_signup, BeginLoginResult, BeginSignupResult,
    ConfirmLoginResult, ConfirmSignupResult,
};
use crate::domains::users::data::UserData;
use crate::kernel::OtpChannel;
use crate::server::app::AxumAppState;
use crate::server::error::ApiError;
use crate::server::routes::MessageResponse;

#[derive(Debug, Deserialize)]
pub struct SignupRequest {
    pub phone_number: String,
    pub username: String,
}

#[derive(Debug, Deserialize)]
pub struct VerifySignupRequest {
    pub phone_number: String,
    pub code: String,
}

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub phone_number: String,
}

#[derive(Debug, Deserialize)]
pub struct VerifyLoginRequest {
    pub phone_number: String,
    pub code: String,
}

#[derive(Debug, Serialize)]
pub struct SignupConfirmedResponse {
    pub message: String,
    pub user: UserData,
}

#[derive(Debug, Serialize)]
pub struct LoginConfirmedResponse {
    pub message: String,
    pub token: String,
    pub user: UserData,
}

fn validate_phone(phone_number: &str) -> Result<(), ApiError> {
    if is_valid_phone_number(phone_number) {
        Ok(())
    } else {
        Err(ApiError::BadRequest(
            "Invalid phone number: expected E.164 format".to_string(),
        ))
    }
}

/// POST /signup - begin phone verification for a new account
pub async fn signup_handler(
    State(state): State<AxumAppState>,
    Json(payload): Json<SignupRequest>,
) -> Result<Json<MessageResponse>, ApiError> {
    validate_phone(&payload.phone_number)?;
    if payload.username.trim().is_empty() {
        return Err(ApiError::BadRequest("Username must not be empty".to_string()));
    }

    let outcome = begin_signup(
        &payload.phone_number,
        payload.username.trim(),
        OtpChannel::Sms,
        &state.server_deps,
    )
    .await?;

    match outcome {
        BeginSignupResult::CodeSent => Ok(Json(MessageResponse {
            message: "OTP sent for signup".to_string(),
        })),
        BeginSignupResult::CodeResent => Ok(Json(MessageResponse {
            message: "OTP re-sent for signup".to_string(),
        })),
        BeginSignupResult::AlreadyVerified => Err(ApiError::Conflict(
            "You have already signed up and are verified".to_string(),
        )),
    }
}

/// POST /verify-signup - confirm the signup code, mark the account verified
pub async fn verify_signup_handler(
    State(state): State<AxumAppState>,
    Json(payload): Json<VerifySignupRequest>,
) -> Result<Json<SignupConfirmedResponse>, ApiError> {
    validate_phone(&payload.phone_number)?;

    let outcome = confirm_signup(&payload.phone_number, &payload.code, &state.server_deps).await?;

    match outcome {
        ConfirmSignupResult::Verified(user) => Ok(Json(SignupConfirmedResponse {
            message: "Signup successful".to_string(),
            user: UserData::from(user),
        })),
        ConfirmSignupResult::NotPending => Err(ApiError::Conflict(
            "No pending signup exists for this phone number".to_string(),
        )),
        ConfirmSignupResult::Rejected { verdict } => Err(ApiError::BadRequest(format!(
            "Verification rejected: {}",
            verdict
        ))),
    }
}

/// POST /login - begin phone verification for an existing account
pub async fn login_handler(
    State(state): State<AxumAppState>,
    Json(payload): Json<LoginRequest>,
) -> Result<Json<MessageResponse>, ApiError> {
    validate_phone(&payload.phone_number)?;

    let outcome = begin_login(&payload.phone_number, OtpChannel::Sms, &state.server_deps).await?;

    match outcome {
        BeginLoginResult::CodeSent => Ok(Json(MessageResponse {
            message: "OTP sent for login".to_string(),
        })),
        BeginLoginResult::NotRegistered => Err(ApiError::NotFound(
            "No verified account exists for this phone number".to_string(),
        )),
    }
}

/// POST /verify-login - confirm the login code, issue a session token
pub async fn verify_login_handler(
    State(state): State<AxumAppState>,
    Json(payload): Json<VerifyLoginRequest>,
) -> Result<(StatusCode, Json<LoginConfirmedResponse>), ApiError> {
    validate_phone(&payload.phone_number)?;

    let outcome = confirm_login(&payload.phone_number, &payload.code, &state.server_deps).await?;

    match outcome {
        ConfirmLoginResult::LoggedIn { user, token } => Ok((
            StatusCode::OK,
            Json(LoginConfirmedResponse {
                message: "Login successful".to_string(),
                token,
                user: UserData::from(user),
            }),
        )),
        ConfirmLoginResult::NotRegistered => Err(ApiError::NotFound(
            "No verified account exists for this phone number".to_string(),
        )),
        ConfirmLoginResult::Rejected { verdict } => Err(ApiError::BadRequest(format!(
            "Verification rejected: {}",
            verdict
        ))),
    }
}
