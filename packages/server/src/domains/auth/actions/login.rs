//! Login actions - phone verification for existing accounts

use anyhow::Result;
use tracing::{error, info};

use crate::domains::users::models::User;
use crate::kernel::{OtpChannel, OtpVerdict, ServerDeps};

/// Result of beginning a login
pub enum BeginLoginResult {
    CodeSent,
    /// No verified account exists for this phone
    NotRegistered,
}

/// Begin login for a phone number.
///
/// Only verified accounts may log in; a pending or missing account is
/// reported as `NotRegistered`.
pub async fn begin_login(
    phone_number: &str,
    channel: OtpChannel,
    deps: &ServerDeps,
) -> Result<BeginLoginResult> {
    match deps.users.find_by_phone(phone_number).await? {
        Some(user) if user.is_verified() => {}
        _ => {
            info!("Login attempt for unregistered phone: {}", phone_number);
            return Ok(BeginLoginResult::NotRegistered);
        }
    }

    deps.otp
        .send_code(phone_number, channel)
        .await
        .map_err(|e| {
            error!("Failed to send login code: {}", e);
            anyhow::anyhow!("Failed to send login code: {}", e)
        })?;

    info!("Login code sent to {}", phone_number);
    Ok(BeginLoginResult::CodeSent)
}

/// Result of confirming a login code
pub enum ConfirmLoginResult {
    LoggedIn { user: User, token: String },
    /// Account vanished or lost verified status between begin and confirm
    NotRegistered,
    /// The provider did not approve the code
    Rejected { verdict: OtpVerdict },
}

/// Confirm a login code and issue a session token.
///
/// The verified check is re-run after the code is approved; the token is
/// only minted for a phone that is verified at this moment.
pub async fn confirm_login(
    phone_number: &str,
    code: &str,
    deps: &ServerDeps,
) -> Result<ConfirmLoginResult> {
    let verdict = deps
        .otp
        .check_code(phone_number, code)
        .await
        .map_err(|e| {
            error!("Failed to check login code: {}", e);
            anyhow::anyhow!("Failed to check login code: {}", e)
        })?;

    if verdict != OtpVerdict::Approved {
        info!("Login code rejected for {}: {}", phone_number, verdict);
        return Ok(ConfirmLoginResult::Rejected { verdict });
    }

    let user = match deps.users.find_by_phone(phone_number).await? {
        Some(user) if user.is_verified() => user,
        _ => {
            info!("Login confirm for unregistered phone: {}", phone_number);
            return Ok(ConfirmLoginResult::NotRegistered);
        }
    };

    let token = deps.jwt_service.create_token(phone_number)?;

    info!("Login confirmed for {}", phone_number);
    Ok(ConfirmLoginResult::LoggedIn { user, token })
}
