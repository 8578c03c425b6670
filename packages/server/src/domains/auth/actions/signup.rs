//! Signup actions - phone verification for new accounts

use anyhow::Result;
use tracing::{error, info};

use crate::domains::users::models::{NewUser, User};
use crate::kernel::{OtpChannel, OtpVerdict, ServerDeps};

/// Result of beginning a signup
pub enum BeginSignupResult {
    /// First code dispatched; a pending account row now exists
    CodeSent,
    /// Phone is already mid-signup; a fresh code was dispatched
    CodeResent,
    /// Phone belongs to a verified account
    AlreadyVerified,
}

/// Begin signup for a phone number.
///
/// Dispatches a one-time code and upserts a `pending` account row. The
/// upsert is deduplicated on phone number, so concurrent signups for the
/// same phone converge on a single row.
pub async fn begin_signup(
    phone_number: &str,
    username: &str,
    channel: OtpChannel,
    deps: &ServerDeps,
) -> Result<BeginSignupResult> {
    let existing = deps.users.find_by_phone(phone_number).await?;

    if let Some(user) = &existing {
        if user.is_verified() {
            info!("Signup rejected, phone already verified: {}", phone_number);
            return Ok(BeginSignupResult::AlreadyVerified);
        }
    }

    deps.otp
        .send_code(phone_number, channel)
        .await
        .map_err(|e| {
            error!("Failed to send signup code: {}", e);
            anyhow::anyhow!("Failed to send signup code: {}", e)
        })?;

    if existing.is_some() {
        info!("Signup code re-sent to {}", phone_number);
        return Ok(BeginSignupResult::CodeResent);
    }

    deps.users
        .upsert_pending(NewUser {
            phone_number: phone_number.to_string(),
            username: username.to_string(),
        })
        .await?;

    info!("Signup code sent to {}", phone_number);
    Ok(BeginSignupResult::CodeSent)
}

/// Result of confirming a signup code
pub enum ConfirmSignupResult {
    /// The account completed the pending -> verified transition
    Verified(User),
    /// No pending row for this phone: never signed up, or a concurrent
    /// confirmation already verified it
    NotPending,
    /// The provider did not approve the code
    Rejected { verdict: OtpVerdict },
}

/// Confirm a signup code and mark the account verified.
///
/// The transition is scoped to `pending` rows, so under duplicate
/// confirmations only one call observes the flip; the others get
/// `NotPending`. No session token is issued here; a verified account still
/// logs in through the login flow.
pub async fn confirm_signup(
    phone_number: &str,
    code: &str,
    deps: &ServerDeps,
) -> Result<ConfirmSignupResult> {
    let verdict = deps
        .otp
        .check_code(phone_number, code)
        .await
        .map_err(|e| {
            error!("Failed to check signup code: {}", e);
            anyhow::anyhow!("Failed to check signup code: {}", e)
        })?;

    if verdict != OtpVerdict::Approved {
        info!("Signup code rejected for {}: {}", phone_number, verdict);
        return Ok(ConfirmSignupResult::Rejected { verdict });
    }

    match deps.users.mark_verified(phone_number).await? {
        Some(user) => {
            info!("Signup verified for {}", phone_number);
            Ok(ConfirmSignupResult::Verified(user))
        }
        None => {
            info!("Signup confirm found no pending row for {}", phone_number);
            Ok(ConfirmSignupResult::NotPending)
        }
    }
}
