//! Ownership guard - resolves and authorizes the calling user.
//!
//! The canonical authorization fact is "a verified user row exists for this
//! phone number right now". It is re-derived on every authenticated request
//! rather than cached in the token, so revoking verification revokes access
//! on the next request without token revocation machinery.

use super::errors::AuthError;
use crate::common::UserId;
use crate::domains::users::models::User;
use crate::kernel::BaseUserStore;

/// Resolve the verified user row for a token's phone number.
///
/// Fails with `CallerNotVerified` when no row exists or the row has not
/// completed verification.
pub async fn resolve_caller(
    phone_number: &str,
    users: &dyn BaseUserStore,
) -> Result<User, AuthError> {
    match users.find_by_phone(phone_number).await? {
        Some(user) if user.is_verified() => Ok(user),
        _ => Err(AuthError::CallerNotVerified),
    }
}

/// Fetch a user profile, allowing access only to the caller's own row.
///
/// The requested id must equal the caller's id AND the stored row's phone
/// number must match the phone number the caller verified with.
pub async fn fetch_own_profile(
    requested_id: UserId,
    caller_id: UserId,
    caller_phone: &str,
    users: &dyn BaseUserStore,
) -> Result<User, AuthError> {
    if requested_id != caller_id {
        return Err(AuthError::PermissionDenied(
            "profile access is limited to your own account".to_string(),
        ));
    }

    let user = users.find_by_id(requested_id).await?.ok_or_else(|| {
        AuthError::PermissionDenied("profile access is limited to your own account".to_string())
    })?;

    if user.phone_number != caller_phone {
        return Err(AuthError::PermissionDenied(
            "profile access is limited to your own account".to_string(),
        ));
    }

    Ok(user)
}
