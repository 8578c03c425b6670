use axum::extract::{Request, State};
use axum::middleware::Next;
use axum::response::Response;
use tracing::debug;

use crate::common::auth::resolve_caller;
use crate::common::{AuthError, UserId};
use crate::domains::auth::{Claims, JwtService};
use crate::server::app::AxumAppState;
use crate::server::error::ApiError;

/// Authenticated caller information, derived from the JWT on every request
#[derive(Clone, Debug)]
pub struct AuthUser {
    pub user_id: UserId,
    pub phone_number: String,
}

/// JWT authentication middleware for protected routes.
///
/// A missing Authorization header answers 401. A token that fails
/// verification, or a phone number with no verified account behind it,
/// answers 403. The account lookup runs on every request, so revoking a
/// user's verified status locks them out without any token bookkeeping.
pub async fn require_auth(
    State(state): State<AxumAppState>,
    mut request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let claims = extract_claims(&request, &state.jwt_service)?;
    let caller = resolve_caller(&claims.sub, state.server_deps.users.as_ref()).await?;

    debug!("Authenticated caller: {}", caller.id);
    request.extensions_mut().insert(AuthUser {
        user_id: caller.id,
        phone_number: caller.phone_number,
    });

    Ok(next.run(request).await)
}

/// Extract and verify the JWT from a request
fn extract_claims(request: &Request, jwt_service: &JwtService) -> Result<Claims, AuthError> {
    let auth_header = request
        .headers()
        .get("authorization")
        .ok_or(AuthError::AuthenticationRequired)?;

    let auth_str = auth_header.to_str().map_err(|_| AuthError::InvalidToken)?;

    // Handle both "Bearer <token>" and a raw token
    let token = auth_str.strip_prefix("Bearer ").unwrap_or(auth_str);

    jwt_service
        .verify_token(token)
        .map_err(|_| AuthError::InvalidToken)
}
