//! User profile endpoint.

use axum::extract::{Extension, Path, State};
use axum::Json;

use crate::common::auth::fetch_own_profile;
use crate::common::UserId;
use crate::domains::users::data::UserData;
use crate::server::app::AxumAppState;
use crate::server::error::ApiError;
use crate::server::middleware::AuthUser;

/// GET /user/:id - fetch the caller's own profile
///
/// The path id must match the caller's stored id, and the row's phone
/// number must match the token's phone number. Any mismatch answers 403.
pub async fn get_user_handler(
    State(state): State<AxumAppState>,
    Extension(auth): Extension<AuthUser>,
    Path(id): Path<UserId>,
) -> Result<Json<UserData>, ApiError> {
    let user = fetch_own_profile(
        id,
        auth.user_id,
        &auth.phone_number,
        state.server_deps.users.as_ref(),
    )
    .await?;

    Ok(Json(UserData::from(user)))
}
