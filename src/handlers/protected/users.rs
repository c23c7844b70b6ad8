use axum::{extract::State, Extension, Json};

use crate::api::schemas::UserRead;
use crate::auth::Identity;
use crate::error::ApiResult;
use crate::services::UserService;
use crate::state::AppState;

/// GET /users/me - the caller's own record
pub async fn me(
    State(state): State<AppState>,
    Extension(identity): Extension<Identity>,
) -> ApiResult<Json<UserRead>> {
    let mut session = state.store.begin().await?;
    let user = UserService::new(session.as_mut()).me(&identity).await?;
    session.commit().await?;

    Ok(Json(user.into()))
}
