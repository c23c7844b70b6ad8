use axum::{extract::State, http::StatusCode, Extension, Json};

use crate::api::schemas::{CommentCreate, CommentRead, CommentUpdate};
use crate::api::{ApiJson, ApiPath};
use crate::auth::Identity;
use crate::error::ApiResult;
use crate::services::CommentService;
use crate::state::AppState;

/// POST /comments - author is always the caller
pub async fn create(
    State(state): State<AppState>,
    Extension(identity): Extension<Identity>,
    ApiJson(body): ApiJson<CommentCreate>,
) -> ApiResult<(StatusCode, Json<CommentRead>)> {
    let mut session = state.store.begin().await?;
    let comment = CommentService::new(session.as_mut())
        .create(body.into(), &identity)
        .await?;
    session.commit().await?;

    Ok((StatusCode::CREATED, Json(comment.into())))
}

/// PUT /comments/:id - owner only
pub async fn update(
    State(state): State<AppState>,
    Extension(identity): Extension<Identity>,
    ApiPath(id): ApiPath<i32>,
    ApiJson(body): ApiJson<CommentUpdate>,
) -> ApiResult<Json<CommentRead>> {
    let mut session = state.store.begin().await?;
    let comment = CommentService::new(session.as_mut())
        .update(id, body.text, &identity)
        .await?;
    session.commit().await?;

    Ok(Json(comment.into()))
}

/// DELETE /comments/:id - owner only
pub async fn delete(
    State(state): State<AppState>,
    Extension(identity): Extension<Identity>,
    ApiPath(id): ApiPath<i32>,
) -> ApiResult<StatusCode> {
    let mut session = state.store.begin().await?;
    CommentService::new(session.as_mut()).delete(id, &identity).await?;
    session.commit().await?;

    Ok(StatusCode::OK)
}
