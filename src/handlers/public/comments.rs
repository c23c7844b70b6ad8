use axum::{extract::State, Json};

use crate::api::schemas::{CommentRead, Pagination};
use crate::api::{ApiPath, ApiQuery};
use crate::error::ApiResult;
use crate::services::CommentService;
use crate::state::AppState;

/// GET /comments
pub async fn list(
    State(state): State<AppState>,
    ApiQuery(query): ApiQuery<Pagination>,
) -> ApiResult<Json<Vec<CommentRead>>> {
    let mut session = state.store.begin().await?;
    let comments = CommentService::new(session.as_mut())
        .list(query.page(&state.pagination))
        .await?;
    session.commit().await?;

    Ok(Json(comments.into_iter().map(CommentRead::from).collect()))
}

/// GET /comments/:id
pub async fn get(State(state): State<AppState>, ApiPath(id): ApiPath<i32>) -> ApiResult<Json<CommentRead>> {
    let mut session = state.store.begin().await?;
    let comment = CommentService::new(session.as_mut()).get(id).await?;
    session.commit().await?;

    Ok(Json(comment.into()))
}
