use axum::{extract::State, http::StatusCode, Json};

use crate::api::schemas::{NewsCreate, NewsItemRead, NewsRead, NewsUpdate, Pagination};
use crate::api::{ApiJson, ApiPath, ApiQuery, Validate};
use crate::error::ApiResult;
use crate::services::NewsService;
use crate::state::AppState;

/// GET /news - abbreviated projection
pub async fn list(
    State(state): State<AppState>,
    ApiQuery(query): ApiQuery<Pagination>,
) -> ApiResult<Json<Vec<NewsRead>>> {
    let mut session = state.store.begin().await?;
    let news = NewsService::new(session.as_mut(), state.category_policy)
        .list(query.page(&state.pagination))
        .await?;
    session.commit().await?;

    Ok(Json(news.into_iter().map(NewsRead::from).collect()))
}

/// GET /news/:id
pub async fn get(State(state): State<AppState>, ApiPath(id): ApiPath<i32>) -> ApiResult<Json<NewsItemRead>> {
    let mut session = state.store.begin().await?;
    let news = NewsService::new(session.as_mut(), state.category_policy).get(id).await?;
    session.commit().await?;

    Ok(Json(news.into()))
}

/// POST /news
pub async fn create(
    State(state): State<AppState>,
    ApiJson(body): ApiJson<NewsCreate>,
) -> ApiResult<(StatusCode, Json<NewsItemRead>)> {
    body.validate()?;

    let mut session = state.store.begin().await?;
    let news = NewsService::new(session.as_mut(), state.category_policy)
        .create(body.into())
        .await?;
    session.commit().await?;

    Ok((StatusCode::CREATED, Json(news.into())))
}

/// PUT /news/:id - every field overwritten, absent category clears it
pub async fn replace(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<i32>,
    ApiJson(body): ApiJson<NewsCreate>,
) -> ApiResult<Json<NewsItemRead>> {
    body.validate()?;

    let mut session = state.store.begin().await?;
    let news = NewsService::new(session.as_mut(), state.category_policy)
        .replace(id, body.into())
        .await?;
    session.commit().await?;

    Ok(Json(news.into()))
}

/// PATCH /news/:id
pub async fn partial_replace(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<i32>,
    ApiJson(body): ApiJson<NewsUpdate>,
) -> ApiResult<Json<NewsItemRead>> {
    body.validate()?;

    let mut session = state.store.begin().await?;
    let news = NewsService::new(session.as_mut(), state.category_policy)
        .partial_replace(id, body.into())
        .await?;
    session.commit().await?;

    Ok(Json(news.into()))
}

/// DELETE /news/:id - comments go with it
pub async fn delete(State(state): State<AppState>, ApiPath(id): ApiPath<i32>) -> ApiResult<StatusCode> {
    let mut session = state.store.begin().await?;
    NewsService::new(session.as_mut(), state.category_policy).delete(id).await?;
    session.commit().await?;

    Ok(StatusCode::OK)
}
