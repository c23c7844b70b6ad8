use axum::{extract::State, http::StatusCode, Json};

use crate::api::schemas::{CategoryCreate, CategoryRead, CategoryUpdate, Pagination};
use crate::api::{ApiJson, ApiPath, ApiQuery, Validate};
use crate::error::ApiResult;
use crate::services::CategoryService;
use crate::state::AppState;

/// GET /categories
pub async fn list(
    State(state): State<AppState>,
    ApiQuery(query): ApiQuery<Pagination>,
) -> ApiResult<Json<Vec<CategoryRead>>> {
    let mut session = state.store.begin().await?;
    let categories = CategoryService::new(session.as_mut())
        .list(query.page(&state.pagination))
        .await?;
    session.commit().await?;

    Ok(Json(categories.into_iter().map(CategoryRead::from).collect()))
}

/// GET /categories/:id
pub async fn get(State(state): State<AppState>, ApiPath(id): ApiPath<i32>) -> ApiResult<Json<CategoryRead>> {
    let mut session = state.store.begin().await?;
    let category = CategoryService::new(session.as_mut()).get(id).await?;
    session.commit().await?;

    Ok(Json(category.into()))
}

/// POST /categories
pub async fn create(
    State(state): State<AppState>,
    ApiJson(body): ApiJson<CategoryCreate>,
) -> ApiResult<(StatusCode, Json<CategoryRead>)> {
    body.validate()?;

    let mut session = state.store.begin().await?;
    let category = CategoryService::new(session.as_mut()).create(body.into()).await?;
    session.commit().await?;

    Ok((StatusCode::CREATED, Json(category.into())))
}

/// PUT /categories/:id
pub async fn replace(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<i32>,
    ApiJson(body): ApiJson<CategoryCreate>,
) -> ApiResult<Json<CategoryRead>> {
    body.validate()?;

    let mut session = state.store.begin().await?;
    let category = CategoryService::new(session.as_mut()).replace(id, body.into()).await?;
    session.commit().await?;

    Ok(Json(category.into()))
}

/// PATCH /categories/:id
pub async fn partial_replace(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<i32>,
    ApiJson(body): ApiJson<CategoryUpdate>,
) -> ApiResult<Json<CategoryRead>> {
    body.validate()?;

    let mut session = state.store.begin().await?;
    let category = CategoryService::new(session.as_mut())
        .partial_replace(id, body.into())
        .await?;
    session.commit().await?;

    Ok(Json(category.into()))
}

/// DELETE /categories/:id
pub async fn delete(State(state): State<AppState>, ApiPath(id): ApiPath<i32>) -> ApiResult<StatusCode> {
    let mut session = state.store.begin().await?;
    CategoryService::new(session.as_mut()).delete(id).await?;
    session.commit().await?;

    Ok(StatusCode::OK)
}
