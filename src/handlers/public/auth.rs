// Token acquisition and account registration

use axum::{
    extract::{rejection::FormRejection, State},
    http::StatusCode,
    Form, Json,
};

use crate::api::schemas::{LoginForm, TokenResponse, UserCreate, UserRead};
use crate::api::{ApiJson, Validate};
use crate::auth::password::hash_password_blocking;
use crate::error::ApiResult;
use crate::services::{authenticate, UserService};
use crate::state::AppState;

/// POST /auth/register
pub async fn register(
    State(state): State<AppState>,
    ApiJson(body): ApiJson<UserCreate>,
) -> ApiResult<(StatusCode, Json<UserRead>)> {
    body.validate()?;
    let hashed = hash_password_blocking(body.password).await?;

    let mut session = state.store.begin().await?;
    let user = UserService::new(session.as_mut())
        .register(&body.email, hashed)
        .await?;
    session.commit().await?;

    Ok((StatusCode::CREATED, Json(user.into())))
}

/// POST /auth/jwt/login - OAuth2 password flow, form encoded
pub async fn login(
    State(state): State<AppState>,
    form: Result<Form<LoginForm>, FormRejection>,
) -> ApiResult<Json<TokenResponse>> {
    let Form(form) = form?;

    let user = {
        let mut session = state.store.begin().await?;
        let user = UserService::new(session.as_mut())
            .login_candidate(&form.username)
            .await?;
        user
    };
    let token = authenticate(&state.keys, user, form.password).await?;

    Ok(Json(TokenResponse::bearer(token)))
}
