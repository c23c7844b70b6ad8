pub mod api;
pub mod auth;
pub mod cli;
pub mod config;
pub mod database;
pub mod error;
pub mod handlers;
pub mod middleware;
pub mod services;
pub mod state;
pub mod store;

use axum::{
    http::HeaderValue,
    middleware::from_fn_with_state,
    routing::{get, post, put},
    Router,
};
use tower::ServiceBuilder;
use tower_http::{
    cors::{AllowOrigin, Any, CorsLayer},
    trace::TraceLayer,
};

use crate::config::{AppConfig, Environment};
use crate::handlers::{protected, public};
use crate::middleware::require_identity;
use crate::state::AppState;

/// Full application: routes plus tracing and CORS layers
pub fn app(state: AppState, config: &AppConfig) -> Router {
    router(state).layer(
        ServiceBuilder::new()
            .layer(TraceLayer::new_for_http())
            .layer(cors_layer(config)),
    )
}

/// Route table without the outer layers
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(public::home::root))
        .route("/health", get(public::home::health))
        .merge(category_routes())
        .merge(news_routes())
        .merge(comment_routes(&state))
        .merge(auth_routes(&state))
        .with_state(state)
}

fn category_routes() -> Router<AppState> {
    use public::categories;

    Router::new()
        .route("/categories", get(categories::list).post(categories::create))
        .route(
            "/categories/:id",
            get(categories::get)
                .put(categories::replace)
                .patch(categories::partial_replace)
                .delete(categories::delete),
        )
}

fn news_routes() -> Router<AppState> {
    use public::news;

    Router::new()
        .route("/news", get(news::list).post(news::create))
        .route(
            "/news/:id",
            get(news::get)
                .put(news::replace)
                .patch(news::partial_replace)
                .delete(news::delete),
        )
}

// Reads are public; writes go through `require_identity`
fn comment_routes(state: &AppState) -> Router<AppState> {
    let auth = || from_fn_with_state(state.clone(), require_identity);

    Router::new()
        .route(
            "/comments",
            get(public::comments::list)
                .merge(post(protected::comments::create).route_layer(auth())),
        )
        .route(
            "/comments/:id",
            get(public::comments::get).merge(
                put(protected::comments::update)
                    .delete(protected::comments::delete)
                    .route_layer(auth()),
            ),
        )
}

fn auth_routes(state: &AppState) -> Router<AppState> {
    Router::new()
        .route("/auth/register", post(public::auth::register))
        .route("/auth/jwt/login", post(public::auth::login))
        .route(
            "/users/me",
            get(protected::users::me).route_layer(from_fn_with_state(state.clone(), require_identity)),
        )
}

/// Permissive in development, origin list otherwise, no CORS headers when disabled
pub fn cors_layer(config: &AppConfig) -> CorsLayer {
    let security = &config.security;
    if !security.enable_cors {
        return CorsLayer::new();
    }
    if config.environment == Environment::Development || security.cors_origins.iter().any(|o| o == "*") {
        return CorsLayer::permissive();
    }

    let origins: Vec<HeaderValue> = security
        .cors_origins
        .iter()
        .filter_map(|origin| match origin.parse() {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!("Ignoring invalid CORS origin {:?}", origin);
                None
            }
        })
        .collect();

    CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_methods(Any)
        .allow_headers(Any)
}
