use std::sync::Arc;

use crate::auth::{IdentityProvider, JwtIdentityProvider, JwtKeys};
use crate::config::{AppConfig, PaginationConfig};
use crate::services::CategoryPolicy;
use crate::store::EntityStore;

/// Shared handles every handler can reach through `State<AppState>`
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn EntityStore>,
    pub identity: Arc<dyn IdentityProvider>,
    pub keys: Arc<JwtKeys>,
    pub pagination: PaginationConfig,
    pub category_policy: CategoryPolicy,
}

impl AppState {
    /// Wire the JWT identity provider over the given store
    pub fn new(store: Arc<dyn EntityStore>, keys: JwtKeys, config: &AppConfig) -> Self {
        let keys = Arc::new(keys);
        let identity = Arc::new(JwtIdentityProvider::new(keys.clone(), store.clone()));
        Self {
            store,
            identity,
            keys,
            pagination: config.pagination,
            category_policy: CategoryPolicy::from_required(config.news.require_category),
        }
    }
}
