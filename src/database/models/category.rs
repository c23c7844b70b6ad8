use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct Category {
    pub id: i32,
    pub name: String,
    pub created: DateTime<Utc>,
}

/// Insert payload; id and `created` are assigned by the store.
#[derive(Debug, Clone)]
pub struct NewCategory {
    pub name: String,
}
