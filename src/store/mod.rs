//! Transactional entity store.
//!
//! A request opens one [`StoreSession`] with [`EntityStore::begin`], performs its
//! reads and writes through it and finishes with [`StoreSession::commit`]. A
//! session dropped without committing is rolled back, so every early return
//! (including `?` on an error) discards partial writes.

pub mod memory;
pub mod postgres;

use async_trait::async_trait;
use thiserror::Error;
use uuid::Uuid;

use crate::database::models::{
    Category, Comment, NewCategory, NewComment, NewNews, NewUser, News, User,
};

pub use memory::MemoryStore;
pub use postgres::PgStore;

#[derive(Debug, Error)]
pub enum StoreError {
    /// A unique constraint rejected the write
    #[error("Conflict: {0}")]
    Conflict(String),

    /// A foreign reference did not resolve
    #[error("Missing reference: {0}")]
    MissingReference(String),

    #[error("Store unavailable: {0}")]
    Unavailable(String),

    #[error(transparent)]
    Sqlx(sqlx::Error),
}

impl From<sqlx::Error> for StoreError {
    fn from(err: sqlx::Error) -> Self {
        match err {
            sqlx::Error::Database(ref db) if db.is_unique_violation() => {
                StoreError::Conflict(db.message().to_string())
            }
            sqlx::Error::Database(ref db) if db.is_foreign_key_violation() => {
                StoreError::MissingReference(db.message().to_string())
            }
            sqlx::Error::PoolTimedOut | sqlx::Error::PoolClosed => {
                StoreError::Unavailable(err.to_string())
            }
            other => StoreError::Sqlx(other),
        }
    }
}

/// Offset/limit window, already normalised by the caller
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Page {
    pub offset: i64,
    pub limit: i64,
}

impl Page {
    pub fn new(offset: i64, limit: i64) -> Self {
        Self { offset, limit }
    }
}

impl Default for Page {
    fn default() -> Self {
        Self { offset: 0, limit: 10 }
    }
}

#[async_trait]
pub trait EntityStore: Send + Sync {
    /// Open a new transactional session
    async fn begin(&self) -> Result<Box<dyn StoreSession>, StoreError>;

    /// Cheap connectivity probe for health checks
    async fn ping(&self) -> Result<(), StoreError>;
}

/// One unit of work. Lists are ordered by id; updates refresh `updated`
/// where the entity carries one.
#[async_trait]
pub trait StoreSession: Send {
    async fn list_categories(&mut self, page: Page) -> Result<Vec<Category>, StoreError>;
    async fn get_category(&mut self, id: i32) -> Result<Option<Category>, StoreError>;
    async fn insert_category(&mut self, new: NewCategory) -> Result<Category, StoreError>;
    async fn update_category(&mut self, category: &Category) -> Result<Option<Category>, StoreError>;
    /// Clears `category_id` on the category's news.
    async fn delete_category(&mut self, id: i32) -> Result<bool, StoreError>;

    async fn list_news(&mut self, page: Page) -> Result<Vec<News>, StoreError>;
    async fn get_news(&mut self, id: i32) -> Result<Option<News>, StoreError>;
    async fn insert_news(&mut self, new: NewNews) -> Result<News, StoreError>;
    async fn update_news(&mut self, news: &News) -> Result<Option<News>, StoreError>;
    /// Deletes the news' comments as well.
    async fn delete_news(&mut self, id: i32) -> Result<bool, StoreError>;

    async fn list_comments(&mut self, page: Page) -> Result<Vec<Comment>, StoreError>;
    async fn get_comment(&mut self, id: i32) -> Result<Option<Comment>, StoreError>;
    async fn insert_comment(&mut self, new: NewComment) -> Result<Comment, StoreError>;
    async fn update_comment(&mut self, comment: &Comment) -> Result<Option<Comment>, StoreError>;
    async fn delete_comment(&mut self, id: i32) -> Result<bool, StoreError>;

    async fn get_user(&mut self, id: Uuid) -> Result<Option<User>, StoreError>;
    /// Case-insensitive email lookup
    async fn find_user_by_email(&mut self, email: &str) -> Result<Option<User>, StoreError>;
    async fn insert_user(&mut self, new: NewUser) -> Result<User, StoreError>;

    async fn commit(self: Box<Self>) -> Result<(), StoreError>;
}
