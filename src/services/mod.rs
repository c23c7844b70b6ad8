pub mod category_service;
pub mod comment_service;
pub mod news_service;
pub mod patch;
pub mod user_service;

use thiserror::Error;

use crate::store::StoreError;

pub use category_service::{CategoryInput, CategoryPatch, CategoryService};
pub use comment_service::{CommentInput, CommentService};
pub use news_service::{CategoryPolicy, NewsInput, NewsPatch, NewsService};
pub use user_service::{authenticate, UserService, UserServiceError};

/// Domain outcomes shared by the entity services
#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("{0}")]
    NotFound(&'static str),

    #[error("Not enough permissions")]
    PermissionDenied,

    #[error(transparent)]
    Store(#[from] StoreError),
}
