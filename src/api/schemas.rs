//! Request payloads and response projections.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use uuid::Uuid;

use crate::config::PaginationConfig;
use crate::database::models::{Category, Comment, News, User};
use crate::error::ApiError;
use crate::services::{CategoryInput, CategoryPatch, CommentInput, NewsInput, NewsPatch};
use crate::store::Page;

const NAME_MAX: usize = 100;
const TITLE_MAX: usize = 100;
const CONTENT_MAX: usize = 255;
const IMAGE_MAX: usize = 255;

/// Boundary validation run by handlers before a payload reaches a service
pub trait Validate {
    fn validate(&self) -> Result<(), ApiError>;
}

#[derive(Default)]
struct FieldErrors(HashMap<String, String>);

impl FieldErrors {
    fn add(&mut self, field: impl Into<String>, message: impl Into<String>) {
        self.0.insert(field.into(), message.into());
    }

    fn max_len(&mut self, field: &str, value: &str, max: usize) {
        if value.chars().count() > max {
            self.add(field, format!("must be at most {} characters", max));
        }
    }

    fn images(&mut self, images: &[Option<String>]) {
        for (i, image) in images.iter().enumerate() {
            if let Some(image) = image {
                self.max_len(&format!("images[{}]", i), image, IMAGE_MAX);
            }
        }
    }

    fn finish(self) -> Result<(), ApiError> {
        if self.0.is_empty() {
            Ok(())
        } else {
            Err(ApiError::validation_error("Invalid request payload", self.0))
        }
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct Pagination {
    pub offset: Option<i64>,
    pub limit: Option<i64>,
}

impl Pagination {
    /// Out-of-range values fall back to the defaults; the limit is capped.
    pub fn page(&self, config: &PaginationConfig) -> Page {
        let offset = self.offset.filter(|o| *o >= 0).unwrap_or(0);
        let limit = self
            .limit
            .filter(|l| *l > 0)
            .unwrap_or(config.default_limit)
            .min(config.max_limit);
        Page::new(offset, limit)
    }
}

// ---- categories ----

#[derive(Debug, Deserialize)]
pub struct CategoryCreate {
    pub name: String,
}

impl Validate for CategoryCreate {
    fn validate(&self) -> Result<(), ApiError> {
        let mut errors = FieldErrors::default();
        if self.name.trim().is_empty() {
            errors.add("name", "must not be empty");
        }
        errors.max_len("name", &self.name, NAME_MAX);
        errors.finish()
    }
}

impl From<CategoryCreate> for CategoryInput {
    fn from(body: CategoryCreate) -> Self {
        CategoryInput { name: body.name }
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct CategoryUpdate {
    pub name: Option<String>,
}

impl Validate for CategoryUpdate {
    fn validate(&self) -> Result<(), ApiError> {
        let mut errors = FieldErrors::default();
        if let Some(name) = &self.name {
            errors.max_len("name", name, NAME_MAX);
        }
        errors.finish()
    }
}

impl From<CategoryUpdate> for CategoryPatch {
    fn from(body: CategoryUpdate) -> Self {
        CategoryPatch { name: body.name }
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct CategoryRead {
    pub id: i32,
    pub name: String,
    pub created: DateTime<Utc>,
}

impl From<Category> for CategoryRead {
    fn from(category: Category) -> Self {
        Self {
            id: category.id,
            name: category.name,
            created: category.created,
        }
    }
}

// ---- news ----

#[derive(Debug, Deserialize)]
pub struct NewsCreate {
    pub title: String,
    pub content: String,
    pub images: Vec<Option<String>>,
    #[serde(default)]
    pub category_id: Option<i32>,
}

impl Validate for NewsCreate {
    fn validate(&self) -> Result<(), ApiError> {
        let mut errors = FieldErrors::default();
        errors.max_len("title", &self.title, TITLE_MAX);
        errors.max_len("content", &self.content, CONTENT_MAX);
        errors.images(&self.images);
        errors.finish()
    }
}

impl From<NewsCreate> for NewsInput {
    fn from(body: NewsCreate) -> Self {
        NewsInput {
            title: body.title,
            content: body.content,
            images: body.images,
            category_id: body.category_id,
        }
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct NewsUpdate {
    pub title: Option<String>,
    pub content: Option<String>,
    pub images: Option<Vec<Option<String>>>,
    pub category_id: Option<i32>,
}

impl Validate for NewsUpdate {
    fn validate(&self) -> Result<(), ApiError> {
        let mut errors = FieldErrors::default();
        if let Some(title) = &self.title {
            errors.max_len("title", title, TITLE_MAX);
        }
        if let Some(content) = &self.content {
            errors.max_len("content", content, CONTENT_MAX);
        }
        if let Some(images) = &self.images {
            errors.images(images);
        }
        errors.finish()
    }
}

impl From<NewsUpdate> for NewsPatch {
    fn from(body: NewsUpdate) -> Self {
        NewsPatch {
            title: body.title,
            content: body.content,
            images: body.images,
            category_id: body.category_id,
        }
    }
}

/// List projection
#[derive(Debug, Serialize, Deserialize)]
pub struct NewsRead {
    pub id: i32,
    pub title: String,
    pub created: DateTime<Utc>,
}

impl From<News> for NewsRead {
    fn from(news: News) -> Self {
        Self {
            id: news.id,
            title: news.title,
            created: news.created,
        }
    }
}

/// Single-item projection; everything but the id
#[derive(Debug, Serialize, Deserialize)]
pub struct NewsItemRead {
    pub title: String,
    pub content: String,
    pub images: Vec<Option<String>>,
    pub created: DateTime<Utc>,
    pub updated: DateTime<Utc>,
    pub category_id: Option<i32>,
}

impl From<News> for NewsItemRead {
    fn from(news: News) -> Self {
        Self {
            title: news.title,
            content: news.content,
            images: news.images,
            created: news.created,
            updated: news.updated,
            category_id: news.category_id,
        }
    }
}

// ---- comments ----

#[derive(Debug, Deserialize)]
pub struct CommentCreate {
    pub text: String,
    pub news_id: i32,
}

impl From<CommentCreate> for CommentInput {
    fn from(body: CommentCreate) -> Self {
        CommentInput {
            text: body.text,
            news_id: body.news_id,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct CommentUpdate {
    pub text: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct CommentRead {
    pub id: i32,
    pub text: String,
    pub created: DateTime<Utc>,
    pub updated: DateTime<Utc>,
    pub user_id: Uuid,
    pub news_id: i32,
}

impl From<Comment> for CommentRead {
    fn from(comment: Comment) -> Self {
        Self {
            id: comment.id,
            text: comment.text,
            created: comment.created,
            updated: comment.updated,
            user_id: comment.user_id,
            news_id: comment.news_id,
        }
    }
}

// ---- users ----

#[derive(Debug, Deserialize)]
pub struct UserCreate {
    pub email: String,
    pub password: String,
}

impl Validate for UserCreate {
    fn validate(&self) -> Result<(), ApiError> {
        let mut errors = FieldErrors::default();
        match self.email.split_once('@') {
            Some((local, domain)) if !local.is_empty() && !domain.is_empty() => {}
            _ => errors.add("email", "must be a valid email address"),
        }
        if self.password.chars().count() < 3 {
            errors.add("password", "must be at least 3 characters");
        }
        errors.finish()
    }
}

/// OAuth2 password-flow form; `username` carries the email
#[derive(Debug, Deserialize)]
pub struct LoginForm {
    pub username: String,
    pub password: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct UserRead {
    pub id: Uuid,
    pub email: String,
    pub is_active: bool,
    pub is_superuser: bool,
    pub is_verified: bool,
}

impl From<User> for UserRead {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            email: user.email,
            is_active: user.is_active,
            is_superuser: user.is_superuser,
            is_verified: user.is_verified,
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct TokenResponse {
    pub access_token: String,
    pub token_type: String,
}

impl TokenResponse {
    pub fn bearer(access_token: String) -> Self {
        Self {
            access_token,
            token_type: "bearer".to_string(),
        }
    }
}
