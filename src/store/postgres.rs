use async_trait::async_trait;
use sqlx::{PgPool, Postgres, Transaction};
use uuid::Uuid;

use super::{EntityStore, Page, StoreError, StoreSession};
use crate::database::manager::DatabaseManager;
use crate::database::models::{
    Category, Comment, NewCategory, NewComment, NewNews, NewUser, News, User,
};

const CATEGORY_COLUMNS: &str = "id, name, created";
const NEWS_COLUMNS: &str = "id, title, content, images, created, updated, category_id";
const COMMENT_COLUMNS: &str = "id, text, created, updated, user_id, news_id";
const USER_COLUMNS: &str = "id, email, hashed_password, is_active, is_superuser, is_verified";

/// Entity store backed by a Postgres pool; each session is one transaction
#[derive(Clone)]
pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl EntityStore for PgStore {
    async fn begin(&self) -> Result<Box<dyn StoreSession>, StoreError> {
        let tx = self.pool.begin().await?;
        Ok(Box::new(PgSession { tx }))
    }

    async fn ping(&self) -> Result<(), StoreError> {
        DatabaseManager::health_check(&self.pool).await.map_err(|e| match e {
            crate::database::DatabaseError::Sqlx(err) => StoreError::from(err),
            other => StoreError::Unavailable(other.to_string()),
        })
    }
}

pub struct PgSession {
    tx: Transaction<'static, Postgres>,
}

#[async_trait]
impl StoreSession for PgSession {
    async fn list_categories(&mut self, page: Page) -> Result<Vec<Category>, StoreError> {
        let sql = format!("SELECT {CATEGORY_COLUMNS} FROM category ORDER BY id OFFSET $1 LIMIT $2");
        let rows = sqlx::query_as::<_, Category>(&sql)
            .bind(page.offset)
            .bind(page.limit)
            .fetch_all(&mut *self.tx)
            .await?;
        Ok(rows)
    }

    async fn get_category(&mut self, id: i32) -> Result<Option<Category>, StoreError> {
        let sql = format!("SELECT {CATEGORY_COLUMNS} FROM category WHERE id = $1");
        let row = sqlx::query_as::<_, Category>(&sql)
            .bind(id)
            .fetch_optional(&mut *self.tx)
            .await?;
        Ok(row)
    }

    async fn insert_category(&mut self, new: NewCategory) -> Result<Category, StoreError> {
        let sql = format!("INSERT INTO category (name) VALUES ($1) RETURNING {CATEGORY_COLUMNS}");
        let row = sqlx::query_as::<_, Category>(&sql)
            .bind(new.name)
            .fetch_one(&mut *self.tx)
            .await?;
        Ok(row)
    }

    async fn update_category(&mut self, category: &Category) -> Result<Option<Category>, StoreError> {
        let sql = format!("UPDATE category SET name = $2 WHERE id = $1 RETURNING {CATEGORY_COLUMNS}");
        let row = sqlx::query_as::<_, Category>(&sql)
            .bind(category.id)
            .bind(&category.name)
            .fetch_optional(&mut *self.tx)
            .await?;
        Ok(row)
    }

    async fn delete_category(&mut self, id: i32) -> Result<bool, StoreError> {
        // news.category_id is ON DELETE SET NULL
        let result = sqlx::query("DELETE FROM category WHERE id = $1")
            .bind(id)
            .execute(&mut *self.tx)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    async fn list_news(&mut self, page: Page) -> Result<Vec<News>, StoreError> {
        let sql = format!("SELECT {NEWS_COLUMNS} FROM news ORDER BY id OFFSET $1 LIMIT $2");
        let rows = sqlx::query_as::<_, News>(&sql)
            .bind(page.offset)
            .bind(page.limit)
            .fetch_all(&mut *self.tx)
            .await?;
        Ok(rows)
    }

    async fn get_news(&mut self, id: i32) -> Result<Option<News>, StoreError> {
        let sql = format!("SELECT {NEWS_COLUMNS} FROM news WHERE id = $1");
        let row = sqlx::query_as::<_, News>(&sql)
            .bind(id)
            .fetch_optional(&mut *self.tx)
            .await?;
        Ok(row)
    }

    async fn insert_news(&mut self, new: NewNews) -> Result<News, StoreError> {
        let sql = format!(
            "INSERT INTO news (title, content, images, category_id) VALUES ($1, $2, $3, $4) RETURNING {NEWS_COLUMNS}"
        );
        let row = sqlx::query_as::<_, News>(&sql)
            .bind(new.title)
            .bind(new.content)
            .bind(new.images)
            .bind(new.category_id)
            .fetch_one(&mut *self.tx)
            .await?;
        Ok(row)
    }

    async fn update_news(&mut self, news: &News) -> Result<Option<News>, StoreError> {
        let sql = format!(
            "UPDATE news SET title = $2, content = $3, images = $4, category_id = $5, updated = NOW() \
             WHERE id = $1 RETURNING {NEWS_COLUMNS}"
        );
        let row = sqlx::query_as::<_, News>(&sql)
            .bind(news.id)
            .bind(&news.title)
            .bind(&news.content)
            .bind(&news.images)
            .bind(news.category_id)
            .fetch_optional(&mut *self.tx)
            .await?;
        Ok(row)
    }

    async fn delete_news(&mut self, id: i32) -> Result<bool, StoreError> {
        // comment.news_id is ON DELETE CASCADE
        let result = sqlx::query("DELETE FROM news WHERE id = $1")
            .bind(id)
            .execute(&mut *self.tx)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    async fn list_comments(&mut self, page: Page) -> Result<Vec<Comment>, StoreError> {
        let sql = format!("SELECT {COMMENT_COLUMNS} FROM comment ORDER BY id OFFSET $1 LIMIT $2");
        let rows = sqlx::query_as::<_, Comment>(&sql)
            .bind(page.offset)
            .bind(page.limit)
            .fetch_all(&mut *self.tx)
            .await?;
        Ok(rows)
    }

    async fn get_comment(&mut self, id: i32) -> Result<Option<Comment>, StoreError> {
        let sql = format!("SELECT {COMMENT_COLUMNS} FROM comment WHERE id = $1");
        let row = sqlx::query_as::<_, Comment>(&sql)
            .bind(id)
            .fetch_optional(&mut *self.tx)
            .await?;
        Ok(row)
    }

    async fn insert_comment(&mut self, new: NewComment) -> Result<Comment, StoreError> {
        let sql = format!(
            "INSERT INTO comment (text, news_id, user_id) VALUES ($1, $2, $3) RETURNING {COMMENT_COLUMNS}"
        );
        let row = sqlx::query_as::<_, Comment>(&sql)
            .bind(new.text)
            .bind(new.news_id)
            .bind(new.user_id)
            .fetch_one(&mut *self.tx)
            .await?;
        Ok(row)
    }

    async fn update_comment(&mut self, comment: &Comment) -> Result<Option<Comment>, StoreError> {
        let sql = format!(
            "UPDATE comment SET text = $2, updated = NOW() WHERE id = $1 RETURNING {COMMENT_COLUMNS}"
        );
        let row = sqlx::query_as::<_, Comment>(&sql)
            .bind(comment.id)
            .bind(&comment.text)
            .fetch_optional(&mut *self.tx)
            .await?;
        Ok(row)
    }

    async fn delete_comment(&mut self, id: i32) -> Result<bool, StoreError> {
        let result = sqlx::query("DELETE FROM comment WHERE id = $1")
            .bind(id)
            .execute(&mut *self.tx)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    async fn get_user(&mut self, id: Uuid) -> Result<Option<User>, StoreError> {
        let sql = format!("SELECT {USER_COLUMNS} FROM users WHERE id = $1");
        let row = sqlx::query_as::<_, User>(&sql)
            .bind(id)
            .fetch_optional(&mut *self.tx)
            .await?;
        Ok(row)
    }

    async fn find_user_by_email(&mut self, email: &str) -> Result<Option<User>, StoreError> {
        let sql = format!("SELECT {USER_COLUMNS} FROM users WHERE lower(email) = lower($1)");
        let row = sqlx::query_as::<_, User>(&sql)
            .bind(email)
            .fetch_optional(&mut *self.tx)
            .await?;
        Ok(row)
    }

    async fn insert_user(&mut self, new: NewUser) -> Result<User, StoreError> {
        if self.find_user_by_email(&new.email).await?.is_some() {
            return Err(StoreError::Conflict(format!("email {} already registered", new.email)));
        }
        let sql = format!(
            "INSERT INTO users (id, email, hashed_password, is_active, is_superuser, is_verified) \
             VALUES ($1, $2, $3, $4, $5, FALSE) RETURNING {USER_COLUMNS}"
        );
        let row = sqlx::query_as::<_, User>(&sql)
            .bind(Uuid::new_v4())
            .bind(new.email)
            .bind(new.hashed_password)
            .bind(new.is_active)
            .bind(new.is_superuser)
            .fetch_one(&mut *self.tx)
            .await?;
        Ok(row)
    }

    async fn commit(self: Box<Self>) -> Result<(), StoreError> {
        self.tx.commit().await?;
        Ok(())
    }
}
