use async_trait::async_trait;
use chrono::Utc;
use std::collections::BTreeMap;
use std::sync::Arc;
use tokio::sync::{Mutex, OwnedMutexGuard};
use uuid::Uuid;

use super::{EntityStore, Page, StoreError, StoreSession};
use crate::database::models::{
    Category, Comment, NewCategory, NewComment, NewNews, NewUser, News, User,
};

#[derive(Debug, Clone, Default)]
struct Tables {
    categories: BTreeMap<i32, Category>,
    news: BTreeMap<i32, News>,
    comments: BTreeMap<i32, Comment>,
    users: BTreeMap<Uuid, User>,
    category_seq: i32,
    news_seq: i32,
    comment_seq: i32,
}

/// In-process store with the same referential rules as the Postgres schema.
///
/// Sessions are serialised: `begin` takes the table lock for the lifetime of the
/// session and works on a staged copy that `commit` swaps in.
#[derive(Clone, Default)]
pub struct MemoryStore {
    tables: Arc<Mutex<Tables>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl EntityStore for MemoryStore {
    async fn begin(&self) -> Result<Box<dyn StoreSession>, StoreError> {
        let guard = self.tables.clone().lock_owned().await;
        let staged = guard.clone();
        Ok(Box::new(MemorySession { guard, staged }))
    }

    async fn ping(&self) -> Result<(), StoreError> {
        Ok(())
    }
}

struct MemorySession {
    guard: OwnedMutexGuard<Tables>,
    staged: Tables,
}

fn window<T: Clone>(rows: &BTreeMap<i32, T>, page: Page) -> Vec<T> {
    rows.values()
        .skip(page.offset.max(0) as usize)
        .take(page.limit.max(0) as usize)
        .cloned()
        .collect()
}

#[async_trait]
impl StoreSession for MemorySession {
    async fn list_categories(&mut self, page: Page) -> Result<Vec<Category>, StoreError> {
        Ok(window(&self.staged.categories, page))
    }

    async fn get_category(&mut self, id: i32) -> Result<Option<Category>, StoreError> {
        Ok(self.staged.categories.get(&id).cloned())
    }

    async fn insert_category(&mut self, new: NewCategory) -> Result<Category, StoreError> {
        self.staged.category_seq += 1;
        let category = Category {
            id: self.staged.category_seq,
            name: new.name,
            created: Utc::now(),
        };
        self.staged.categories.insert(category.id, category.clone());
        Ok(category)
    }

    async fn update_category(&mut self, category: &Category) -> Result<Option<Category>, StoreError> {
        match self.staged.categories.get_mut(&category.id) {
            Some(row) => {
                row.name = category.name.clone();
                Ok(Some(row.clone()))
            }
            None => Ok(None),
        }
    }

    async fn delete_category(&mut self, id: i32) -> Result<bool, StoreError> {
        if self.staged.categories.remove(&id).is_none() {
            return Ok(false);
        }
        for news in self.staged.news.values_mut() {
            if news.category_id == Some(id) {
                news.category_id = None;
            }
        }
        Ok(true)
    }

    async fn list_news(&mut self, page: Page) -> Result<Vec<News>, StoreError> {
        Ok(window(&self.staged.news, page))
    }

    async fn get_news(&mut self, id: i32) -> Result<Option<News>, StoreError> {
        Ok(self.staged.news.get(&id).cloned())
    }

    async fn insert_news(&mut self, new: NewNews) -> Result<News, StoreError> {
        self.check_category(new.category_id)?;
        self.staged.news_seq += 1;
        let now = Utc::now();
        let news = News {
            id: self.staged.news_seq,
            title: new.title,
            content: new.content,
            images: new.images,
            created: now,
            updated: now,
            category_id: new.category_id,
        };
        self.staged.news.insert(news.id, news.clone());
        Ok(news)
    }

    async fn update_news(&mut self, news: &News) -> Result<Option<News>, StoreError> {
        self.check_category(news.category_id)?;
        match self.staged.news.get_mut(&news.id) {
            Some(row) => {
                row.title = news.title.clone();
                row.content = news.content.clone();
                row.images = news.images.clone();
                row.category_id = news.category_id;
                row.updated = Utc::now();
                Ok(Some(row.clone()))
            }
            None => Ok(None),
        }
    }

    async fn delete_news(&mut self, id: i32) -> Result<bool, StoreError> {
        if self.staged.news.remove(&id).is_none() {
            return Ok(false);
        }
        self.staged.comments.retain(|_, comment| comment.news_id != id);
        Ok(true)
    }

    async fn list_comments(&mut self, page: Page) -> Result<Vec<Comment>, StoreError> {
        Ok(window(&self.staged.comments, page))
    }

    async fn get_comment(&mut self, id: i32) -> Result<Option<Comment>, StoreError> {
        Ok(self.staged.comments.get(&id).cloned())
    }

    async fn insert_comment(&mut self, new: NewComment) -> Result<Comment, StoreError> {
        if !self.staged.news.contains_key(&new.news_id) {
            return Err(StoreError::MissingReference(format!("news {}", new.news_id)));
        }
        if !self.staged.users.contains_key(&new.user_id) {
            return Err(StoreError::MissingReference(format!("user {}", new.user_id)));
        }
        self.staged.comment_seq += 1;
        let now = Utc::now();
        let comment = Comment {
            id: self.staged.comment_seq,
            text: new.text,
            created: now,
            updated: now,
            user_id: new.user_id,
            news_id: new.news_id,
        };
        self.staged.comments.insert(comment.id, comment.clone());
        Ok(comment)
    }

    async fn update_comment(&mut self, comment: &Comment) -> Result<Option<Comment>, StoreError> {
        match self.staged.comments.get_mut(&comment.id) {
            Some(row) => {
                row.text = comment.text.clone();
                row.updated = Utc::now();
                Ok(Some(row.clone()))
            }
            None => Ok(None),
        }
    }

    async fn delete_comment(&mut self, id: i32) -> Result<bool, StoreError> {
        Ok(self.staged.comments.remove(&id).is_some())
    }

    async fn get_user(&mut self, id: Uuid) -> Result<Option<User>, StoreError> {
        Ok(self.staged.users.get(&id).cloned())
    }

    async fn find_user_by_email(&mut self, email: &str) -> Result<Option<User>, StoreError> {
        Ok(self
            .staged
            .users
            .values()
            .find(|user| user.email.eq_ignore_ascii_case(email))
            .cloned())
    }

    async fn insert_user(&mut self, new: NewUser) -> Result<User, StoreError> {
        if self.find_user_by_email(&new.email).await?.is_some() {
            return Err(StoreError::Conflict(format!("email {} already registered", new.email)));
        }
        let user = User {
            id: Uuid::new_v4(),
            email: new.email,
            hashed_password: new.hashed_password,
            is_active: new.is_active,
            is_superuser: new.is_superuser,
            is_verified: false,
        };
        self.staged.users.insert(user.id, user.clone());
        Ok(user)
    }

    async fn commit(self: Box<Self>) -> Result<(), StoreError> {
        let MemorySession { mut guard, staged } = *self;
        *guard = staged;
        Ok(())
    }
}

impl MemorySession {
    fn check_category(&self, category_id: Option<i32>) -> Result<(), StoreError> {
        match category_id {
            Some(id) if !self.staged.categories.contains_key(&id) => {
                Err(StoreError::MissingReference(format!("category {}", id)))
            }
            _ => Ok(()),
        }
    }
}
