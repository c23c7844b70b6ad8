use crate::database::models::{NewNews, News};
use crate::store::{Page, StoreSession};

use super::patch::merge;
use super::ServiceError;

const NOT_FOUND: &str = "News not found";
const CATEGORY_NOT_FOUND: &str = "Category not found";

/// Whether news may be created without a category
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CategoryPolicy {
    /// An absent category id fails the same way an unknown one does
    Required,
    Optional,
}

impl CategoryPolicy {
    pub fn from_required(required: bool) -> Self {
        if required {
            CategoryPolicy::Required
        } else {
            CategoryPolicy::Optional
        }
    }
}

/// Full payload used by create and full replace
#[derive(Debug, Clone)]
pub struct NewsInput {
    pub title: String,
    pub content: String,
    pub images: Vec<Option<String>>,
    pub category_id: Option<i32>,
}

#[derive(Debug, Clone, Default)]
pub struct NewsPatch {
    pub title: Option<String>,
    pub content: Option<String>,
    pub images: Option<Vec<Option<String>>>,
    pub category_id: Option<i32>,
}

/// News operations scoped to one store session
pub struct NewsService<'a> {
    session: &'a mut dyn StoreSession,
    policy: CategoryPolicy,
}

impl<'a> NewsService<'a> {
    pub fn new(session: &'a mut dyn StoreSession, policy: CategoryPolicy) -> Self {
        Self { session, policy }
    }

    pub async fn list(&mut self, page: Page) -> Result<Vec<News>, ServiceError> {
        Ok(self.session.list_news(page).await?)
    }

    pub async fn get(&mut self, id: i32) -> Result<News, ServiceError> {
        self.session
            .get_news(id)
            .await?
            .ok_or(ServiceError::NotFound(NOT_FOUND))
    }

    pub async fn create(&mut self, input: NewsInput) -> Result<News, ServiceError> {
        match input.category_id {
            Some(category_id) => self.ensure_category(category_id).await?,
            None if self.policy == CategoryPolicy::Required => {
                return Err(ServiceError::NotFound(CATEGORY_NOT_FOUND));
            }
            None => {}
        }

        let news = self
            .session
            .insert_news(NewNews {
                title: input.title,
                content: input.content,
                images: input.images,
                category_id: input.category_id,
            })
            .await?;
        tracing::info!("Created news {} in category {:?}", news.id, news.category_id);
        Ok(news)
    }

    /// Overwrites every field; a null category id clears the reference.
    pub async fn replace(&mut self, id: i32, input: NewsInput) -> Result<News, ServiceError> {
        let mut news = self.get(id).await?;
        if let Some(category_id) = input.category_id {
            self.ensure_category(category_id).await?;
        }

        news.title = input.title;
        news.content = input.content;
        news.images = input.images;
        news.category_id = input.category_id;
        self.save(&news).await
    }

    pub async fn partial_replace(&mut self, id: i32, patch: NewsPatch) -> Result<News, ServiceError> {
        let mut news = self.get(id).await?;

        let mut changed = merge(&mut news.title, patch.title);
        changed |= merge(&mut news.content, patch.content);
        changed |= merge(&mut news.images, patch.images);
        if merge(&mut news.category_id, patch.category_id.map(Some)) {
            if let Some(category_id) = news.category_id {
                self.ensure_category(category_id).await?;
            }
            changed = true;
        }

        if !changed {
            return Ok(news);
        }
        self.save(&news).await
    }

    /// Comments go with the news.
    pub async fn delete(&mut self, id: i32) -> Result<(), ServiceError> {
        if !self.session.delete_news(id).await? {
            return Err(ServiceError::NotFound(NOT_FOUND));
        }
        tracing::info!("Deleted news {}", id);
        Ok(())
    }

    async fn ensure_category(&mut self, category_id: i32) -> Result<(), ServiceError> {
        match self.session.get_category(category_id).await? {
            Some(_) => Ok(()),
            None => Err(ServiceError::NotFound(CATEGORY_NOT_FOUND)),
        }
    }

    async fn save(&mut self, news: &News) -> Result<News, ServiceError> {
        self.session
            .update_news(news)
            .await?
            .ok_or(ServiceError::NotFound(NOT_FOUND))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::models::NewCategory;
    use crate::store::{EntityStore, MemoryStore};

    fn input(category_id: Option<i32>) -> NewsInput {
        NewsInput {
            title: "A".to_string(),
            content: "B".to_string(),
            images: vec![Some("a.png".to_string()), None],
            category_id,
        }
    }

    async fn seeded() -> (MemoryStore, i32) {
        let store = MemoryStore::new();
        let mut session = store.begin().await.unwrap();
        let category = session
            .insert_category(NewCategory { name: "Tech".to_string() })
            .await
            .unwrap();
        session.commit().await.unwrap();
        (store, category.id)
    }

    #[tokio::test]
    async fn create_then_get_round_trips() {
        let (store, category_id) = seeded().await;
        let mut session = store.begin().await.unwrap();
        let mut service = NewsService::new(session.as_mut(), CategoryPolicy::Required);

        let created = service.create(input(Some(category_id))).await.unwrap();
        assert_eq!(created.id, 1);
        assert_eq!(created.created, created.updated);

        let fetched = service.get(created.id).await.unwrap();
        assert_eq!(fetched.title, "A");
        assert_eq!(fetched.content, "B");
        assert_eq!(fetched.images, vec![Some("a.png".to_string()), None]);
        assert_eq!(fetched.category_id, Some(category_id));
    }

    #[tokio::test]
    async fn create_requires_existing_category() {
        let (store, _) = seeded().await;
        let mut session = store.begin().await.unwrap();
        let mut service = NewsService::new(session.as_mut(), CategoryPolicy::Required);

        let err = service.create(input(Some(99))).await.unwrap_err();
        assert!(matches!(err, ServiceError::NotFound(CATEGORY_NOT_FOUND)));

        let err = service.create(input(None)).await.unwrap_err();
        assert!(matches!(err, ServiceError::NotFound(CATEGORY_NOT_FOUND)));

        assert!(service.list(Page::default()).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn optional_policy_allows_categoryless_news() {
        let (store, _) = seeded().await;
        let mut session = store.begin().await.unwrap();
        let mut service = NewsService::new(session.as_mut(), CategoryPolicy::Optional);

        let created = service.create(input(None)).await.unwrap();
        assert_eq!(created.category_id, None);

        let err = service.create(input(Some(99))).await.unwrap_err();
        assert!(matches!(err, ServiceError::NotFound(CATEGORY_NOT_FOUND)));
    }

    #[tokio::test]
    async fn replace_overwrites_every_field() {
        let (store, category_id) = seeded().await;
        let mut session = store.begin().await.unwrap();
        let mut service = NewsService::new(session.as_mut(), CategoryPolicy::Required);
        let created = service.create(input(Some(category_id))).await.unwrap();

        let replaced = service
            .replace(
                created.id,
                NewsInput {
                    title: "C".to_string(),
                    content: "D".to_string(),
                    images: vec![],
                    category_id: None,
                },
            )
            .await
            .unwrap();
        assert_eq!(replaced.title, "C");
        assert_eq!(replaced.content, "D");
        assert!(replaced.images.is_empty());
        assert_eq!(replaced.category_id, None);
        assert_eq!(replaced.created, created.created);
        assert!(replaced.updated >= created.updated);

        let err = service.replace(created.id, input(Some(99))).await.unwrap_err();
        assert!(matches!(err, ServiceError::NotFound(CATEGORY_NOT_FOUND)));
        let err = service.replace(42, input(None)).await.unwrap_err();
        assert!(matches!(err, ServiceError::NotFound(NOT_FOUND)));
    }

    #[tokio::test]
    async fn falsy_patch_leaves_news_unchanged() {
        let (store, category_id) = seeded().await;
        let mut session = store.begin().await.unwrap();
        let mut service = NewsService::new(session.as_mut(), CategoryPolicy::Required);
        let created = service.create(input(Some(category_id))).await.unwrap();

        let patched = service
            .partial_replace(
                created.id,
                NewsPatch {
                    title: Some(String::new()),
                    content: None,
                    images: Some(vec![]),
                    category_id: Some(0),
                },
            )
            .await
            .unwrap();
        assert_eq!(patched, created);
    }

    #[tokio::test]
    async fn truthy_patch_applies_only_supplied_fields() {
        let (store, category_id) = seeded().await;
        let mut session = store.begin().await.unwrap();
        let mut service = NewsService::new(session.as_mut(), CategoryPolicy::Required);
        let created = service.create(input(Some(category_id))).await.unwrap();

        let patched = service
            .partial_replace(
                created.id,
                NewsPatch {
                    title: Some("New title".to_string()),
                    ..Default::default()
                },
            )
            .await
            .unwrap();
        assert_eq!(patched.title, "New title");
        assert_eq!(patched.content, created.content);
        assert_eq!(patched.images, created.images);
        assert_eq!(patched.category_id, Some(category_id));

        let err = service
            .partial_replace(
                created.id,
                NewsPatch {
                    category_id: Some(77),
                    ..Default::default()
                },
            )
            .await
            .unwrap_err();
        assert!(matches!(err, ServiceError::NotFound(CATEGORY_NOT_FOUND)));
    }

    #[tokio::test]
    async fn delete_then_get_is_not_found() {
        let (store, category_id) = seeded().await;
        let mut session = store.begin().await.unwrap();
        let mut service = NewsService::new(session.as_mut(), CategoryPolicy::Required);
        let created = service.create(input(Some(category_id))).await.unwrap();

        service.delete(created.id).await.unwrap();
        assert!(matches!(service.get(created.id).await, Err(ServiceError::NotFound(NOT_FOUND))));
        assert!(matches!(service.delete(created.id).await, Err(ServiceError::NotFound(NOT_FOUND))));
    }
}
