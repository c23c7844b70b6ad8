use crate::database::models::{Category, NewCategory};
use crate::store::{Page, StoreSession};

use super::patch::merge;
use super::ServiceError;

const NOT_FOUND: &str = "Category not found";

#[derive(Debug, Clone)]
pub struct CategoryInput {
    pub name: String,
}

#[derive(Debug, Clone, Default)]
pub struct CategoryPatch {
    pub name: Option<String>,
}

/// Category operations scoped to one store session
pub struct CategoryService<'a> {
    session: &'a mut dyn StoreSession,
}

impl<'a> CategoryService<'a> {
    pub fn new(session: &'a mut dyn StoreSession) -> Self {
        Self { session }
    }

    pub async fn list(&mut self, page: Page) -> Result<Vec<Category>, ServiceError> {
        Ok(self.session.list_categories(page).await?)
    }

    pub async fn get(&mut self, id: i32) -> Result<Category, ServiceError> {
        self.session
            .get_category(id)
            .await?
            .ok_or(ServiceError::NotFound(NOT_FOUND))
    }

    pub async fn create(&mut self, input: CategoryInput) -> Result<Category, ServiceError> {
        let category = self
            .session
            .insert_category(NewCategory { name: input.name })
            .await?;
        tracing::info!("Created category {} ({})", category.id, category.name);
        Ok(category)
    }

    pub async fn replace(&mut self, id: i32, input: CategoryInput) -> Result<Category, ServiceError> {
        let mut category = self.get(id).await?;
        category.name = input.name;
        self.save(&category).await
    }

    pub async fn partial_replace(&mut self, id: i32, patch: CategoryPatch) -> Result<Category, ServiceError> {
        let mut category = self.get(id).await?;
        if !merge(&mut category.name, patch.name) {
            return Ok(category);
        }
        self.save(&category).await
    }

    pub async fn delete(&mut self, id: i32) -> Result<(), ServiceError> {
        if !self.session.delete_category(id).await? {
            return Err(ServiceError::NotFound(NOT_FOUND));
        }
        tracing::info!("Deleted category {}", id);
        Ok(())
    }

    async fn save(&mut self, category: &Category) -> Result<Category, ServiceError> {
        self.session
            .update_category(category)
            .await?
            .ok_or(ServiceError::NotFound(NOT_FOUND))
    }
}
