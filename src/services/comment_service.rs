use crate::auth::Identity;
use crate::database::models::{Comment, NewComment};
use crate::store::{Page, StoreSession};

use super::ServiceError;

const NOT_FOUND: &str = "Comment not found";
const NEWS_NOT_FOUND: &str = "News not found";

#[derive(Debug, Clone)]
pub struct CommentInput {
    pub text: String,
    pub news_id: i32,
}

/// Comment operations scoped to one store session.
///
/// Mutations take the caller's verified identity; the author of a new comment
/// is always that identity and only it may change or remove the comment.
pub struct CommentService<'a> {
    session: &'a mut dyn StoreSession,
}

impl<'a> CommentService<'a> {
    pub fn new(session: &'a mut dyn StoreSession) -> Self {
        Self { session }
    }

    pub async fn list(&mut self, page: Page) -> Result<Vec<Comment>, ServiceError> {
        Ok(self.session.list_comments(page).await?)
    }

    pub async fn get(&mut self, id: i32) -> Result<Comment, ServiceError> {
        self.session
            .get_comment(id)
            .await?
            .ok_or(ServiceError::NotFound(NOT_FOUND))
    }

    pub async fn create(&mut self, input: CommentInput, identity: &Identity) -> Result<Comment, ServiceError> {
        if self.session.get_news(input.news_id).await?.is_none() {
            return Err(ServiceError::NotFound(NEWS_NOT_FOUND));
        }

        let comment = self
            .session
            .insert_comment(NewComment {
                text: input.text,
                news_id: input.news_id,
                user_id: identity.user_id,
            })
            .await?;
        tracing::info!("User {} commented {} on news {}", identity.user_id, comment.id, comment.news_id);
        Ok(comment)
    }

    pub async fn update(&mut self, id: i32, text: String, identity: &Identity) -> Result<Comment, ServiceError> {
        let mut comment = self.owned(id, identity).await?;
        comment.text = text;
        self.session
            .update_comment(&comment)
            .await?
            .ok_or(ServiceError::NotFound(NOT_FOUND))
    }

    pub async fn delete(&mut self, id: i32, identity: &Identity) -> Result<(), ServiceError> {
        self.owned(id, identity).await?;
        if !self.session.delete_comment(id).await? {
            return Err(ServiceError::NotFound(NOT_FOUND));
        }
        tracing::info!("User {} deleted comment {}", identity.user_id, id);
        Ok(())
    }

    async fn owned(&mut self, id: i32, identity: &Identity) -> Result<Comment, ServiceError> {
        let comment = self.get(id).await?;
        if comment.user_id != identity.user_id {
            tracing::warn!("User {} denied access to comment {}", identity.user_id, id);
            return Err(ServiceError::PermissionDenied);
        }
        Ok(comment)
    }
}
