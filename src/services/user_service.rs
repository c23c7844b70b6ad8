use thiserror::Error;

use crate::auth::password::verify_password_blocking;
use crate::auth::{AuthError, Identity, JwtKeys};
use crate::database::models::{NewUser, User};
use crate::store::{StoreError, StoreSession};

#[derive(Debug, Error)]
pub enum UserServiceError {
    #[error("REGISTER_USER_ALREADY_EXISTS")]
    AlreadyExists,

    #[error("LOGIN_BAD_CREDENTIALS")]
    BadCredentials,

    #[error("User not found")]
    NotFound,

    #[error(transparent)]
    Store(StoreError),

    #[error(transparent)]
    Auth(#[from] AuthError),
}

impl From<StoreError> for UserServiceError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::Conflict(_) => UserServiceError::AlreadyExists,
            other => UserServiceError::Store(other),
        }
    }
}

/// Registration, password login and profile lookup
pub struct UserService<'a> {
    session: &'a mut dyn StoreSession,
}

impl<'a> UserService<'a> {
    pub fn new(session: &'a mut dyn StoreSession) -> Self {
        Self { session }
    }

    /// Insert an account from an already-hashed password
    pub async fn register(&mut self, email: &str, hashed_password: String) -> Result<User, UserServiceError> {
        if self.session.find_user_by_email(email).await?.is_some() {
            return Err(UserServiceError::AlreadyExists);
        }

        let user = self
            .session
            .insert_user(NewUser {
                email: email.to_string(),
                hashed_password,
                is_active: true,
                is_superuser: false,
            })
            .await?;
        tracing::info!("Registered user {} ({})", user.id, user.email);
        Ok(user)
    }

    /// Active account a login for `email` would check against
    pub async fn login_candidate(&mut self, email: &str) -> Result<User, UserServiceError> {
        match self.session.find_user_by_email(email).await? {
            Some(user) if user.is_active => Ok(user),
            _ => {
                tracing::warn!("Failed login for {}", email);
                Err(UserServiceError::BadCredentials)
            }
        }
    }

    pub async fn me(&mut self, identity: &Identity) -> Result<User, UserServiceError> {
        self.session
            .get_user(identity.user_id)
            .await?
            .ok_or(UserServiceError::NotFound)
    }
}

/// Check the password against a login candidate and issue a bearer token.
/// Runs outside any store session; argon2 goes to the blocking pool.
pub async fn authenticate(keys: &JwtKeys, user: User, password: String) -> Result<String, UserServiceError> {
    if !verify_password_blocking(password, user.hashed_password).await {
        tracing::warn!("Failed login for {}", user.email);
        return Err(UserServiceError::BadCredentials);
    }

    let token = keys.issue(user.id)?;
    tracing::info!("User {} logged in", user.id);
    Ok(token)
}
