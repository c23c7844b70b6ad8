pub mod password;

use async_trait::async_trait;
use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use thiserror::Error;
use uuid::Uuid;

use crate::config::SecurityConfig;
use crate::store::{EntityStore, StoreError};

/// Audience stamped into every token we issue
pub const AUDIENCE: &str = "newsroom:auth";

#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    pub sub: Uuid,
    pub aud: String,
    pub exp: i64,
    pub iat: i64,
}

impl Claims {
    /// Fails when the lifetime pushes expiry past what a timestamp can hold
    pub fn new(user_id: Uuid, lifetime_secs: u64) -> Result<Self, AuthError> {
        let now = Utc::now();
        let exp = i64::try_from(lifetime_secs)
            .ok()
            .and_then(Duration::try_seconds)
            .and_then(|lifetime| now.checked_add_signed(lifetime))
            .ok_or_else(|| AuthError::TokenGeneration(format!("token lifetime {}s is out of range", lifetime_secs)))?;

        Ok(Self {
            sub: user_id,
            aud: AUDIENCE.to_string(),
            exp: exp.timestamp(),
            iat: now.timestamp(),
        })
    }
}

/// Verified caller, as resolved from a bearer credential
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Identity {
    pub user_id: Uuid,
    pub email: String,
}

#[derive(Debug, Error)]
pub enum AuthError {
    #[error("Missing Authorization header")]
    MissingCredential,

    #[error("Invalid token: {0}")]
    InvalidToken(String),

    #[error("Unknown or inactive user")]
    InactiveUser,

    #[error("JWT secret not configured")]
    InvalidSecret,

    #[error("Token generation error: {0}")]
    TokenGeneration(String),

    #[error("Password hashing error: {0}")]
    PasswordHash(String),

    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Resolves an opaque bearer credential to a verified identity
#[async_trait]
pub trait IdentityProvider: Send + Sync {
    async fn resolve(&self, credential: &str) -> Result<Identity, AuthError>;
}

/// HS256 signing material plus the token validity window
pub struct JwtKeys {
    encoding: EncodingKey,
    decoding: DecodingKey,
    lifetime_secs: u64,
}

impl JwtKeys {
    pub fn new(secret: &str, lifetime_secs: u64) -> Result<Self, AuthError> {
        if secret.is_empty() {
            return Err(AuthError::InvalidSecret);
        }
        Ok(Self {
            encoding: EncodingKey::from_secret(secret.as_bytes()),
            decoding: DecodingKey::from_secret(secret.as_bytes()),
            lifetime_secs,
        })
    }

    pub fn from_config(config: &SecurityConfig) -> Result<Self, AuthError> {
        Self::new(&config.jwt_secret, config.jwt_lifetime_secs)
    }

    pub fn lifetime_secs(&self) -> u64 {
        self.lifetime_secs
    }

    pub fn issue(&self, user_id: Uuid) -> Result<String, AuthError> {
        self.encode_claims(&Claims::new(user_id, self.lifetime_secs)?)
    }

    pub fn encode_claims(&self, claims: &Claims) -> Result<String, AuthError> {
        encode(&Header::default(), claims, &self.encoding)
            .map_err(|e| AuthError::TokenGeneration(e.to_string()))
    }

    pub fn verify(&self, token: &str) -> Result<Claims, AuthError> {
        let mut validation = Validation::default();
        validation.set_audience(&[AUDIENCE]);
        validation.leeway = 0;

        decode::<Claims>(token, &self.decoding, &validation)
            .map(|data| data.claims)
            .map_err(|e| AuthError::InvalidToken(e.to_string()))
    }
}

/// Verifies the token signature and expiry, then checks the subject is an active user
pub struct JwtIdentityProvider {
    keys: Arc<JwtKeys>,
    store: Arc<dyn EntityStore>,
}

impl JwtIdentityProvider {
    pub fn new(keys: Arc<JwtKeys>, store: Arc<dyn EntityStore>) -> Self {
        Self { keys, store }
    }
}

#[async_trait]
impl IdentityProvider for JwtIdentityProvider {
    async fn resolve(&self, credential: &str) -> Result<Identity, AuthError> {
        let claims = self.keys.verify(credential)?;

        let mut session = self.store.begin().await?;
        let user = session.get_user(claims.sub).await?;
        drop(session);

        match user {
            Some(user) if user.is_active => Ok(Identity {
                user_id: user.id,
                email: user.email,
            }),
            _ => {
                tracing::warn!("Token subject {} is unknown or inactive", claims.sub);
                Err(AuthError::InactiveUser)
            }
        }
    }
}
