//! Authentication and profile port.
//!
//! Authentication itself is an external collaborator; this contract covers
//! session retrieval, credential flows, and the `profiles` table keyed by
//! user id.

use crate::board::domain::UserId;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use thiserror::Error;
use tokio::sync::watch;

/// Result type for auth operations.
pub type AuthResult<T> = Result<T, AuthError>;

/// An authenticated session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    /// Authenticated user identifier.
    pub user_id: UserId,
    /// Sign-in email address.
    pub email: String,
}

/// Email/password credentials.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Credentials {
    /// Email address.
    pub email: String,
    /// Plain-text password, handed straight to the gateway.
    pub password: String,
}

impl Credentials {
    /// Creates a credential pair.
    #[must_use]
    pub fn new(email: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            password: password.into(),
        }
    }
}

/// Per-user profile row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Profile {
    /// Owning user identifier.
    pub id: UserId,
    /// Display name.
    pub username: String,
    /// Avatar object key in blob storage, if one was uploaded.
    pub avatar_url: Option<String>,
    /// Last profile update timestamp.
    pub updated_at: DateTime<Utc>,
}

/// Authentication gateway contract.
#[async_trait]
pub trait AuthGateway: Send + Sync {
    /// Returns the current session, if any.
    async fn session(&self) -> AuthResult<Option<Session>>;

    /// Signs in with email and password.
    ///
    /// # Errors
    ///
    /// Returns [`AuthError::InvalidCredentials`] when the pair is rejected.
    async fn sign_in_with_password(&self, credentials: Credentials) -> AuthResult<Session>;

    /// Registers a new account and signs it in.
    ///
    /// # Errors
    ///
    /// Returns [`AuthError::EmailTaken`] when the address is registered.
    async fn sign_up(&self, credentials: Credentials) -> AuthResult<Session>;

    /// Ends the current session.
    async fn sign_out(&self) -> AuthResult<()>;

    /// Requests a password-reset email.
    async fn reset_password_for_email(&self, email: &str) -> AuthResult<()>;

    /// Returns the profile row for a user, if one exists.
    async fn profile(&self, user_id: UserId) -> AuthResult<Option<Profile>>;

    /// Inserts or replaces a profile row, returning the stored row.
    async fn upsert_profile(&self, profile: Profile) -> AuthResult<Profile>;

    /// Returns a receiver observing session changes.
    fn session_changes(&self) -> watch::Receiver<Option<Session>>;
}

/// Errors returned by auth gateway implementations.
#[derive(Debug, Clone, Error)]
pub enum AuthError {
    /// The email/password pair was rejected.
    #[error("invalid credentials")]
    InvalidCredentials,

    /// The email address is already registered.
    #[error("email already registered: {0}")]
    EmailTaken(String),

    /// Gateway-layer failure.
    #[error("auth gateway error: {0}")]
    Gateway(Arc<dyn std::error::Error + Send + Sync>),
}

impl AuthError {
    /// Wraps a gateway error.
    pub fn gateway(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Gateway(Arc::new(err))
    }
}
