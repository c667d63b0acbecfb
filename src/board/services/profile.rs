//! Profile service: session, profile, and avatar orchestration.

use crate::board::{
    domain::UserId,
    ports::{AuthError, AuthGateway, BlobError, BlobStorage, Credentials, Profile, Session},
};
use mockable::Clock;
use std::sync::Arc;
use thiserror::Error;
use tokio::sync::watch;
use uuid::Uuid;

/// Service-level errors for profile operations.
#[derive(Debug, Error)]
pub enum ProfileError {
    /// Auth gateway operation failed.
    #[error(transparent)]
    Auth(#[from] AuthError),
    /// Blob storage operation failed.
    #[error(transparent)]
    Blob(#[from] BlobError),
}

/// Result type for profile service operations.
pub type ProfileResult<T> = Result<T, ProfileError>;

/// A profile row together with its downloaded avatar image, when one is
/// set and retrievable.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadedProfile {
    /// The profile row.
    pub profile: Profile,
    /// Avatar image bytes, when the download succeeded.
    pub avatar: Option<Vec<u8>>,
}

/// Session, profile, and avatar orchestration service.
#[derive(Clone)]
pub struct ProfileService<A, B, C>
where
    A: AuthGateway,
    B: BlobStorage,
    C: Clock + Send + Sync,
{
    auth: Arc<A>,
    blobs: Arc<B>,
    clock: Arc<C>,
}

impl<A, B, C> ProfileService<A, B, C>
where
    A: AuthGateway,
    B: BlobStorage,
    C: Clock + Send + Sync,
{
    /// Creates a new profile service.
    #[must_use]
    pub const fn new(auth: Arc<A>, blobs: Arc<B>, clock: Arc<C>) -> Self {
        Self { auth, blobs, clock }
    }

    /// Returns the current session, if any.
    ///
    /// # Errors
    ///
    /// Returns [`ProfileError::Auth`] when the gateway call fails.
    pub async fn session(&self) -> ProfileResult<Option<Session>> {
        Ok(self.auth.session().await?)
    }

    /// Returns a receiver observing session changes.
    pub fn session_changes(&self) -> watch::Receiver<Option<Session>> {
        self.auth.session_changes()
    }

    /// Signs in with email and password.
    ///
    /// # Errors
    ///
    /// Returns [`ProfileError::Auth`] when the credentials are rejected.
    pub async fn sign_in(&self, credentials: Credentials) -> ProfileResult<Session> {
        Ok(self.auth.sign_in_with_password(credentials).await?)
    }

    /// Registers a new account and signs it in.
    ///
    /// # Errors
    ///
    /// Returns [`ProfileError::Auth`] when the email is already registered.
    pub async fn sign_up(&self, credentials: Credentials) -> ProfileResult<Session> {
        Ok(self.auth.sign_up(credentials).await?)
    }

    /// Ends the current session.
    ///
    /// # Errors
    ///
    /// Returns [`ProfileError::Auth`] when the gateway call fails.
    pub async fn sign_out(&self) -> ProfileResult<()> {
        Ok(self.auth.sign_out().await?)
    }

    /// Requests a password-reset email.
    ///
    /// # Errors
    ///
    /// Returns [`ProfileError::Auth`] when the gateway call fails.
    pub async fn request_password_reset(&self, email: &str) -> ProfileResult<()> {
        Ok(self.auth.reset_password_for_email(email).await?)
    }

    /// Loads a user's profile together with its avatar image.
    ///
    /// A failed avatar download degrades to the profile without an image;
    /// the failure is logged, not surfaced.
    ///
    /// # Errors
    ///
    /// Returns [`ProfileError::Auth`] when the profile lookup fails.
    pub async fn load_profile(&self, user_id: UserId) -> ProfileResult<Option<LoadedProfile>> {
        let Some(profile) = self.auth.profile(user_id).await? else {
            return Ok(None);
        };

        let avatar = match &profile.avatar_url {
            Some(path) => match self.blobs.download(path).await {
                Ok(bytes) => Some(bytes),
                Err(err) => {
                    tracing::warn!(error = %err, user = %user_id, "avatar download failed");
                    None
                }
            },
            None => None,
        };
        Ok(Some(LoadedProfile { profile, avatar }))
    }

    /// Sets the user's display name, creating the profile row when missing.
    ///
    /// # Errors
    ///
    /// Returns [`ProfileError::Auth`] when the upsert fails.
    pub async fn update_username(
        &self,
        user_id: UserId,
        username: impl Into<String> + Send,
    ) -> ProfileResult<Profile> {
        let mut profile = self.profile_or_default(user_id).await?;
        profile.username = username.into();
        profile.updated_at = self.clock.utc();
        Ok(self.auth.upsert_profile(profile).await?)
    }

    /// Uploads an avatar image and records its object key on the profile.
    ///
    /// Keys are `<user_id>-<random>.<ext>`, so re-uploads never overwrite a
    /// previous image.
    ///
    /// # Errors
    ///
    /// Returns [`ProfileError::Blob`] when the upload fails or
    /// [`ProfileError::Auth`] when the profile upsert does.
    pub async fn upload_avatar(
        &self,
        user_id: UserId,
        extension: &str,
        bytes: Vec<u8>,
    ) -> ProfileResult<Profile> {
        let path = format!("{user_id}-{}.{extension}", Uuid::new_v4());
        self.blobs.upload(&path, bytes).await?;

        let mut profile = self.profile_or_default(user_id).await?;
        profile.avatar_url = Some(path);
        profile.updated_at = self.clock.utc();
        Ok(self.auth.upsert_profile(profile).await?)
    }

    async fn profile_or_default(&self, user_id: UserId) -> ProfileResult<Profile> {
        let existing = self.auth.profile(user_id).await?;
        Ok(existing.unwrap_or_else(|| Profile {
            id: user_id,
            username: String::new(),
            avatar_url: None,
            updated_at: self.clock.utc(),
        }))
    }
}
