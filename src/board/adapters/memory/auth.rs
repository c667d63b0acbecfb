//! In-memory auth gateway for profile and session flow tests.

use async_trait::async_trait;
use mockable::{Clock, DefaultClock};
use std::collections::HashMap;
use std::sync::{Arc, RwLock};
use tokio::sync::watch;

use crate::board::{
    domain::UserId,
    ports::{AuthError, AuthGateway, AuthResult, Credentials, Profile, Session},
};

/// Thread-safe in-memory auth gateway.
///
/// Accounts registered through [`AuthGateway::sign_up`] can sign in again
/// with the same credentials; session changes are published on a watch
/// channel.
#[derive(Debug, Clone)]
pub struct InMemoryAuthGateway<C = DefaultClock>
where
    C: Clock + Send + Sync,
{
    state: Arc<RwLock<AuthState>>,
    sessions: Arc<watch::Sender<Option<Session>>>,
    clock: Arc<C>,
}

#[derive(Debug, Default)]
struct AuthState {
    accounts: HashMap<String, Account>,
    profiles: HashMap<UserId, Profile>,
    current: Option<Session>,
}

#[derive(Debug, Clone)]
struct Account {
    user_id: UserId,
    password: String,
}

impl InMemoryAuthGateway<DefaultClock> {
    /// Creates an empty gateway using the system clock.
    #[must_use]
    pub fn new() -> Self {
        Self::with_clock(DefaultClock)
    }
}

impl Default for InMemoryAuthGateway<DefaultClock> {
    fn default() -> Self {
        Self::new()
    }
}

impl<C> InMemoryAuthGateway<C>
where
    C: Clock + Send + Sync,
{
    /// Creates an empty gateway using the given clock.
    #[must_use]
    pub fn with_clock(clock: C) -> Self {
        let (sender, _) = watch::channel(None);
        Self {
            state: Arc::new(RwLock::new(AuthState::default())),
            sessions: Arc::new(sender),
            clock: Arc::new(clock),
        }
    }

    fn write_state(&self) -> AuthResult<std::sync::RwLockWriteGuard<'_, AuthState>> {
        self.state
            .write()
            .map_err(|err| AuthError::gateway(std::io::Error::other(err.to_string())))
    }

    fn read_state(&self) -> AuthResult<std::sync::RwLockReadGuard<'_, AuthState>> {
        self.state
            .read()
            .map_err(|err| AuthError::gateway(std::io::Error::other(err.to_string())))
    }

    fn publish(&self, session: Option<Session>) {
        // Send only fails with no receivers; session state is still stored.
        self.sessions.send(session).ok();
    }
}

#[async_trait]
impl<C> AuthGateway for InMemoryAuthGateway<C>
where
    C: Clock + Send + Sync,
{
    async fn session(&self) -> AuthResult<Option<Session>> {
        Ok(self.read_state()?.current.clone())
    }

    async fn sign_in_with_password(&self, credentials: Credentials) -> AuthResult<Session> {
        let session = {
            let mut state = self.write_state()?;
            let account = state
                .accounts
                .get(&credentials.email)
                .filter(|account| account.password == credentials.password)
                .cloned()
                .ok_or(AuthError::InvalidCredentials)?;
            let session = Session {
                user_id: account.user_id,
                email: credentials.email,
            };
            state.current = Some(session.clone());
            session
        };
        self.publish(Some(session.clone()));
        Ok(session)
    }

    async fn sign_up(&self, credentials: Credentials) -> AuthResult<Session> {
        let session = {
            let mut state = self.write_state()?;
            if state.accounts.contains_key(&credentials.email) {
                return Err(AuthError::EmailTaken(credentials.email));
            }
            let account = Account {
                user_id: UserId::new(),
                password: credentials.password,
            };
            let session = Session {
                user_id: account.user_id,
                email: credentials.email.clone(),
            };
            state.accounts.insert(credentials.email, account);
            state.current = Some(session.clone());
            session
        };
        self.publish(Some(session.clone()));
        Ok(session)
    }

    async fn sign_out(&self) -> AuthResult<()> {
        self.write_state()?.current = None;
        self.publish(None);
        Ok(())
    }

    async fn reset_password_for_email(&self, _email: &str) -> AuthResult<()> {
        // Reset emails are the real gateway's concern; accepting the request
        // is all the contract requires.
        Ok(())
    }

    async fn profile(&self, user_id: UserId) -> AuthResult<Option<Profile>> {
        Ok(self.read_state()?.profiles.get(&user_id).cloned())
    }

    async fn upsert_profile(&self, profile: Profile) -> AuthResult<Profile> {
        let mut stored = profile;
        stored.updated_at = self.clock.utc();
        self.write_state()?
            .profiles
            .insert(stored.id, stored.clone());
        Ok(stored)
    }

    fn session_changes(&self) -> watch::Receiver<Option<Session>> {
        self.sessions.subscribe()
    }
}
