//! Seams to the external identity service. The registration flow only sees
//! these traits; the concrete REST client lives in `client` and tests plug in
//! fakes. The current session is injected as a `SessionProvider` and queried
//! synchronously, never looked up globally.

use super::types::{Account, ExternalProvider, ProfileUpdate};
use crate::app::AppError;
use async_trait::async_trait;
use std::sync::{Arc, PoisonError, RwLock};
use thiserror::Error;

#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum IdentityError {
    #[error("identity service rejected the request ({status}): {message}")]
    Rejected { status: u16, message: String },
    #[error("identity service unavailable: {0}")]
    Transport(AppError),
}

impl From<AppError> for IdentityError {
    fn from(err: AppError) -> Self {
        match err {
            AppError::Http { status, message } => IdentityError::Rejected { status, message },
            other => IdentityError::Transport(other),
        }
    }
}

#[async_trait]
pub trait IdentityProvider: Send + Sync {
    /// Creates an email/password account.
    async fn create_account(&self, email: &str, password: &str) -> Result<Account, IdentityError>;

    /// Writes the display name and photo URL of an existing account.
    async fn update_profile(
        &self,
        account: &Account,
        profile: &ProfileUpdate,
    ) -> Result<(), IdentityError>;

    /// Signs in (creating the account on first use) through a third-party provider.
    async fn sign_in_with_provider(
        &self,
        provider: &ExternalProvider,
    ) -> Result<Account, IdentityError>;
}

pub trait SessionProvider: Send + Sync {
    fn current_session(&self) -> Option<Account>;
}

/// In-memory session shared between the identity client and the flow.
#[derive(Clone, Debug, Default)]
pub struct SessionStore {
    current: Arc<RwLock<Option<Account>>>,
}

impl SessionStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(&self, account: Account) {
        let mut guard = self.current.write().unwrap_or_else(PoisonError::into_inner);
        *guard = Some(account);
    }

    pub fn clear(&self) {
        let mut guard = self.current.write().unwrap_or_else(PoisonError::into_inner);
        *guard = None;
    }

    /// Applies `update` to the stored account if it matches `local_id`.
    pub fn update(&self, local_id: &str, update: impl FnOnce(&mut Account)) {
        let mut guard = self.current.write().unwrap_or_else(PoisonError::into_inner);
        if let Some(account) = guard.as_mut().filter(|account| account.local_id == local_id) {
            update(account);
        }
    }
}

impl SessionProvider for SessionStore {
    fn current_session(&self) -> Option<Account> {
        self.current
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}
