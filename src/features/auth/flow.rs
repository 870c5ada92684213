//! Registration pipeline.
//!
//! `Idle -> Validating -> CreatingAccount -> AccountCreated -> UpdatingProfile
//! -> ProfileUpdated -> Navigated`, with every failure returning to `Idle`
//! after passing through its failure state. Each submission takes a generation
//! ticket; `cancel` or a newer submission invalidates it, and a completion
//! holding a stale ticket is dropped without touching the flow state.

use super::identity::{IdentityError, IdentityProvider, SessionProvider};
use super::types::{ExternalProvider, Navigation, Notification, ProfileUpdate, RegistrationInput};
use super::validation::{ValidationErrors, validate};
use crate::app::config::DEFAULT_REDIRECT_TARGET;
use std::sync::{
    Arc, Mutex, PoisonError,
    atomic::{AtomicU64, Ordering},
};
use thiserror::Error;
use tracing::{debug, error, info};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FlowState {
    Idle,
    Validating,
    ValidationFailed,
    CreatingAccount,
    AccountCreated,
    AccountCreationFailed,
    UpdatingProfile,
    ProfileUpdated,
    ProfileUpdateFailed,
    SigningIn,
    ProviderFailed,
    Navigated,
}

#[derive(Debug, Error)]
pub enum RegistrationError {
    #[error("{0}")]
    Validation(ValidationErrors),
    #[error("account creation failed: {0}")]
    AccountCreation(IdentityError),
    #[error("profile update failed: {0}")]
    ProfileUpdate(IdentityError),
    #[error("external provider sign-in failed: {0}")]
    Provider(IdentityError),
    #[error("registration superseded by a newer request")]
    Superseded,
}

impl RegistrationError {
    /// Message to show next to the form. Identity failures have none: they
    /// are logged only.
    #[must_use]
    pub fn user_message(&self) -> Option<String> {
        match self {
            RegistrationError::Validation(errors) => Some(errors.to_string()),
            _ => None,
        }
    }

    /// True for identity failures that reach no user-facing surface.
    #[must_use]
    pub fn is_unhandled(&self) -> bool {
        matches!(
            self,
            RegistrationError::AccountCreation(_)
                | RegistrationError::ProfileUpdate(_)
                | RegistrationError::Provider(_)
        )
    }
}

pub struct RegistrationFlow {
    identity: Arc<dyn IdentityProvider>,
    session: Arc<dyn SessionProvider>,
    redirect_target: Option<String>,
    state: Mutex<FlowState>,
    generation: AtomicU64,
}

impl RegistrationFlow {
    /// `redirect_target` is the page the user wanted before being sent to
    /// registration; `None` falls back to the landing page.
    #[must_use]
    pub fn new(
        identity: Arc<dyn IdentityProvider>,
        session: Arc<dyn SessionProvider>,
        redirect_target: Option<String>,
    ) -> Self {
        Self {
            identity,
            session,
            redirect_target,
            state: Mutex::new(FlowState::Idle),
            generation: AtomicU64::new(0),
        }
    }

    #[must_use]
    pub fn state(&self) -> FlowState {
        *self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    #[must_use]
    pub fn redirect_target(&self) -> &str {
        self.redirect_target
            .as_deref()
            .filter(|target| !target.is_empty())
            .unwrap_or(DEFAULT_REDIRECT_TARGET)
    }

    /// Skips the form when the session already has a complete profile.
    #[must_use]
    pub fn on_mount(&self) -> Option<Navigation> {
        let account = self.session.current_session()?;
        if !account.is_fully_provisioned() {
            return None;
        }

        debug!(local_id = %account.local_id, "session already provisioned, skipping registration");
        self.set_state(FlowState::Navigated);
        Some(Navigation::replace(self.redirect_target()))
    }

    /// Invalidates any in-flight submission and returns to `Idle`.
    pub fn cancel(&self) {
        self.generation.fetch_add(1, Ordering::SeqCst);
        self.set_state(FlowState::Idle);
    }

    /// Validates `input`, creates the account and writes its profile.
    ///
    /// # Errors
    /// Returns `Validation` for rejected input (the identity service is not
    /// called), a tagged identity error for failed calls, or `Superseded` when
    /// the submission was cancelled while waiting.
    pub async fn submit_registration(
        &self,
        input: RegistrationInput,
    ) -> Result<Navigation, RegistrationError> {
        let ticket = self.begin();
        self.advance(ticket, FlowState::Validating)?;

        if let Err(errors) = validate(&input) {
            debug!(%errors, "registration rejected");
            self.fail(ticket, FlowState::ValidationFailed)?;
            return Err(RegistrationError::Validation(errors));
        }

        self.advance(ticket, FlowState::CreatingAccount)?;
        let account = match self.identity.create_account(&input.email, &input.password).await {
            Ok(account) => account,
            Err(err) => {
                error!(error = %err, "Error creating user");
                self.fail(ticket, FlowState::AccountCreationFailed)?;
                return Err(RegistrationError::AccountCreation(err));
            }
        };
        self.advance(ticket, FlowState::AccountCreated)?;

        let profile = ProfileUpdate {
            display_name: input.name.clone(),
            photo_url: input.photo_url().map(str::to_string),
        };
        self.advance(ticket, FlowState::UpdatingProfile)?;
        if let Err(err) = self.identity.update_profile(&account, &profile).await {
            error!(error = %err, local_id = %account.local_id, "Error updating profile");
            self.fail(ticket, FlowState::ProfileUpdateFailed)?;
            return Err(RegistrationError::ProfileUpdate(err));
        }
        self.advance(ticket, FlowState::ProfileUpdated)?;

        info!(local_id = %account.local_id, "user registered");
        self.finish(ticket)
    }

    /// Registers through a third-party provider.
    ///
    /// # Errors
    /// Returns `Provider` when the sign-in fails, or `Superseded` when the
    /// request was cancelled while waiting.
    pub async fn register_with_external_provider(
        &self,
        provider: ExternalProvider,
    ) -> Result<Navigation, RegistrationError> {
        let ticket = self.begin();
        self.advance(ticket, FlowState::SigningIn)?;

        match self.identity.sign_in_with_provider(&provider).await {
            Ok(account) => {
                info!(local_id = %account.local_id, provider = provider.provider_id(), "user registered");
                self.finish(ticket)
            }
            Err(err) => {
                error!(error = %err, provider = provider.provider_id(), "Error signing in with provider");
                self.fail(ticket, FlowState::ProviderFailed)?;
                Err(RegistrationError::Provider(err))
            }
        }
    }

    fn finish(&self, ticket: u64) -> Result<Navigation, RegistrationError> {
        self.advance(ticket, FlowState::Navigated)?;
        Ok(Navigation::replace(self.redirect_target())
            .with_notification(Notification::account_created()))
    }

    fn begin(&self) -> u64 {
        self.generation.fetch_add(1, Ordering::SeqCst) + 1
    }

    /// Moves to `next` if `ticket` is still the live generation.
    fn advance(&self, ticket: u64, next: FlowState) -> Result<(), RegistrationError> {
        let mut state = self.state.lock().unwrap_or_else(PoisonError::into_inner);
        if self.generation.load(Ordering::SeqCst) != ticket {
            debug!(ticket, ?next, "dropping stale registration step");
            return Err(RegistrationError::Superseded);
        }
        debug!(from = ?*state, to = ?next, "registration flow");
        *state = next;
        Ok(())
    }

    /// Records a failure state and settles back to `Idle` within one critical
    /// section.
    fn fail(&self, ticket: u64, failed: FlowState) -> Result<(), RegistrationError> {
        let mut state = self.state.lock().unwrap_or_else(PoisonError::into_inner);
        if self.generation.load(Ordering::SeqCst) != ticket {
            debug!(ticket, ?failed, "dropping stale registration failure");
            return Err(RegistrationError::Superseded);
        }
        debug!(from = ?*state, to = ?failed, "registration flow");
        *state = failed;
        debug!(from = ?failed, to = ?FlowState::Idle, "registration flow");
        *state = FlowState::Idle;
        Ok(())
    }

    fn set_state(&self, next: FlowState) {
        *self.state.lock().unwrap_or_else(PoisonError::into_inner) = next;
    }
}
