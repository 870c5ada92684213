//! Registration feature: local validation, the identity collaborator seam, the
//! REST identity client and the registration pipeline. Passwords and id tokens
//! pass through this module and must never be logged.
//!
//! Flow Overview: validate the form, create the account, write the display
//! profile, then navigate to the redirect target. The external-provider path
//! signs in through the provider and navigates the same way.

pub mod client;
pub mod flow;
pub mod identity;
pub mod types;
pub mod validation;

pub use client::IdentityClient;
pub use flow::{FlowState, RegistrationError, RegistrationFlow};
pub use identity::{IdentityError, IdentityProvider, SessionProvider, SessionStore};
pub use types::{
    Account, ExternalProvider, Navigation, Notification, ProfileUpdate, RegistrationInput,
};
pub use validation::{ValidationError, ValidationErrors};
