//! Registration payloads and the values the flow hands back to its caller.
//! `RegistrationInput` and `Account` carry secrets, so their `Debug` output is
//! redacted and they must never be logged field by field.

use secrecy::SecretString;
use std::fmt;

/// Form values captured at submission time. Dropped after the attempt.
#[derive(Clone, Default, PartialEq, Eq)]
pub struct RegistrationInput {
    pub name: String,
    pub email: String,
    pub password: String,
    pub confirm_password: String,
    pub photo_url: Option<String>,
}

impl RegistrationInput {
    #[must_use]
    pub fn new(
        name: impl Into<String>,
        email: impl Into<String>,
        password: impl Into<String>,
        confirm_password: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            email: email.into(),
            password: password.into(),
            confirm_password: confirm_password.into(),
            photo_url: None,
        }
    }

    #[must_use]
    pub fn with_photo_url(mut self, photo_url: impl Into<String>) -> Self {
        self.photo_url = Some(photo_url.into());
        self
    }

    /// Photo URL as entered; a blank field counts as absent.
    #[must_use]
    pub fn photo_url(&self) -> Option<&str> {
        self.photo_url
            .as_deref()
            .map(str::trim)
            .filter(|url| !url.is_empty())
    }
}

impl fmt::Debug for RegistrationInput {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter
            .debug_struct("RegistrationInput")
            .field("name", &self.name)
            .field("email", &self.email)
            .field("password", &"[REDACTED]")
            .field("confirm_password", &"[REDACTED]")
            .field("photo_url", &self.photo_url)
            .finish()
    }
}

/// Account handle issued by the identity service.
#[derive(Clone, Debug)]
pub struct Account {
    pub local_id: String,
    pub email: Option<String>,
    pub display_name: Option<String>,
    pub photo_url: Option<String>,
    pub id_token: SecretString,
}

impl Account {
    /// True when both a display name and a photo URL are set.
    #[must_use]
    pub fn is_fully_provisioned(&self) -> bool {
        let present = |value: &Option<String>| value.as_deref().is_some_and(|v| !v.is_empty());
        present(&self.display_name) && present(&self.photo_url)
    }
}

/// Display profile written after the account exists.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ProfileUpdate {
    pub display_name: String,
    pub photo_url: Option<String>,
}

/// Third-party identity providers accepted by the provider path.
#[derive(Clone, Debug)]
pub enum ExternalProvider {
    /// Google sign-in; the id token comes from the provider's consent popup.
    Google { id_token: SecretString },
}

impl ExternalProvider {
    #[must_use]
    pub const fn provider_id(&self) -> &'static str {
        match self {
            ExternalProvider::Google { .. } => "google.com",
        }
    }
}

/// Success banner shown after a registration.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Notification {
    pub title: &'static str,
    pub text: &'static str,
}

impl Notification {
    #[must_use]
    pub const fn account_created() -> Self {
        Self {
            title: "User Created",
            text: "Congratulations! Your account has been created successfully.",
        }
    }
}

/// Where the caller should route next. `replace` mirrors a history replace so
/// the registration page does not stay in the back stack.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Navigation {
    pub target: String,
    pub replace: bool,
    pub notification: Option<Notification>,
}

impl Navigation {
    #[must_use]
    pub fn replace(target: impl Into<String>) -> Self {
        Self {
            target: target.into(),
            replace: true,
            notification: None,
        }
    }

    #[must_use]
    pub fn with_notification(mut self, notification: Notification) -> Self {
        self.notification = Some(notification);
        self
    }
}
