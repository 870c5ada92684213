//! Endpoint configuration with build-time defaults and runtime overrides.
//! Defaults come from `option_env!` so packaged builds can point elsewhere
//! without code changes; the CLI layers flag and environment values on top.
//! Only the identity API key is sensitive and it is kept in a `SecretString`.

use super::errors::AppError;
use secrecy::SecretString;
use url::Url;

/// Course endpoint used when nothing else is configured.
pub const DEFAULT_COURSES_URL: &str = "http://localhost:5000/classes";
/// Identity service base URL used when nothing else is configured.
pub const DEFAULT_IDENTITY_BASE_URL: &str = "https://identitytoolkit.googleapis.com";
/// Landing page used when no redirect target was recorded.
pub const DEFAULT_REDIRECT_TARGET: &str = "/";

#[derive(Clone, Debug)]
pub struct AppConfig {
    pub courses_url: String,
    pub identity_base_url: String,
    pub api_key: SecretString,
    pub redirect_target: Option<String>,
}

impl AppConfig {
    /// Loads the build-time defaults.
    #[must_use]
    pub fn load() -> Self {
        let courses_url = option_env!("CLASSHUB_COURSES_URL").unwrap_or(DEFAULT_COURSES_URL);
        let identity_base_url =
            option_env!("CLASSHUB_IDENTITY_URL").unwrap_or(DEFAULT_IDENTITY_BASE_URL);
        let api_key = option_env!("CLASSHUB_API_KEY").unwrap_or("");

        Self {
            courses_url: courses_url.to_string(),
            identity_base_url: identity_base_url.to_string(),
            api_key: SecretString::from(api_key.to_string()),
            redirect_target: None,
        }
    }

    /// Applies runtime overrides; blank values were already dropped by
    /// [`normalize_runtime_value`] and leave the defaults in place.
    #[must_use]
    pub fn with_overrides(mut self, runtime: RuntimeConfig) -> Self {
        apply_runtime_overrides(&mut self, runtime);
        self
    }

    /// Parses the course endpoint.
    ///
    /// # Errors
    /// Returns `AppError::Config` when the configured value is not a URL.
    pub fn courses_endpoint(&self) -> Result<Url, AppError> {
        parse_url("course endpoint", &self.courses_url)
    }

    /// Parses the identity service base URL.
    ///
    /// # Errors
    /// Returns `AppError::Config` when the configured value is not a URL.
    pub fn identity_endpoint(&self) -> Result<Url, AppError> {
        parse_url("identity service URL", &self.identity_base_url)
    }
}

#[derive(Debug, Default)]
pub struct RuntimeConfig {
    pub courses_url: Option<String>,
    pub identity_base_url: Option<String>,
    pub api_key: Option<SecretString>,
    pub redirect_target: Option<String>,
}

fn apply_runtime_overrides(config: &mut AppConfig, runtime: RuntimeConfig) {
    if let Some(value) = runtime.courses_url {
        config.courses_url = value;
    }
    if let Some(value) = runtime.identity_base_url {
        config.identity_base_url = value;
    }
    if let Some(value) = runtime.api_key {
        config.api_key = value;
    }
    if let Some(value) = runtime.redirect_target {
        config.redirect_target = Some(value);
    }
}

fn parse_url(label: &str, value: &str) -> Result<Url, AppError> {
    Url::parse(value.trim()).map_err(|err| AppError::Config(format!("Invalid {label} '{value}': {err}")))
}

/// Trims a runtime value and rejects empty input.
#[must_use]
pub fn normalize_runtime_value(value: &str) -> Option<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}
