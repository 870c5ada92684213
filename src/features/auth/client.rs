//! REST client for an Identity Toolkit style service. It centralizes endpoint
//! paths and the API key query parameter, and keeps the shared session store in
//! step with every successful call. Passwords and id tokens travel only in
//! request bodies and must never be logged.

use super::identity::{IdentityError, IdentityProvider, SessionStore};
use super::types::{Account, ExternalProvider, ProfileUpdate};
use crate::app::{AppError, build_client, build_url_with_base, post_json};
use async_trait::async_trait;
use reqwest::Client;
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};
use url::Url;

/// Redirect URI reported to the provider exchange; the service only checks
/// that it is a well-formed URL for id-token grants.
const PROVIDER_REQUEST_URI: &str = "http://localhost";

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct SignUpRequest<'a> {
    email: &'a str,
    password: &'a str,
    return_secure_token: bool,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct UpdateProfileRequest<'a> {
    id_token: &'a str,
    display_name: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    photo_url: Option<&'a str>,
    return_secure_token: bool,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct SignInWithIdpRequest<'a> {
    post_body: &'a str,
    request_uri: &'a str,
    return_secure_token: bool,
    return_idp_credential: bool,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct AccountResponse {
    local_id: String,
    #[serde(default)]
    email: Option<String>,
    #[serde(default)]
    display_name: Option<String>,
    #[serde(default)]
    photo_url: Option<String>,
    #[serde(default)]
    id_token: Option<String>,
}

impl AccountResponse {
    fn into_account(self) -> Result<Account, IdentityError> {
        let id_token = self.id_token.ok_or_else(|| {
            IdentityError::Transport(AppError::Parse(
                "Identity response did not include an id token.".to_string(),
            ))
        })?;

        Ok(Account {
            local_id: self.local_id,
            email: self.email,
            display_name: self.display_name,
            photo_url: self.photo_url,
            id_token: SecretString::from(id_token),
        })
    }
}

#[derive(Clone, Debug)]
pub struct IdentityClient {
    http: Client,
    base_url: Url,
    api_key: SecretString,
    session: SessionStore,
}

impl IdentityClient {
    /// Builds a client for `base_url` that records sessions in `session`.
    ///
    /// # Errors
    /// Returns `AppError::Config` if the HTTP client cannot be built.
    pub fn new(base_url: Url, api_key: SecretString, session: SessionStore) -> Result<Self, AppError> {
        Ok(Self {
            http: build_client()?,
            base_url,
            api_key,
            session,
        })
    }

    #[must_use]
    pub fn session(&self) -> &SessionStore {
        &self.session
    }

    /// Builds `{base}/v1/accounts:{method}?key=...`.
    fn endpoint(&self, method: &str) -> Result<Url, AppError> {
        let raw = build_url_with_base(self.base_url.as_str(), &format!("/v1/accounts:{method}"));
        let mut url = Url::parse(&raw)
            .map_err(|err| AppError::Config(format!("Invalid identity endpoint: {err}")))?;

        let key = self.api_key.expose_secret();
        if !key.is_empty() {
            url.query_pairs_mut().append_pair("key", key);
        }

        Ok(url)
    }
}

/// Form-encodes the provider credential the way the sign-in exchange expects.
fn provider_post_body(provider: &ExternalProvider) -> String {
    match provider {
        ExternalProvider::Google { id_token } => url::form_urlencoded::Serializer::new(String::new())
            .append_pair("id_token", id_token.expose_secret())
            .append_pair("providerId", provider.provider_id())
            .finish(),
    }
}

#[async_trait]
impl IdentityProvider for IdentityClient {
    #[instrument(skip(self, password))]
    async fn create_account(&self, email: &str, password: &str) -> Result<Account, IdentityError> {
        let url = self.endpoint("signUp")?;
        let request = SignUpRequest {
            email,
            password,
            return_secure_token: true,
        };

        let response: AccountResponse = post_json(&self.http, &url, &request).await?;
        let account = response.into_account()?;
        debug!(local_id = %account.local_id, "account created");

        self.session.set(account.clone());
        Ok(account)
    }

    #[instrument(skip(self, account), fields(local_id = %account.local_id))]
    async fn update_profile(
        &self,
        account: &Account,
        profile: &ProfileUpdate,
    ) -> Result<(), IdentityError> {
        let url = self.endpoint("update")?;
        let request = UpdateProfileRequest {
            id_token: account.id_token.expose_secret(),
            display_name: &profile.display_name,
            photo_url: profile.photo_url.as_deref(),
            return_secure_token: false,
        };

        let response: AccountResponse = post_json(&self.http, &url, &request).await?;
        debug!(local_id = %response.local_id, "profile updated");

        let display_name = response
            .display_name
            .unwrap_or_else(|| profile.display_name.clone());
        let photo_url = response.photo_url.or_else(|| profile.photo_url.clone());
        self.session.update(&account.local_id, |current| {
            current.display_name = Some(display_name);
            current.photo_url = photo_url;
        });

        Ok(())
    }

    #[instrument(skip(self, provider), fields(provider = provider.provider_id()))]
    async fn sign_in_with_provider(
        &self,
        provider: &ExternalProvider,
    ) -> Result<Account, IdentityError> {
        let url = self.endpoint("signInWithIdp")?;
        let post_body = provider_post_body(provider);
        let request = SignInWithIdpRequest {
            post_body: &post_body,
            request_uri: PROVIDER_REQUEST_URI,
            return_secure_token: true,
            return_idp_credential: true,
        };

        let response: AccountResponse = post_json(&self.http, &url, &request).await?;
        let account = response.into_account()?;
        debug!(local_id = %account.local_id, "provider sign-in complete");

        self.session.set(account.clone());
        Ok(account)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client(base: &str, key: &str) -> Result<IdentityClient, Box<dyn std::error::Error>> {
        Ok(IdentityClient::new(
            Url::parse(base)?,
            SecretString::from(key.to_string()),
            SessionStore::new(),
        )?)
    }

    #[test]
    fn endpoint_appends_method_and_key() -> Result<(), Box<dyn std::error::Error>> {
        let client = client("https://identitytoolkit.googleapis.com", "abc123")?;
        assert_eq!(
            client.endpoint("signUp")?.as_str(),
            "https://identitytoolkit.googleapis.com/v1/accounts:signUp?key=abc123"
        );
        Ok(())
    }

    #[test]
    fn endpoint_keeps_base_path_and_skips_empty_key() -> Result<(), Box<dyn std::error::Error>> {
        let client = client("http://localhost:9099/identitytoolkit.googleapis.com/", "")?;
        assert_eq!(
            client.endpoint("update")?.as_str(),
            "http://localhost:9099/identitytoolkit.googleapis.com/v1/accounts:update"
        );
        Ok(())
    }

    #[test]
    fn provider_post_body_is_form_encoded() {
        let provider = ExternalProvider::Google {
            id_token: SecretString::from("a b&c".to_string()),
        };
        assert_eq!(
            provider_post_body(&provider),
            "id_token=a+b%26c&providerId=google.com"
        );
    }

    #[test]
    fn account_response_requires_id_token() {
        let response: Result<AccountResponse, _> =
            serde_json::from_str(r#"{"localId":"uid-1","email":"ada@x.com"}"#);
        let Ok(response) = response else {
            panic!("response should decode");
        };
        assert!(response.into_account().is_err());
    }
}
