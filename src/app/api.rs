//! HTTP helpers for JSON APIs with consistent timeouts and error handling. Feature
//! clients use these helpers to avoid duplicating request setup and to enforce a
//! predictable timeout policy. The helpers never log request bodies; callers pass
//! credentials in bodies or query strings and those must stay out of the logs.

use super::errors::AppError;
use crate::APP_USER_AGENT;
use reqwest::{Client, Response};
use serde::{Serialize, de::DeserializeOwned};
use std::time::Duration;
use tracing::debug;
use url::Url;

/// Default request timeout applied to every client built here.
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// Builds the shared HTTP client with the crate user agent and timeout.
///
/// # Errors
/// Returns `AppError::Config` if the TLS backend cannot be initialized.
pub fn build_client() -> Result<Client, AppError> {
    Client::builder()
        .user_agent(APP_USER_AGENT)
        .timeout(DEFAULT_TIMEOUT)
        .build()
        .map_err(|err| AppError::Config(format!("Failed to build HTTP client: {err}")))
}

/// Fetches JSON from `url` without query parameters or extra headers.
///
/// # Errors
/// Returns transport, HTTP status or decoding errors.
pub async fn get_json<T: DeserializeOwned>(client: &Client, url: &Url) -> Result<T, AppError> {
    debug!(url = %redacted(url), "GET");
    let response = client
        .get(url.clone())
        .send()
        .await
        .map_err(AppError::from_request)?;

    handle_json_response(response).await
}

/// Posts a JSON body and parses a JSON response.
///
/// # Errors
/// Returns transport, HTTP status or decoding errors.
pub async fn post_json<B: Serialize + ?Sized, T: DeserializeOwned>(
    client: &Client,
    url: &Url,
    body: &B,
) -> Result<T, AppError> {
    let payload = serde_json::to_vec(body)
        .map_err(|err| AppError::Serialization(format!("Failed to encode request: {err}")))?;

    debug!(url = %redacted(url), "POST");
    let response = client
        .post(url.clone())
        .header(reqwest::header::CONTENT_TYPE, "application/json")
        .body(payload)
        .send()
        .await
        .map_err(AppError::from_request)?;

    handle_json_response(response).await
}

/// Builds a URL from an explicit base URL and the provided path.
#[must_use]
pub fn build_url_with_base(base_url: &str, path: &str) -> String {
    let base = base_url.trim().trim_end_matches('/');
    let path = path.trim();

    if base.is_empty() {
        path.to_string()
    } else {
        format!("{}/{}", base, path.trim_start_matches('/'))
    }
}

/// Strips the query string so API keys never reach the logs.
fn redacted(url: &Url) -> String {
    let mut clean = url.clone();
    clean.set_query(None);
    clean.to_string()
}

/// Parses JSON responses and surfaces HTTP errors with sanitized bodies.
async fn handle_json_response<T: DeserializeOwned>(response: Response) -> Result<T, AppError> {
    let status = response.status();
    if status.is_success() {
        response
            .json::<T>()
            .await
            .map_err(|err| AppError::Parse(format!("Failed to decode response: {err}")))
    } else {
        let body = response.text().await.unwrap_or_default();
        Err(AppError::from_status(status.as_u16(), &body))
    }
}
