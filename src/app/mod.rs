//! Shared plumbing for HTTP access, configuration and transport errors.
//!
//! Feature clients go through [`api`] so every request carries the same user
//! agent, timeout and error mapping. Configuration values are public except the
//! identity API key, which stays wrapped in a `SecretString`.

pub mod api;
pub mod config;
pub mod errors;

pub use api::{build_client, build_url_with_base, get_json, post_json};
pub use config::AppConfig;
pub use errors::AppError;
