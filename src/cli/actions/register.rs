use crate::app::AppConfig;
use crate::features::auth::{
    ExternalProvider, IdentityClient, Navigation, RegistrationError, RegistrationFlow,
    RegistrationInput, SessionStore,
};
use anyhow::{Context, Result, anyhow};
use std::sync::Arc;
use tracing::debug;

#[derive(Debug)]
pub enum Method {
    Password(RegistrationInput),
    Provider(ExternalProvider),
}

#[derive(Debug)]
pub struct Args {
    pub config: AppConfig,
    pub method: Method,
}

/// Runs one registration against the configured identity service.
/// # Errors
/// Returns an error if the input is rejected or any identity call fails.
pub async fn execute(args: Args) -> Result<()> {
    let Args { config, method } = args;

    let base_url = config
        .identity_endpoint()
        .context("invalid identity service URL")?;
    let session = SessionStore::new();
    let client = IdentityClient::new(base_url, config.api_key.clone(), session.clone())?;
    let flow = RegistrationFlow::new(Arc::new(client), Arc::new(session), config.redirect_target);

    if let Some(navigation) = flow.on_mount() {
        report(&navigation);
        return Ok(());
    }

    let outcome = match method {
        Method::Password(input) => flow.submit_registration(input).await,
        Method::Provider(provider) => flow.register_with_external_provider(provider).await,
    };

    match outcome {
        Ok(navigation) => {
            report(&navigation);
            Ok(())
        }
        Err(err) => Err(failure(&err)),
    }
}

fn report(navigation: &Navigation) {
    if let Some(notification) = &navigation.notification {
        println!("{}: {}", notification.title, notification.text);
    }
    println!("Continue at {}", navigation.target);
}

fn failure(err: &RegistrationError) -> anyhow::Error {
    if let Some(message) = err.user_message() {
        return anyhow!(message);
    }
    debug!(unhandled = err.is_unhandled(), "registration did not complete");
    anyhow!("{err}")
}
