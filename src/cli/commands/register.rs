use crate::features::auth::{ExternalProvider, RegistrationInput};
use clap::{Arg, ArgMatches, Command};
use secrecy::SecretString;

pub const CMD_REGISTER: &str = "register";
pub const CMD_REGISTER_PROVIDER: &str = "register-provider";

pub const ARG_NAME: &str = "name";
pub const ARG_EMAIL: &str = "email";
pub const ARG_PASSWORD: &str = "password";
pub const ARG_CONFIRM_PASSWORD: &str = "confirm-password";
pub const ARG_PHOTO_URL: &str = "photo-url";
pub const ARG_PROVIDER: &str = "provider";
pub const ARG_ID_TOKEN: &str = "id-token";

/// Builds the registration input exactly as typed; missing flags become empty
/// fields so the registration rules, not clap, decide what is acceptable.
#[must_use]
pub fn input(matches: &ArgMatches) -> RegistrationInput {
    let value = |id: &str| matches.get_one::<String>(id).cloned().unwrap_or_default();

    let input = RegistrationInput::new(
        value(ARG_NAME),
        value(ARG_EMAIL),
        value(ARG_PASSWORD),
        value(ARG_CONFIRM_PASSWORD),
    );

    match matches.get_one::<String>(ARG_PHOTO_URL) {
        Some(url) => input.with_photo_url(url.clone()),
        None => input,
    }
}

/// Reads the provider credential.
///
/// # Errors
/// Returns an error if the id token is missing or blank.
pub fn provider(matches: &ArgMatches) -> anyhow::Result<ExternalProvider> {
    let id_token = matches
        .get_one::<String>(ARG_ID_TOKEN)
        .filter(|token| !token.trim().is_empty())
        .cloned()
        .ok_or_else(|| anyhow::anyhow!("missing required argument: --{ARG_ID_TOKEN}"))?;

    match matches.get_one::<String>(ARG_PROVIDER).map(String::as_str) {
        Some("google") | None => Ok(ExternalProvider::Google {
            id_token: SecretString::from(id_token),
        }),
        Some(other) => anyhow::bail!("unsupported provider: {other}"),
    }
}

#[must_use]
pub fn register_command() -> Command {
    Command::new(CMD_REGISTER)
        .about("Create an account with email and password")
        .arg(Arg::new(ARG_NAME).long(ARG_NAME).help("Display name"))
        .arg(Arg::new(ARG_EMAIL).long(ARG_EMAIL).help("Email address"))
        .arg(
            Arg::new(ARG_PASSWORD)
                .long(ARG_PASSWORD)
                .help("Password: 6+ characters, one capital letter, one of !@#$%^&*")
                .env("CLASSHUB_PASSWORD")
                .hide_env_values(true),
        )
        .arg(
            Arg::new(ARG_CONFIRM_PASSWORD)
                .long(ARG_CONFIRM_PASSWORD)
                .help("Password again")
                .env("CLASSHUB_CONFIRM_PASSWORD")
                .hide_env_values(true),
        )
        .arg(
            Arg::new(ARG_PHOTO_URL)
                .long(ARG_PHOTO_URL)
                .help("Profile photo URL"),
        )
}

#[must_use]
pub fn register_provider_command() -> Command {
    Command::new(CMD_REGISTER_PROVIDER)
        .about("Register through a third-party identity provider")
        .arg(
            Arg::new(ARG_PROVIDER)
                .long(ARG_PROVIDER)
                .help("Identity provider")
                .default_value("google")
                .value_parser(["google"]),
        )
        .arg(
            Arg::new(ARG_ID_TOKEN)
                .long(ARG_ID_TOKEN)
                .help("Id token returned by the provider sign-in")
                .env("CLASSHUB_PROVIDER_ID_TOKEN")
                .hide_env_values(true),
        )
}
