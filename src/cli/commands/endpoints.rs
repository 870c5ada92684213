use crate::app::config::{RuntimeConfig, normalize_runtime_value};
use clap::{Arg, ArgMatches, Command};
use secrecy::SecretString;

pub const ARG_COURSES_URL: &str = "courses-url";
pub const ARG_IDENTITY_URL: &str = "identity-url";
pub const ARG_API_KEY: &str = "api-key";
pub const ARG_REDIRECT: &str = "redirect";

/// Collects endpoint overrides; blank values (e.g. `CLASSHUB_API_KEY=""`)
/// leave the build-time defaults in place.
#[must_use]
pub fn parse(matches: &ArgMatches) -> RuntimeConfig {
    let get_non_empty = |id: &str| {
        matches
            .get_one::<String>(id)
            .and_then(|value| normalize_runtime_value(value))
    };

    RuntimeConfig {
        courses_url: get_non_empty(ARG_COURSES_URL),
        identity_base_url: get_non_empty(ARG_IDENTITY_URL),
        api_key: get_non_empty(ARG_API_KEY).map(SecretString::from),
        redirect_target: get_non_empty(ARG_REDIRECT),
    }
}

#[must_use]
pub fn with_args(command: Command) -> Command {
    command
        .arg(
            Arg::new(ARG_COURSES_URL)
                .long(ARG_COURSES_URL)
                .help("Course API endpoint, example: http://localhost:5000/classes")
                .env("CLASSHUB_COURSES_URL")
                .global(true),
        )
        .arg(
            Arg::new(ARG_IDENTITY_URL)
                .long(ARG_IDENTITY_URL)
                .help("Identity service base URL, example: https://identitytoolkit.googleapis.com")
                .env("CLASSHUB_IDENTITY_URL")
                .global(true),
        )
        .arg(
            Arg::new(ARG_API_KEY)
                .long(ARG_API_KEY)
                .help("Identity service API key")
                .env("CLASSHUB_API_KEY")
                .hide_env_values(true)
                .global(true),
        )
        .arg(
            Arg::new(ARG_REDIRECT)
                .long(ARG_REDIRECT)
                .help("Page to continue to after registering (default: /)")
                .env("CLASSHUB_REDIRECT")
                .global(true),
        )
}
