use crate::app::AppConfig;
use crate::cli::{
    actions::{Action, classes, register},
    commands::{self, endpoints},
};
use anyhow::{Context, Result, anyhow};

/// # Errors
/// Returns an error if no known subcommand was given or an argument is unusable.
pub fn handler(matches: &clap::ArgMatches) -> Result<Action> {
    let (name, sub) = matches
        .subcommand()
        .context("missing subcommand, see --help")?;

    // Endpoint args are global, so the subcommand matches carry them too.
    let config = AppConfig::load().with_overrides(endpoints::parse(sub));

    match name {
        commands::register::CMD_REGISTER => Ok(Action::Register(register::Args {
            config,
            method: register::Method::Password(commands::register::input(sub)),
        })),
        commands::register::CMD_REGISTER_PROVIDER => Ok(Action::Register(register::Args {
            config,
            method: register::Method::Provider(commands::register::provider(sub)?),
        })),
        commands::CMD_CLASSES => Ok(Action::Classes(classes::Args { config })),
        other => Err(anyhow!("unknown subcommand: {other}")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn action(args: &[&str]) -> Result<Action> {
        let matches = commands::new().try_get_matches_from(args)?;
        handler(&matches)
    }

    #[test]
    fn classes_uses_courses_override() -> Result<()> {
        temp_env::with_vars([("CLASSHUB_COURSES_URL", None::<&str>)], || {
            let action = action(&["classhub", "classes", "--courses-url", "http://c.tld/list"])?;
            let Action::Classes(args) = action else {
                panic!("expected classes action");
            };
            assert_eq!(args.config.courses_url.as_str(), "http://c.tld/list");
            Ok(())
        })
    }

    #[test]
    fn register_provider_without_token_fails() {
        temp_env::with_vars([("CLASSHUB_PROVIDER_ID_TOKEN", None::<&str>)], || {
            assert!(action(&["classhub", "register-provider"]).is_err());
        });
    }

    #[test]
    fn register_carries_redirect() -> Result<()> {
        temp_env::with_vars([("CLASSHUB_REDIRECT", None::<&str>)], || {
            let action = action(&["classhub", "register", "--redirect", "/classes", "--name", "Ada"])?;
            let Action::Register(args) = action else {
                panic!("expected register action");
            };
            assert_eq!(args.config.redirect_target.as_deref(), Some("/classes"));
            assert!(matches!(args.method, register::Method::Password(ref input) if input.name == "Ada"));
            Ok(())
        })
    }
}
