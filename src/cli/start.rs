use crate::cli::{actions::Action, commands, dispatch::handler, telemetry};
use anyhow::Result;
use tracing::Level;

fn verbosity(count: u8) -> Level {
    match count {
        0 => Level::ERROR,
        1 => Level::WARN,
        2 => Level::INFO,
        3 => Level::DEBUG,
        _ => Level::TRACE,
    }
}

/// Start the CLI
/// # Errors
/// Returns an error if logging cannot be installed or the arguments are unusable.
pub fn start() -> Result<Action> {
    let matches = commands::new().get_matches();

    let verbosity_level = matches
        .get_one::<u8>(commands::logging::ARG_VERBOSITY)
        .copied()
        .map(verbosity);

    let json = matches.get_flag(commands::logging::ARG_LOG_JSON);

    telemetry::init(verbosity_level, json)?;

    handler(&matches)
}
