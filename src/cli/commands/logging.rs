use clap::{Arg, ArgAction, Command, builder::ValueParser};

pub const ARG_VERBOSITY: &str = "verbosity";
pub const ARG_LOG_JSON: &str = "log-json";

/// Level names accepted in `CLASSHUB_LOG_LEVEL`, indexed by verbosity count.
const LEVEL_NAMES: [&str; 5] = ["error", "warn", "info", "debug", "trace"];

/// Accepts a level name or a count between 0 and 5.
fn parse_log_level(level: &str) -> Result<u8, String> {
    if let Ok(count) = level.trim().parse::<u8>() {
        return if count <= 5 {
            Ok(count)
        } else {
            Err(format!("log level count must be 0-5, got {count}"))
        };
    }

    let wanted = level.trim().to_lowercase();
    LEVEL_NAMES
        .iter()
        .position(|name| *name == wanted)
        .and_then(|index| u8::try_from(index).ok())
        .ok_or_else(|| format!("invalid log level: {level}"))
}

#[must_use]
pub fn validator_log_level() -> ValueParser {
    ValueParser::from(parse_log_level)
}

#[must_use]
pub fn with_args(command: Command) -> Command {
    command.arg(
        Arg::new(ARG_VERBOSITY)
            .short('v')
            .long("verbose")
            .help("Verbosity level: ERROR, WARN, INFO, DEBUG, TRACE (default: ERROR)")
            .env("CLASSHUB_LOG_LEVEL")
            .global(true)
            .action(ArgAction::Count)
            .value_parser(validator_log_level()),
    )
    .arg(
        Arg::new(ARG_LOG_JSON)
            .long(ARG_LOG_JSON)
            .help("Write logs as JSON lines")
            .env("CLASSHUB_LOG_JSON")
            .global(true)
            .action(ArgAction::SetTrue),
    )
}
