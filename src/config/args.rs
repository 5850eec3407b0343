//! Command-line parsing
//!
//! `sheet-player [SHEET] [--delay SECS] [--intra-delay SECS] [--countdown SECS]`
//!
//! Flags accept their value either as the next argument or inline after `=`.

use std::path::PathBuf;
use std::time::Duration;

use thiserror::Error;

use super::player::PlayerConfig;

pub const USAGE: &str = "\
Play piano sheets by emulating key presses.

Usage: sheet-player [SHEET] [OPTIONS]

Arguments:
  [SHEET]               Path to a text file with piano sheets (default: song.txt)

Options:
  --delay SECS          Delay between tokens in seconds (default: 0.2)
  --intra-delay SECS    Delay between characters inside a non-bracket token (default: 0)
  --countdown SECS      Seconds to wait before playback starts (default: 5)
  -h, --help            Print this help";

/// Errors in the command line itself
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    #[error("unrecognized option '{0}'")]
    UnknownFlag(String),

    #[error("option '{0}' requires a value")]
    MissingValue(String),

    #[error("invalid value '{value}' for '{flag}'")]
    InvalidNumber { flag: String, value: String },

    #[error("'{flag}' must be a non-negative number of seconds, got {value}")]
    NegativeDelay { flag: String, value: f64 },

    #[error("unexpected extra argument '{0}'")]
    UnexpectedArgument(String),
}

/// What the command line asks for
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    Play(PlayerConfig),
    Help,
}

impl PlayerConfig {
    /// Parses program arguments, excluding the program name
    pub fn from_args<I, S>(args: I) -> Result<Command, ConfigError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut config = PlayerConfig::default();
        let mut sheet: Option<String> = None;
        let mut args = args.into_iter().map(Into::into);

        while let Some(arg) = args.next() {
            if arg == "-h" || arg == "--help" {
                return Ok(Command::Help);
            }

            if !arg.starts_with("--") {
                if sheet.is_some() {
                    return Err(ConfigError::UnexpectedArgument(arg));
                }
                sheet = Some(arg);
                continue;
            }

            let (flag, inline) = match arg.split_once('=') {
                Some((flag, value)) => (flag.to_string(), Some(value.to_string())),
                None => (arg, None),
            };
            let mut value = || {
                inline
                    .clone()
                    .or_else(|| args.next())
                    .ok_or_else(|| ConfigError::MissingValue(flag.clone()))
            };

            match flag.as_str() {
                "--delay" => config.timing.token_delay = parse_seconds(&flag, &value()?)?,
                "--intra-delay" => config.timing.key_delay = parse_seconds(&flag, &value()?)?,
                "--countdown" => config.countdown = parse_countdown(&flag, &value()?)?,
                _ => return Err(ConfigError::UnknownFlag(flag.clone())),
            }
        }

        if let Some(sheet) = sheet {
            config.sheet_path = PathBuf::from(sheet);
        }
        Ok(Command::Play(config))
    }
}

fn parse_seconds(flag: &str, value: &str) -> Result<Duration, ConfigError> {
    let seconds: f64 = value.trim().parse().map_err(|_| ConfigError::InvalidNumber {
        flag: flag.to_string(),
        value: value.to_string(),
    })?;

    if !seconds.is_finite() {
        return Err(ConfigError::InvalidNumber {
            flag: flag.to_string(),
            value: value.to_string(),
        });
    }
    if seconds < 0.0 {
        return Err(ConfigError::NegativeDelay {
            flag: flag.to_string(),
            value: seconds,
        });
    }
    Duration::try_from_secs_f64(seconds).map_err(|_| ConfigError::InvalidNumber {
        flag: flag.to_string(),
        value: value.to_string(),
    })
}

/// Countdown is whole seconds; zero or negative means start immediately
fn parse_countdown(flag: &str, value: &str) -> Result<u32, ConfigError> {
    let seconds: i64 = value.trim().parse().map_err(|_| ConfigError::InvalidNumber {
        flag: flag.to_string(),
        value: value.to_string(),
    })?;
    Ok(seconds.clamp(0, u32::MAX as i64) as u32)
}
