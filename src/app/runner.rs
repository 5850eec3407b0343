//! Entry point orchestration
//!
//! The runner turns a command line into an exit code: parse, load the
//! sheet, count down, then play with the cancel listener held for exactly
//! the duration of playback.

use std::fmt;
use std::fs;
use std::io::Write;
use std::path::Path;
use std::thread;
use std::time::Duration;

use crate::app::error::PlayerError;
use crate::app::playback::{self, PlaybackReport};
use crate::config::{Command, PlayerConfig, USAGE};
use crate::domain::{Token, tokenize};
use crate::input::{CancelFlag, CancelKey, KeyEmulator};
use crate::platform::Platform;

pub const EXIT_SUCCESS: u8 = 0;
pub const EXIT_USAGE: u8 = 2;

const CANCEL_KEY: CancelKey = CancelKey::Escape;

/// Runs the player against a platform, writing status to `out` and errors
/// to `err`
pub struct Runner<P, O, E> {
    platform: P,
    out: O,
    err: E,
    countdown_tick: Duration,
}

impl<P: Platform, O: Write, E: Write> Runner<P, O, E> {
    pub fn new(platform: P, out: O, err: E) -> Self {
        Self {
            platform,
            out,
            err,
            countdown_tick: Duration::from_secs(1),
        }
    }

    /// Length of one countdown step
    #[cfg(test)]
    pub fn with_countdown_tick(mut self, tick: Duration) -> Self {
        self.countdown_tick = tick;
        self
    }

    /// Parses `args` (without the program name) and runs accordingly
    pub fn run_cli<I, S>(&mut self, args: I) -> u8
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        match PlayerConfig::from_args(args) {
            Ok(Command::Play(config)) => self.run(&config),
            Ok(Command::Help) => {
                self.status(format_args!("{USAGE}"));
                EXIT_SUCCESS
            }
            Err(error) => {
                let _ = writeln!(self.err, "error: {error}\n\n{USAGE}");
                EXIT_USAGE
            }
        }
    }

    /// Plays the configured sheet and returns the process exit code
    ///
    /// A user-initiated stop is a success.
    pub fn run(&mut self, config: &PlayerConfig) -> u8 {
        match self.play(config) {
            Ok(report) if report.was_stopped() => {
                self.status(format_args!(
                    "Playback stopped after {} tokens.",
                    report.tokens_played
                ));
                EXIT_SUCCESS
            }
            Ok(report) => {
                self.status(format_args!(
                    "Playback finished ({} tokens).",
                    report.tokens_played
                ));
                EXIT_SUCCESS
            }
            Err(error) => {
                let _ = writeln!(self.err, "{error}");
                error.exit_code()
            }
        }
    }

    fn play(&mut self, config: &PlayerConfig) -> Result<PlaybackReport, PlayerError> {
        let tokens = load_sheet(&config.sheet_path)?;
        self.status(format_args!(
            "Loaded {} tokens from {}",
            tokens.len(),
            config.sheet_path.display()
        ));

        self.status(format_args!(
            "Focus the target window now. Press {} to stop.",
            CANCEL_KEY.name()
        ));
        self.countdown(config.countdown);

        let cancel = CancelFlag::new();
        let mut emulator = KeyEmulator::new(self.platform.key_sink()?);
        let listener = self.platform.listen(CANCEL_KEY, cancel.clone())?;

        let result = playback::play(&mut emulator, &tokens, config.timing, &cancel);
        // Stop listening before reporting, on success and failure alike
        drop(listener);

        Ok(result?)
    }

    fn countdown(&mut self, seconds: u32) {
        for remaining in (1..=seconds).rev() {
            self.status(format_args!("Starting in {remaining}..."));
            thread::sleep(self.countdown_tick);
        }
    }

    fn status(&mut self, line: fmt::Arguments<'_>) {
        let _ = writeln!(self.out, "{line}");
    }
}

/// Reads and tokenizes a sheet file
///
/// An unreadable file (missing, permission denied, not UTF-8) and a file
/// without any token are both errors.
pub fn load_sheet(path: &Path) -> Result<Vec<Token>, PlayerError> {
    let text = fs::read_to_string(path).map_err(|source| PlayerError::FileRead {
        path: path.to_path_buf(),
        source,
    })?;

    let tokens = tokenize(&text);
    if tokens.is_empty() {
        return Err(PlayerError::EmptySheet {
            path: path.to_path_buf(),
        });
    }
    Ok(tokens)
}
