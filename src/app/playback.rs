//! Token playback loop
//!
//! Playback is a two-state machine: it starts `Running` and moves to the
//! terminal `Stopped` state as soon as it sees the cancel flag. The flag is
//! polled before each token and before each key of a multi-key run, so a
//! cancel lands within one key of being requested.

use std::thread;
use std::time::Duration;

use crate::config::Timing;
use crate::domain::Token;
use crate::input::{CancelFlag, InputError, KeyEmulator, KeySink};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlaybackState {
    Running,
    /// Cancelled by the user; terminal
    Stopped,
}

/// Outcome of a playback run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlaybackReport {
    /// `Running` here means every token was played
    pub state: PlaybackState,
    /// Tokens played to completion
    pub tokens_played: usize,
}

impl PlaybackReport {
    pub fn was_stopped(&self) -> bool {
        self.state == PlaybackState::Stopped
    }
}

/// Plays `tokens` in order until they run out or `cancel` is set
///
/// Returns early, mid-token if needed, once the flag is seen. An input
/// error aborts playback immediately.
pub fn play<S: KeySink>(
    emulator: &mut KeyEmulator<S>,
    tokens: &[Token],
    timing: Timing,
    cancel: &CancelFlag,
) -> Result<PlaybackReport, InputError> {
    let mut tokens_played = 0;
    let stopped = |tokens_played| PlaybackReport {
        state: PlaybackState::Stopped,
        tokens_played,
    };

    for token in tokens {
        if cancel.is_cancelled() {
            return Ok(stopped(tokens_played));
        }

        if play_token(emulator, token, timing, cancel)? == PlaybackState::Stopped {
            return Ok(stopped(tokens_played));
        }
        tokens_played += 1;

        if cancel.is_cancelled() {
            return Ok(stopped(tokens_played));
        }
        pause(timing.token_delay);
    }

    Ok(PlaybackReport {
        state: PlaybackState::Running,
        tokens_played,
    })
}

fn play_token<S: KeySink>(
    emulator: &mut KeyEmulator<S>,
    token: &Token,
    timing: Timing,
    cancel: &CancelFlag,
) -> Result<PlaybackState, InputError> {
    let keys = token.keys();
    if token.is_chord() {
        emulator.press_chord(keys)?;
        return Ok(PlaybackState::Running);
    }

    let mut chars = keys.chars();
    if let (Some(key), None) = (chars.next(), chars.next()) {
        emulator.press_single(key)?;
        return Ok(PlaybackState::Running);
    }

    for key in keys.chars() {
        if cancel.is_cancelled() {
            return Ok(PlaybackState::Stopped);
        }
        emulator.press_single(key)?;
        pause(timing.key_delay);
    }
    Ok(PlaybackState::Running)
}

fn pause(delay: Duration) {
    if !delay.is_zero() {
        thread::sleep(delay);
    }
}
