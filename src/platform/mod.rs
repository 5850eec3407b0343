//! Platform-specific input implementations
//!
//! This module encapsulates every OS interaction: synthesizing key events
//! and listening for the cancel key. The rest of the application only sees
//! the [`Platform`] trait.

use crate::input::{CancelFlag, CancelKey, InputError, KeySink, ListenerError};

#[cfg(windows)]
mod hook;
#[cfg(windows)]
mod send_input;
#[cfg(not(windows))]
mod unsupported;

#[cfg(windows)]
pub use hook::KeyboardHook;
#[cfg(windows)]
pub use send_input::SendInputSink;
#[cfg(not(windows))]
pub use unsupported::UnsupportedPlatform;

/// Source of OS input resources for one playback run
pub trait Platform {
    /// Sink that injects key events into the foreground application
    type Sink: KeySink;
    /// Running cancel listener, stopped when dropped
    type Listener;

    fn key_sink(&mut self) -> Result<Self::Sink, InputError>;

    /// Starts observing the keyboard in the background
    ///
    /// `flag` is set once `key` is pressed. Dropping the returned listener
    /// stops it, whether or not the key was seen.
    fn listen(
        &mut self,
        key: CancelKey,
        flag: CancelFlag,
    ) -> Result<Self::Listener, ListenerError>;
}

/// Win32 input via `SendInput` and a low-level keyboard hook
#[cfg(windows)]
#[derive(Debug, Default)]
pub struct Win32Platform;

#[cfg(windows)]
impl Platform for Win32Platform {
    type Sink = SendInputSink;
    type Listener = KeyboardHook;

    fn key_sink(&mut self) -> Result<SendInputSink, InputError> {
        Ok(SendInputSink)
    }

    fn listen(&mut self, key: CancelKey, flag: CancelFlag) -> Result<KeyboardHook, ListenerError> {
        KeyboardHook::install(key, flag)
    }
}

/// Platform used by the binary on the current target
#[cfg(windows)]
pub type NativePlatform = Win32Platform;
#[cfg(not(windows))]
pub type NativePlatform = UnsupportedPlatform;
