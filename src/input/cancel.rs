//! Cooperative playback cancellation
//!
//! The listener thread is the only writer of a [`CancelFlag`] and the
//! playback loop the only reader. The loop polls it at checkpoints and never
//! waits on the listener.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

/// Shared stop signal between the cancel listener and the playback loop
///
/// Clones share the same underlying flag.
#[derive(Debug, Clone, Default)]
pub struct CancelFlag {
    cancelled: Arc<AtomicBool>,
}

impl CancelFlag {
    pub fn new() -> Self {
        Self::default()
    }

    /// Requests that playback stop at its next checkpoint
    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::Release);
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::Acquire)
    }
}

/// Keys that can stop playback, as Windows virtual key codes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CancelKey {
    Escape = 0x1B,
}

impl CancelKey {
    #[cfg(any(windows, test))]
    pub fn vk_code(self) -> u32 {
        self as u32
    }

    pub fn name(self) -> &'static str {
        match self {
            CancelKey::Escape => "Esc",
        }
    }
}

/// Errors raised while starting the cancel listener
#[derive(Debug, thiserror::Error)]
#[cfg_attr(not(windows), allow(dead_code))]
pub enum ListenerError {
    #[error("Failed to install keyboard hook")]
    HookInstallFailed,

    #[error("A cancel listener is already active")]
    AlreadyActive,

    #[error("Failed to spawn listener thread: {0}")]
    ThreadSpawnFailed(#[source] std::io::Error),

    #[error("Keyboard listening is not supported on this platform")]
    Unsupported,
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::thread;

    #[test]
    fn flag_starts_clear() {
        assert!(!CancelFlag::new().is_cancelled());
    }

    #[test]
    fn clones_share_state() {
        let flag = CancelFlag::new();
        let listener_side = flag.clone();
        listener_side.cancel();
        assert!(flag.is_cancelled());
    }

    #[test]
    fn cancel_is_visible_across_threads() {
        let flag = CancelFlag::new();
        let writer = flag.clone();
        thread::spawn(move || writer.cancel()).join().unwrap();
        assert!(flag.is_cancelled());
    }

    #[test]
    fn escape_maps_to_vk_escape() {
        assert_eq!(CancelKey::Escape.vk_code(), 0x1B);
        assert_eq!(CancelKey::Escape.name(), "Esc");
    }
}
