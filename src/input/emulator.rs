//! Key press emulation
//!
//! [`KeyEmulator`] turns characters into ordered press/release pairs and
//! hands each individual event to a [`KeySink`]. The sink is the only part
//! that talks to the OS, so press ordering is tested without it.

/// Errors raised while synthesizing keyboard input
///
/// These are fatal for a playback run: continuing after the input channel
/// broke could send the wrong keys silently.
#[derive(Debug, thiserror::Error)]
#[cfg_attr(not(windows), allow(dead_code))]
pub enum InputError {
    #[error("Failed to synthesize key event for {key:?}: {source}")]
    Rejected {
        key: char,
        #[source]
        source: std::io::Error,
    },

    #[error("Keyboard input synthesis is not supported on this platform")]
    Unsupported,
}

/// Destination for individual key transitions
pub trait KeySink {
    /// Press and hold the key producing `key`
    fn key_down(&mut self, key: char) -> Result<(), InputError>;

    /// Release the key producing `key`
    fn key_up(&mut self, key: char) -> Result<(), InputError>;
}

impl<S: KeySink + ?Sized> KeySink for &mut S {
    fn key_down(&mut self, key: char) -> Result<(), InputError> {
        (**self).key_down(key)
    }

    fn key_up(&mut self, key: char) -> Result<(), InputError> {
        (**self).key_up(key)
    }
}

/// Presses single keys and chords on top of a [`KeySink`]
#[derive(Debug)]
pub struct KeyEmulator<S> {
    sink: S,
}

impl<S: KeySink> KeyEmulator<S> {
    pub fn new(sink: S) -> Self {
        Self { sink }
    }

    /// Taps one key: press immediately followed by release
    ///
    /// Whitespace has no key and is ignored.
    pub fn press_single(&mut self, key: char) -> Result<(), InputError> {
        if key.is_whitespace() {
            return Ok(());
        }
        self.sink.key_down(key)?;
        self.sink.key_up(key)
    }

    /// Presses every key of `keys` together
    ///
    /// Keys go down in order and come back up in reverse order, so the first
    /// key is held until the last one is released. Whitespace is skipped.
    pub fn press_chord(&mut self, keys: &str) -> Result<(), InputError> {
        let keys: Vec<char> = keys.chars().filter(|ch| !ch.is_whitespace()).collect();

        for &key in &keys {
            self.sink.key_down(key)?;
        }
        for &key in keys.iter().rev() {
            self.sink.key_up(key)?;
        }
        Ok(())
    }

    #[cfg(test)]
    pub fn sink(&self) -> &S {
        &self.sink
    }

    #[cfg(test)]
    pub fn into_sink(self) -> S {
        self.sink
    }
}

#[cfg(test)]
pub(crate) mod testing {
    use super::*;
    use crate::input::CancelFlag;

    /// One key transition seen by [`RecordingSink`]
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub enum KeyAction {
        Down(char),
        Up(char),
    }

    /// Sink that records every transition instead of touching the OS
    #[derive(Debug, Default)]
    pub struct RecordingSink {
        pub actions: Vec<KeyAction>,
        cancel_after: Option<(usize, CancelFlag)>,
        fail_on: Option<char>,
    }

    impl RecordingSink {
        pub fn new() -> Self {
            Self::default()
        }

        /// Sets `flag` once `releases` key-up events have been recorded
        pub fn cancelling_after(releases: usize, flag: CancelFlag) -> Self {
            Self {
                cancel_after: Some((releases, flag)),
                ..Self::default()
            }
        }

        /// Rejects any transition of `key`
        pub fn failing_on(key: char) -> Self {
            Self {
                fail_on: Some(key),
                ..Self::default()
            }
        }

        fn record(&mut self, action: KeyAction, key: char) -> Result<(), InputError> {
            if self.fail_on == Some(key) {
                return Err(InputError::Rejected {
                    key,
                    source: std::io::Error::other("input channel closed"),
                });
            }
            self.actions.push(action);

            if let Some((releases, flag)) = &self.cancel_after {
                let seen = self
                    .actions
                    .iter()
                    .filter(|action| matches!(action, KeyAction::Up(_)))
                    .count();
                if seen >= *releases {
                    flag.cancel();
                }
            }
            Ok(())
        }
    }

    impl KeySink for RecordingSink {
        fn key_down(&mut self, key: char) -> Result<(), InputError> {
            self.record(KeyAction::Down(key), key)
        }

        fn key_up(&mut self, key: char) -> Result<(), InputError> {
            self.record(KeyAction::Up(key), key)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::testing::{KeyAction::*, RecordingSink};
    use super::*;

    #[test]
    fn single_press_is_down_then_up() {
        let mut emulator = KeyEmulator::new(RecordingSink::new());
        emulator.press_single('t').unwrap();
        assert_eq!(emulator.sink().actions, vec![Down('t'), Up('t')]);
    }

    #[test]
    fn single_press_ignores_whitespace() {
        let mut emulator = KeyEmulator::new(RecordingSink::new());
        emulator.press_single(' ').unwrap();
        emulator.press_single('\n').unwrap();
        assert!(emulator.sink().actions.is_empty());
    }

    #[test]
    fn chord_releases_in_reverse_order() {
        let mut emulator = KeyEmulator::new(RecordingSink::new());
        emulator.press_chord("ab").unwrap();
        assert_eq!(
            emulator.sink().actions,
            vec![Down('a'), Down('b'), Up('b'), Up('a')]
        );
    }

    #[test]
    fn chord_skips_whitespace_and_keeps_order() {
        let mut emulator = KeyEmulator::new(RecordingSink::new());
        emulator.press_chord("q e\tt").unwrap();
        assert_eq!(
            emulator.sink().actions,
            vec![Down('q'), Down('e'), Down('t'), Up('t'), Up('e'), Up('q')]
        );
    }

    #[test]
    fn sink_failure_propagates() {
        let mut emulator = KeyEmulator::new(RecordingSink::failing_on('b'));
        let result = emulator.press_chord("ab");
        assert!(matches!(result, Err(InputError::Rejected { key: 'b', .. })));
        assert_eq!(emulator.sink().actions, vec![Down('a')]);
    }

    #[test]
    fn works_through_a_borrowed_sink() {
        let mut sink = RecordingSink::new();
        KeyEmulator::new(&mut sink).press_single('x').unwrap();
        assert_eq!(sink.actions, vec![Down('x'), Up('x')]);
    }
}
