use std::path::PathBuf;
use std::time::Duration;

/// Delays applied while playing a sheet
///
/// Fixed at startup and never changed during playback.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Timing {
    /// Pause after every token
    pub token_delay: Duration,
    /// Pause after every key of a multi-key run
    pub key_delay: Duration,
}

impl Timing {
    pub const DEFAULT_TOKEN_DELAY: Duration = Duration::from_millis(200);

    pub fn new(token_delay: Duration, key_delay: Duration) -> Self {
        Self {
            token_delay,
            key_delay,
        }
    }

    /// No pauses at all
    #[cfg(test)]
    pub fn immediate() -> Self {
        Self::new(Duration::ZERO, Duration::ZERO)
    }
}

impl Default for Timing {
    fn default() -> Self {
        Self::new(Self::DEFAULT_TOKEN_DELAY, Duration::ZERO)
    }
}

/// Settings for one run of the player
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlayerConfig {
    pub sheet_path: PathBuf,
    pub timing: Timing,
    /// Seconds to wait before the first key so the user can focus the target
    pub countdown: u32,
}

impl PlayerConfig {
    pub const DEFAULT_SHEET: &'static str = "song.txt";
    pub const DEFAULT_COUNTDOWN: u32 = 5;
}

impl Default for PlayerConfig {
    fn default() -> Self {
        Self {
            sheet_path: PathBuf::from(Self::DEFAULT_SHEET),
            timing: Timing::default(),
            countdown: Self::DEFAULT_COUNTDOWN,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_documented_values() {
        let config = PlayerConfig::default();
        assert_eq!(config.sheet_path, PathBuf::from("song.txt"));
        assert_eq!(config.timing.token_delay, Duration::from_millis(200));
        assert_eq!(config.timing.key_delay, Duration::ZERO);
        assert_eq!(config.countdown, 5);
    }
}
