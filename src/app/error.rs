use std::io;
use std::path::PathBuf;

use thiserror::Error;

use crate::input::{InputError, ListenerError};

/// Errors that end a run with a failure exit code
///
/// None of these are retried: a person is at the keyboard to fix the
/// invocation and try again.
#[derive(Debug, Error)]
pub enum PlayerError {
    #[error("Failed to read sheet file {}: {source}", .path.display())]
    FileRead {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Sheet {} is empty or no tokens were found", .path.display())]
    EmptySheet { path: PathBuf },

    #[error(transparent)]
    Input(#[from] InputError),

    #[error(transparent)]
    Listener(#[from] ListenerError),
}

impl PlayerError {
    pub const EXIT_CODE: u8 = 1;

    pub fn exit_code(&self) -> u8 {
        Self::EXIT_CODE
    }
}
