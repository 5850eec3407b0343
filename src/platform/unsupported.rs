//! Fallback for targets without an input backend
//!
//! Sheets still load and tokenize, but any attempt to play them fails with
//! an `Unsupported` error.

use super::Platform;
use crate::input::{CancelFlag, CancelKey, InputError, KeySink, ListenerError};

#[derive(Debug, Default)]
pub struct UnsupportedPlatform;

/// Never constructed
#[derive(Debug)]
pub enum NoSink {}

impl KeySink for NoSink {
    fn key_down(&mut self, _key: char) -> Result<(), InputError> {
        match *self {}
    }

    fn key_up(&mut self, _key: char) -> Result<(), InputError> {
        match *self {}
    }
}

/// Never constructed
#[derive(Debug)]
pub enum NoListener {}

impl Platform for UnsupportedPlatform {
    type Sink = NoSink;
    type Listener = NoListener;

    fn key_sink(&mut self) -> Result<NoSink, InputError> {
        Err(InputError::Unsupported)
    }

    fn listen(&mut self, _key: CancelKey, _flag: CancelFlag) -> Result<NoListener, ListenerError> {
        Err(ListenerError::Unsupported)
    }
}
