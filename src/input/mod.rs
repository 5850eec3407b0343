pub mod cancel;
pub mod emulator;

pub use cancel::{CancelFlag, CancelKey, ListenerError};
pub use emulator::{InputError, KeyEmulator, KeySink};
