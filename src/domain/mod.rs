//! Domain logic and core data structures
//!
//! This module contains the pure sheet model. It is independent of Win32
//! APIs and of any timing, so everything here is testable in isolation.

pub mod sheet;

pub use sheet::{Token, tokenize};
