//! Application orchestration layer
//!
//! This module coordinates between configuration, the sheet model, the
//! input layer and the platform. It owns the playback loop and the mapping
//! from outcomes to exit codes.

pub mod error;
pub mod playback;
pub mod runner;

pub use runner::Runner;
