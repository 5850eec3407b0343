//! Configuration module for sheet-player
//!
//! Everything the player needs is given on the command line. This module
//! holds the resulting settings and the argument parser that builds them.

pub mod args;
pub mod player;

pub use args::{Command, USAGE};
pub use player::{PlayerConfig, Timing};
