mod app;
mod config;
mod domain;
mod input;
mod platform;

use std::io;
use std::process::ExitCode;

use crate::app::Runner;
use crate::platform::NativePlatform;

fn main() -> ExitCode {
    let mut runner = Runner::new(NativePlatform::default(), io::stdout(), io::stderr());
    ExitCode::from(runner.run_cli(std::env::args().skip(1)))
}
