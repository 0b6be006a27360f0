//! Parlance server binary.
//! Run with: cargo run --bin parlance-server

use std::process::ExitCode;

use parlance::start_parlance;

fn main() -> ExitCode {
    start_parlance::run()
}
