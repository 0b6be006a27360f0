//! Binary entrypoint that launches the Parlance server.

use std::process::ExitCode;

use parlance::start_parlance;

/// Start the translation, speech and summarization API.
fn main() -> ExitCode {
    start_parlance::run()
}
