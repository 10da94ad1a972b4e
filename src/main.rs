//! wkstd - project tooling bootstrapper

use std::process::ExitCode;

fn main() -> ExitCode {
    if let Err(e) = wkstd::cli::run() {
        eprintln!("Error: {:#}", e);
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    }
}
