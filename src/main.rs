//! todo - plain-text task list manager

use std::process::ExitCode;

fn main() -> ExitCode {
    if let Err(e) = todotxt_cli::cli::run() {
        eprintln!("--\nTODO:\tERROR: {:#}", e);
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    }
}
