//! Ribbonrack - command-line tool for composing ribbon shirts

use std::process::ExitCode;

use ribbonrack::cli;

fn main() -> ExitCode {
    cli::run()
}
