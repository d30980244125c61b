#![allow(clippy::print_stderr)]

use clap::Parser;
use std::process::ExitCode;

use csymtab::cli::args::CliArgs;
use csymtab::cli::driver;

fn main() -> ExitCode {
    // Initialize tracing if CSYM_LOG or RUST_LOG is set (zero cost otherwise).
    // Supports CSYM_LOG_FORMAT=tree|json|text (see src/tracing_config.rs).
    csymtab::tracing_config::init_tracing();

    let args = CliArgs::parse();
    match driver::run(&args) {
        Ok(out) => {
            print!("{out}");
            ExitCode::SUCCESS
        }
        Err(err) => {
            eprintln!("error: {err:#}");
            ExitCode::FAILURE
        }
    }
}
