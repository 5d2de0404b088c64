// src/main.rs

use clap::Parser;
use tracing::{debug, error};

use std::process::ExitCode;

use ucs_figures::cli::{run, Cli};
use ucs_figures::crate_version;
use ucs_figures::logging::{init_subscriber, Verbosity};

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_subscriber(Verbosity::from_flags(cli.verbose, cli.quiet));
    debug!(version = crate_version(), "ucs-figures");

    match run(&cli) {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => {
            error!("one or more figures failed to render");
            ExitCode::FAILURE
        }
        Err(e) => {
            error!("{e}");
            ExitCode::FAILURE
        }
    }
}

// src/main.rs
