//! Candelle storefront CLI

use std::{io, process};

use candelle::{
    cli,
    config::{Config, ConfigError},
    logging,
};

/// Candelle storefront CLI entry point
///
/// Loads configuration from the environment and arguments, initialises logging, then runs the
/// requested command against the catalog and the saved cart. Exits non-zero on failure.
pub fn main() {
    let config = match Config::load() {
        Ok(config) => config,
        Err(ConfigError::Args(error)) => error.exit(),
    };

    if let Err(error) = logging::init(&config.logging) {
        fail(&error);
    }

    let stdout = io::stdout();
    let mut out = stdout.lock();

    if let Err(error) = cli::run(config, &mut out) {
        tracing::error!("command failed: {error}");

        fail(&error);
    }
}

#[expect(
    clippy::print_stderr,
    clippy::exit,
    reason = "errors are reported on stderr before exiting non-zero"
)]
fn fail(error: &dyn std::error::Error) -> ! {
    eprintln!("{error}");

    process::exit(1)
}
