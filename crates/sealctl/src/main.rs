//! `sealctl`: operator CLI over the `sealer` library.
//!
//! Startup sequence:
//! 1. Parse arguments.
//! 2. Load [`Config`] from the environment (skipped for `generate-key`).
//! 3. Initialise structured logging on stderr.
//! 4. Run the command and print its result on stdout.

mod cli;

use anyhow::Result;
use clap::Parser;
use sealer::{Config, Encrypter};
use tracing::debug;

use cli::Cli;

fn main() -> Result<()> {
    let cli = Cli::parse();

    if !cli.command.needs_keys() {
        println!("{}", cli::run(cli.command, None)?);
        return Ok(());
    }

    let cfg = Config::from_env().map_err(|e| {
        // Telemetry is not yet up; write to stderr directly.
        eprintln!("ERROR: configuration invalid: {e:#}");
        e
    })?;
    sealer::telemetry::init(&cfg.log_level)?;

    let encrypter = Encrypter::new(cfg.key_ring()?);
    debug!(
        version = env!("CARGO_PKG_VERSION"),
        keys = encrypter.keys().len(),
        "sealctl ready"
    );

    let output = cli::run(cli.command, Some(&encrypter)).map_err(|e| {
        if let Some(err) = e.downcast_ref::<common::SealError>() {
            eprintln!("ERROR [{}]: {err}", err.code());
        }
        e
    })?;
    println!("{output}");
    Ok(())
}
