use std::{io, process::ExitCode};

use anyhow::{Context, Result};
use clap::Parser;

use libs::util;
use seeder::{Config, cli::Args, report};

// Usage: cargo run --bin seed_admin -- --prompt
#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<ExitCode> {
    util::load_env();
    util::init_tracing();

    let args = Args::parse();
    let config = Config::load(args).context("failed to load configuration")?;
    tracing::debug!(?config, "configuration loaded");

    let outcome = report::run(&config, &mut io::stdout(), &mut io::stderr())
        .await
        .context("failed to write report")?;

    Ok(outcome.exit_code(config.strict))
}
