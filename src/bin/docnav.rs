//! Docnav CLI Binary
//!
//! Interactive shell for browsing and editing a remote document tree.

use anyhow::Context;
use clap::Parser;
use docnav::logging::init_logging;
use docnav::tooling::{run_shell, Cli};
use std::process;

fn main() {
    let cli = Cli::parse();

    if let Err(e) = run(&cli) {
        eprintln!("Error: {:#}", e);
        process::exit(1);
    }
}

fn run(cli: &Cli) -> anyhow::Result<()> {
    let config = cli.resolve_config().context("Failed to load configuration")?;
    init_logging(Some(&config.logging), cli.log_file.clone())
        .context("Failed to initialize logging")?;

    let runtime = tokio::runtime::Runtime::new().context("Failed to create runtime")?;
    runtime
        .block_on(run_shell(cli, &config))
        .context("Shell terminated")?;
    Ok(())
}
