// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2025 Blackman Artificial Intelligence Technologies Inc.

//! mapstore-migrate - entry point of the CLI.

use clap::Parser;
use tracing_subscriber::EnvFilter;

use mapstore_migrate::cli::Cli;
use mapstore_migrate::config::{DataDir, RuleTable, RunOptions};
use mapstore_migrate::drivers;
use mapstore_migrate::error::Result;

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // The output is the report itself: no timestamps, no targets.
    // `RUST_LOG` still takes precedence.
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .without_time()
        .with_target(false)
        .init();

    let rules = RuleTable::load_from(&cli.config)?;
    let options = RunOptions::new(rules, cli.dryrun);
    let datadir = DataDir::from_env();
    tracing::debug!("using data directory {}", datadir.root().display());

    drivers::run(&datadir, &options).await
}
