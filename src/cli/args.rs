// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2025 Blackman Artificial Intelligence Technologies Inc.

//! CLI argument definitions using Clap

use clap::Parser;
use std::path::PathBuf;

/// Default rule file, relative to the working directory.
pub const DEFAULT_RULES_FILE: &str = "config.json";

/// Process mapstore configs, maps & contexts.
#[derive(Parser, Debug)]
#[command(name = "mapstore-migrate")]
#[command(version, about = "Process mapstore configs, maps & contexts.")]
pub struct Cli {
    /// dry-run mode: report changes, persist nothing
    #[arg(short = 'd', long = "dryrun", alias = "dry-run")]
    pub dryrun: bool,

    /// json configuration file (defaults to config.json)
    #[arg(short = 'c', long = "config", default_value = DEFAULT_RULES_FILE)]
    pub config: PathBuf,
}
