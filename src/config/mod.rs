// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2025 Blackman Artificial Intelligence Technologies Inc.

//! Configuration module for mapstore-migrate
//!
//! Handles the rule table, the geOrchestra data directory layout and the
//! database connection properties.

pub mod datadir;
pub mod properties;
pub mod rules;

pub use datadir::DataDir;
pub use properties::DatabaseProperties;
pub use rules::{CatalogRule, CatalogTarget, LayerRule, LayerTarget, RuleTable};

/// Everything a mutator or driver needs to know about the current run.
#[derive(Debug, Clone, Default)]
pub struct RunOptions {
    /// Edit rules, immutable for the whole run
    pub rules: RuleTable,
    /// Report intended changes without persisting them
    pub dry_run: bool,
}

impl RunOptions {
    pub fn new(rules: RuleTable, dry_run: bool) -> Self {
        Self { rules, dry_run }
    }
}
