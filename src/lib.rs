// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2025 Blackman Artificial Intelligence Technologies Inc.

//! mapstore-migrate - rewrite catalog, layer and source references in a
//! geOrchestra MapStore deployment.
//!
//! This crate exposes the pieces used by the `mapstore-migrate` CLI
//! (`src/main.rs`):
//! - `config`: rule table, data directory layout, database properties
//! - `documents`: the four document shapes and their collection locators
//! - `mutators`: catalog, layer and source rule application
//! - `drivers`: file and database drivers (dry-run or persist)
//! - `store`: stored map/context access (PostgreSQL, in-memory)

pub mod cli;
pub mod config;
pub mod documents;
pub mod drivers;
pub mod error;
pub mod mutators;
pub mod store;

pub use error::{MigrateError, Result};
