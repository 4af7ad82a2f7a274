// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2025 Blackman Artificial Intelligence Technologies Inc.

//! Document drivers
//!
//! A driver locates the collections of one document, runs the mutators and
//! then either reports (dry-run) or persists the result.

pub mod database;
pub mod files;

use crate::config::{DataDir, DatabaseProperties, RunOptions};
use crate::documents::DocumentShape;
use crate::error::Result;
use crate::mutators::Changes;
use crate::store::PgStore;

pub use database::{process_stored_documents, DatabaseSummary};
pub use files::process_file;

/// What happened to one document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// No rule matched anything
    Unchanged,
    /// Changes found but not persisted (dry-run)
    WouldUpdate,
    /// Changes persisted
    Updated,
}

/// Log every change found in a document.
pub(crate) fn report_changes(label: &str, changes: &Changes) {
    for change in changes.iter() {
        tracing::info!("{}: {}", label, change);
    }
}

/// Full run: local config, the map files, then the database.
///
/// Local file errors are fatal; database row errors are logged and skipped.
pub async fn run(datadir: &DataDir, options: &RunOptions) -> Result<()> {
    if options.dry_run {
        tracing::info!("dry-run mode, nothing will be persisted");
    }

    process_file(
        &datadir.local_config_path(),
        DocumentShape::LocalConfig,
        options,
    )?;
    for path in datadir.map_config_paths() {
        process_file(&path, DocumentShape::Map, options)?;
    }

    let properties = DatabaseProperties::load_from(&datadir.properties_path())?;
    let mut store = PgStore::connect(&properties).await?;
    let result = process_stored_documents(&mut store, options).await;
    store.close().await?;
    result?;
    Ok(())
}
