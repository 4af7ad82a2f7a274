// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2025 Blackman Artificial Intelligence Technologies Inc.

//! Driver for maps and contexts stored in the database
//!
//! Maps (MAP and TEMPLATE) are processed first, contexts second. A row that
//! cannot be read or updated is logged and skipped.

use serde_json::Value;

use super::{report_changes, Outcome};
use crate::config::RunOptions;
use crate::documents::{locate, DocumentShape};
use crate::error::Result;
use crate::mutators::{apply_all, Changes};
use crate::store::{ResourceCategory, StoredDataStore, StoredResource};

const MAP_CATEGORIES: &[ResourceCategory] = &[ResourceCategory::Map, ResourceCategory::Template];
const CONTEXT_CATEGORIES: &[ResourceCategory] = &[ResourceCategory::Context];

/// Per-row counters of a database pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DatabaseSummary {
    pub seen: usize,
    pub unchanged: usize,
    pub would_update: usize,
    pub updated: usize,
    pub skipped: usize,
    pub failed: usize,
}

impl DatabaseSummary {
    fn record(&mut self, outcome: Outcome) {
        match outcome {
            Outcome::Unchanged => self.unchanged += 1,
            Outcome::WouldUpdate => self.would_update += 1,
            Outcome::Updated => self.updated += 1,
        }
    }
}

/// Process every stored map and context.
///
/// Listing rows is fatal on error; everything per row is not.
pub async fn process_stored_documents<S>(
    store: &mut S,
    options: &RunOptions,
) -> Result<DatabaseSummary>
where
    S: StoredDataStore + ?Sized,
{
    let mut summary = DatabaseSummary::default();

    for (categories, shape) in [
        (MAP_CATEGORIES, DocumentShape::StoredMap),
        (CONTEXT_CATEGORIES, DocumentShape::Context),
    ] {
        let records = store.fetch_resources(categories).await?;
        tracing::debug!("{} {} row(s) to check", records.len(), shape);
        for record in records {
            summary.seen += 1;
            process_record(store, &record, shape, options, &mut summary).await;
        }
    }

    if summary.updated == 0 {
        tracing::info!("nothing to update in the database !");
    }
    tracing::debug!("database pass: {:?}", summary);
    Ok(summary)
}

async fn process_record<S>(
    store: &mut S,
    record: &StoredResource,
    shape: DocumentShape,
    options: &RunOptions,
    summary: &mut DatabaseSummary,
) where
    S: StoredDataStore + ?Sized,
{
    let (id, name) = (record.id, record.name.as_str());

    let Some(mut document) = parse_stored_data(record) else {
        tracing::warn!("{} {} ({}) has no content ?", shape, id, name);
        summary.skipped += 1;
        return;
    };

    let changes: Changes = match locate(shape, &mut document) {
        Ok(sections) => apply_all(sections, &options.rules),
        Err(e) => {
            tracing::warn!("{} {} ({}) has no map ? skipping ({})", shape, id, name, e);
            summary.skipped += 1;
            return;
        }
    };

    if !changes.is_modified() {
        tracing::info!("nothing to fix in {} {} ({})", shape, id, name);
        summary.record(Outcome::Unchanged);
        return;
    }

    report_changes(
        &format!("db {} with id {} and name {}", shape, id, name),
        &changes,
    );
    if options.dry_run {
        tracing::info!(
            "{} {} needs update but not changing anything, dry-run mode",
            shape,
            id
        );
        summary.record(Outcome::WouldUpdate);
        return;
    }

    let stored_data = match serde_json::to_string(&document) {
        Ok(json) => json,
        Err(e) => {
            tracing::warn!("failed serializing {} {} ! {}", shape, id, e);
            summary.failed += 1;
            return;
        }
    };
    match store.update_stored_data(id, &stored_data).await {
        Ok(()) => {
            tracing::info!("updated {} {} ({})", shape, id, name);
            summary.record(Outcome::Updated);
        }
        Err(e) => {
            tracing::warn!("failed updating {} {} ! {}", shape, id, e);
            summary.failed += 1;
        }
    }
}

fn parse_stored_data(record: &StoredResource) -> Option<Value> {
    let data = record.stored_data.as_deref()?;
    match serde_json::from_str(data) {
        Ok(document) => Some(document),
        Err(e) => {
            tracing::debug!("stored data of {} does not parse: {}", record.id, e);
            None
        }
    }
}
