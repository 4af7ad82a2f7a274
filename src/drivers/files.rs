// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2025 Blackman Artificial Intelligence Technologies Inc.

use serde_json::Value;
use std::path::Path;

use super::{report_changes, Outcome};
use crate::config::RunOptions;
use crate::documents::{locate, DocumentShape};
use crate::error::{MigrateError, Result};
use crate::mutators::apply_all;

/// Process one local JSON document in place.
///
/// A missing or malformed file is an error. The file is rewritten only when
/// something changed and the run is not a dry-run.
pub fn process_file(path: &Path, shape: DocumentShape, options: &RunOptions) -> Result<Outcome> {
    let label = path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string());
    tracing::debug!("processing {} as {}", path.display(), shape);

    let content = std::fs::read_to_string(path).map_err(|e| MigrateError::file(path, e))?;
    let mut document: Value = serde_json::from_str(&content).map_err(|e| {
        MigrateError::Document(format!("{} is not valid JSON: {}", path.display(), e))
    })?;

    let changes = apply_all(locate(shape, &mut document)?, &options.rules);
    if !changes.is_modified() {
        tracing::info!("nothing to fix in {}", label);
        return Ok(Outcome::Unchanged);
    }

    report_changes(&label, &changes);
    if options.dry_run {
        tracing::info!(
            "{} needs update but not changing anything, dry-run mode",
            label
        );
        return Ok(Outcome::WouldUpdate);
    }

    let mut output = serde_json::to_string_pretty(&document)?;
    output.push('\n');
    std::fs::write(path, output).map_err(|e| MigrateError::file(path, e))?;
    tracing::info!("updated {}", label);
    Ok(Outcome::Updated)
}
