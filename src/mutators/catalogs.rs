// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2025 Blackman Artificial Intelligence Technologies Inc.

//! Catalog services mutator

use serde_json::{Map, Value};
use std::collections::HashSet;

use super::{restructure, Change, Changes};
use crate::config::{CatalogRule, CatalogTarget, RuleTable};

/// Apply `catalogs_to_process` rules to a catalog services object.
///
/// A rename whose target key already exists (before this pass) or was
/// already claimed by another rename of this pass is skipped and logged.
pub fn apply_catalog_rules(catalogs: &mut Map<String, Value>, rules: &RuleTable) -> Changes {
    let mut changes = Changes::new();
    let mut to_drop: Vec<String> = Vec::new();
    let mut to_rename: Vec<(String, String)> = Vec::new();
    let mut claimed: HashSet<String> = HashSet::new();

    let keys: Vec<String> = catalogs.keys().cloned().collect();
    for key in keys {
        let Some(rule) = rules.catalog_rule(&key) else {
            continue;
        };

        match rule {
            CatalogRule::Drop => {
                let descriptor = catalogs.get(&key).cloned().unwrap_or(Value::Null);
                changes.push(Change::CatalogDropped {
                    key: key.clone(),
                    descriptor,
                });
                to_drop.push(key);
            }
            CatalogRule::Rename { with } => {
                if catalogs.contains_key(with) || claimed.contains(with) {
                    tracing::warn!(
                        "can't rename catalog {} to {} as a catalog already exists with this key",
                        key,
                        with
                    );
                    continue;
                }
                claimed.insert(with.clone());
                changes.push(Change::CatalogRenamed {
                    from: key.clone(),
                    to: with.clone(),
                });
                to_rename.push((key, with.clone()));
            }
            CatalogRule::Replace { by } => {
                let Some(descriptor) = catalogs.get_mut(&key).and_then(Value::as_object_mut)
                else {
                    tracing::warn!("catalog {} is not an object, not updating it", key);
                    continue;
                };
                if replace_descriptor(descriptor, by) {
                    changes.push(Change::CatalogReplaced {
                        key,
                        url: by.url.clone(),
                        title: by.title.clone(),
                    });
                }
            }
        }
    }

    restructure(catalogs, &to_drop, &to_rename);
    changes
}

/// Overwrite `url` (and `title` when the target has one). Returns false when
/// the descriptor already matches the target.
fn replace_descriptor(descriptor: &mut Map<String, Value>, target: &CatalogTarget) -> bool {
    let same_url = descriptor.get("url").and_then(Value::as_str) == Some(target.url.as_str());
    let same_title = match &target.title {
        Some(title) => descriptor.get("title").and_then(Value::as_str) == Some(title.as_str()),
        None => true,
    };
    if same_url && same_title {
        return false;
    }

    descriptor.insert("url".to_string(), Value::String(target.url.clone()));
    if let Some(title) = &target.title {
        descriptor.insert("title".to_string(), Value::String(title.clone()));
    }
    true
}
