// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2025 Blackman Artificial Intelligence Technologies Inc.

//! Rule application over extracted document collections
//!
//! Each mutator scans its collection read-only, buffers structural edits
//! (drops, key renames) and applies them once the scan is complete. In-place
//! value edits happen during the scan since they do not change structure.

pub mod catalogs;
pub mod layers;
pub mod sources;

use serde_json::{Map, Value};
use std::collections::{HashMap, HashSet};
use std::fmt;

use crate::config::RuleTable;
use crate::documents::Sections;

pub use catalogs::apply_catalog_rules;
pub use layers::apply_layer_rules;
pub use sources::apply_source_rules;

/// A single edit made (or intended) by a mutator.
#[derive(Debug, Clone, PartialEq)]
pub enum Change {
    CatalogDropped {
        key: String,
        descriptor: Value,
    },
    CatalogRenamed {
        from: String,
        to: String,
    },
    CatalogReplaced {
        key: String,
        url: String,
        title: Option<String>,
    },
    LayerDropped {
        url: String,
        name: Option<String>,
        layer: Value,
    },
    LayerReplaced {
        from: String,
        to: String,
        name: Option<String>,
        title: Option<String>,
    },
    SourceDropped {
        url: String,
    },
    SourceReplaced {
        from: String,
        to: String,
    },
}

impl fmt::Display for Change {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Change::CatalogDropped { key, descriptor } => {
                write!(f, "drop catalog {}: {}", key, descriptor)
            }
            Change::CatalogRenamed { from, to } => {
                write!(f, "rename catalog {} to {}", from, to)
            }
            Change::CatalogReplaced { key, url, title } => match title {
                Some(title) => write!(
                    f,
                    "update catalog {}: replace url by '{}' and title by '{}'",
                    key, url, title
                ),
                None => write!(f, "update catalog {}: replace url by '{}'", key, url),
            },
            Change::LayerDropped { url, name, layer } => write!(
                f,
                "drop layer with url {} and name {}: {}",
                url,
                name.as_deref().unwrap_or("<unnamed>"),
                layer
            ),
            Change::LayerReplaced {
                from,
                to,
                name,
                title,
            } => write!(
                f,
                "update layer with url {}: replace url by '{}' in the layer with title '{}' and name '{}'",
                from,
                to,
                title.as_deref().unwrap_or(""),
                name.as_deref().unwrap_or("")
            ),
            Change::SourceDropped { url } => write!(f, "drop source with url '{}'", url),
            Change::SourceReplaced { from, to } => {
                write!(f, "update source with url '{}': replace by '{}'", from, to)
            }
        }
    }
}

/// Changes recorded while applying rules to one document.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Changes {
    items: Vec<Change>,
}

impl Changes {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, change: Change) {
        self.items.push(change);
    }

    /// Merge another set of changes into this one.
    pub fn extend(&mut self, other: Changes) {
        self.items.extend(other.items);
    }

    /// Whether anything was changed.
    pub fn is_modified(&self) -> bool {
        !self.items.is_empty()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Change> {
        self.items.iter()
    }
}

impl IntoIterator for Changes {
    type Item = Change;
    type IntoIter = std::vec::IntoIter<Change>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.into_iter()
    }
}

/// Apply every mutator to the collections located in a document.
///
/// Layers and sources are processed before catalogs.
pub fn apply_all(sections: Sections<'_>, rules: &RuleTable) -> Changes {
    let mut changes = Changes::new();
    if let Some(layers) = sections.layers {
        changes.extend(apply_layer_rules(layers, rules));
    }
    if let Some(sources) = sections.sources {
        changes.extend(apply_source_rules(sources, rules));
    }
    if let Some(catalogs) = sections.catalogs {
        changes.extend(apply_catalog_rules(catalogs, rules));
    }
    changes
}

/// Apply buffered drops and key renames to a JSON object.
///
/// Key order is kept: a renamed entry takes the position of its old key. An
/// existing entry whose key is a rename target (and that is not renamed
/// itself) is replaced by the renamed entry.
pub(crate) fn restructure(
    map: &mut Map<String, Value>,
    drops: &[String],
    renames: &[(String, String)],
) {
    if drops.is_empty() && renames.is_empty() {
        return;
    }

    let dropped: HashSet<&str> = drops.iter().map(String::as_str).collect();
    let renamed: HashMap<&str, &str> = renames
        .iter()
        .map(|(from, to)| (from.as_str(), to.as_str()))
        .collect();
    let targets: HashSet<&str> = renames.iter().map(|(_, to)| to.as_str()).collect();

    let previous = std::mem::take(map);
    for (key, value) in previous {
        if dropped.contains(key.as_str()) {
            continue;
        }
        if let Some(to) = renamed.get(key.as_str()) {
            map.insert((*to).to_string(), value);
            continue;
        }
        if targets.contains(key.as_str()) {
            continue;
        }
        map.insert(key, value);
    }
}
