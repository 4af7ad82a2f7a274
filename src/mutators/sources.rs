// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2025 Blackman Artificial Intelligence Technologies Inc.

//! Map sources mutator
//!
//! Sources share the `layers_to_process` rule namespace with layers. A drop
//! restricted to a layer name never removes the source: other layers of the
//! same service may still reference it.

use serde_json::{Map, Value};

use super::{restructure, Change, Changes};
use crate::config::{LayerRule, RuleTable};

/// Apply `layers_to_process` rules to a map's sources object.
///
/// Replacing renames the source key; an existing source already stored
/// under the new URL is overwritten.
pub fn apply_source_rules(sources: &mut Map<String, Value>, rules: &RuleTable) -> Changes {
    let mut changes = Changes::new();
    let mut to_drop: Vec<String> = Vec::new();
    let mut to_replace: Vec<(String, String)> = Vec::new();

    for url in sources.keys() {
        let Some(rule) = rules.layer_rule(url) else {
            continue;
        };

        match rule {
            LayerRule::Drop { layername } => {
                if layername.is_some() {
                    tracing::debug!(
                        "not dropping source {}, the rule only targets layer {:?}",
                        url,
                        layername
                    );
                    continue;
                }
                changes.push(Change::SourceDropped { url: url.clone() });
                to_drop.push(url.clone());
            }
            LayerRule::Replace { by, .. } => {
                if *url == by.url {
                    continue;
                }
                changes.push(Change::SourceReplaced {
                    from: url.clone(),
                    to: by.url.clone(),
                });
                to_replace.push((url.clone(), by.url.clone()));
            }
        }
    }

    restructure(sources, &to_drop, &to_replace);
    changes
}
