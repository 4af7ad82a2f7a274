// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2025 Blackman Artificial Intelligence Technologies Inc.

//! Layer list mutator

use serde_json::Value;

use super::{Change, Changes};
use crate::config::{LayerRule, RuleTable};

const CAPABILITIES_URL: &str = "capabilitiesURL";

/// Apply `layers_to_process` rules to a map's layer list.
///
/// Layers without a string `url` are never touched. Dropped layers are
/// removed after the scan; the remaining layers keep their order.
pub fn apply_layer_rules(layers: &mut Vec<Value>, rules: &RuleTable) -> Changes {
    let mut changes = Changes::new();
    let mut to_drop: Vec<usize> = Vec::new();

    for (index, layer) in layers.iter_mut().enumerate() {
        let Some(entry) = layer.as_object_mut() else {
            continue;
        };
        let Some(url) = entry.get("url").and_then(Value::as_str).map(str::to_string) else {
            continue;
        };
        let Some(rule) = rules.layer_rule(&url) else {
            continue;
        };

        let name = entry
            .get("name")
            .and_then(Value::as_str)
            .map(str::to_string);
        if !rule.matches_name(name.as_deref()) {
            continue;
        }

        match rule {
            LayerRule::Drop { .. } => {
                changes.push(Change::LayerDropped {
                    url,
                    name,
                    layer: Value::Object(entry.clone()),
                });
                to_drop.push(index);
            }
            LayerRule::Replace { by, .. } => {
                // None: no capabilitiesURL on this layer
                let stale_capabilities = entry
                    .get(CAPABILITIES_URL)
                    .map(|current| current.as_str() != Some(by.url.as_str()));
                if url == by.url && stale_capabilities != Some(true) {
                    continue;
                }

                entry.insert("url".to_string(), Value::String(by.url.clone()));
                if stale_capabilities == Some(true) {
                    entry.insert(CAPABILITIES_URL.to_string(), Value::String(by.url.clone()));
                }
                changes.push(Change::LayerReplaced {
                    from: url,
                    to: by.url.clone(),
                    title: entry
                        .get("title")
                        .and_then(Value::as_str)
                        .map(str::to_string),
                    name,
                });
            }
        }
    }

    if !to_drop.is_empty() {
        let mut index = 0;
        layers.retain(|_| {
            let keep = !to_drop.contains(&index);
            index += 1;
            keep
        });
    }
    changes
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn rules(json: &str) -> RuleTable {
        RuleTable::from_json(json).unwrap()
    }

    fn layer_list(value: Value) -> Vec<Value> {
        value.as_array().cloned().unwrap()
    }

    #[test]
    fn test_drop_removes_all_layers_for_url() {
        let rules = rules(r#"{"layers_to_process": {"http://old/wms": {"action": "drop"}}}"#);
        let mut layers = layer_list(json!([
            {"name": "a", "title": "A", "url": "http://old/wms"},
            {"name": "osm", "title": "OSM", "type": "osm"},
            {"name": "b", "title": "B", "url": "http://old/wms"},
            {"name": "c", "title": "C", "url": "http://kept/wms"}
        ]));

        let changes = apply_layer_rules(&mut layers, &rules);

        assert_eq!(changes.len(), 2);
        let names: Vec<&str> = layers.iter().map(|l| l["name"].as_str().unwrap()).collect();
        assert_eq!(names, vec!["osm", "c"]);
    }

    #[test]
    fn test_drop_gated_by_layername() {
        let rules = rules(
            r#"{"layers_to_process": {"http://old/wms": {"action": "drop", "layername": "roads"}}}"#,
        );
        let mut layers = layer_list(json!([
            {"name": "rivers", "title": "Rivers", "url": "http://old/wms"},
            {"name": "roads", "title": "Roads", "url": "http://old/wms"}
        ]));

        let changes = apply_layer_rules(&mut layers, &rules);

        assert_eq!(changes.len(), 1);
        assert_eq!(layers.len(), 1);
        assert_eq!(layers[0]["name"], json!("rivers"));
    }

    #[test]
    fn test_replace_gated_by_layername_leaves_layer_untouched() {
        let rules = rules(
            r#"{"layers_to_process": {"http://old/wms": {"action": "replace", "layername": "roads", "by": {"url": "https://new/wms"}}}}"#,
        );
        let original = layer_list(json!([
            {"name": "rivers", "title": "Rivers", "url": "http://old/wms", "capabilitiesURL": "http://old/caps"}
        ]));
        let mut layers = original.clone();

        assert!(!apply_layer_rules(&mut layers, &rules).is_modified());
        assert_eq!(layers, original);
    }

    #[test]
    fn test_replace_syncs_capabilities_url() {
        let rules = rules(
            r#"{"layers_to_process": {"http://old/wms": {"action": "replace", "by": {"url": "https://new/wms"}}}}"#,
        );
        let mut layers = layer_list(json!([
            {"name": "a", "title": "A", "url": "http://old/wms", "capabilitiesURL": "http://old/wms?SERVICE=WMS"}
        ]));

        let changes = apply_layer_rules(&mut layers, &rules);

        assert!(changes.is_modified());
        assert_eq!(layers[0]["url"], json!("https://new/wms"));
        assert_eq!(layers[0]["capabilitiesURL"], json!("https://new/wms"));
    }

    #[test]
    fn test_replace_without_capabilities_does_not_add_it() {
        let rules = rules(
            r#"{"layers_to_process": {"http://old/wms": {"action": "replace", "by": {"url": "https://new/wms"}}}}"#,
        );
        let mut layers = layer_list(json!([{"name": "a", "title": "A", "url": "http://old/wms"}]));

        assert!(apply_layer_rules(&mut layers, &rules).is_modified());
        assert_eq!(layers[0], json!({"name": "a", "title": "A", "url": "https://new/wms"}));
    }

    #[test]
    fn test_layers_without_url_are_ignored() {
        let rules = rules(r#"{"layers_to_process": {"http://old/wms": {"action": "drop"}}}"#);
        let mut layers = layer_list(json!([
            {"name": "background", "title": "BG", "type": "osm", "source": "osm"},
            {"name": "weird", "url": 42}
        ]));

        assert!(!apply_layer_rules(&mut layers, &rules).is_modified());
        assert_eq!(layers.len(), 2);
    }

    #[test]
    fn test_self_mapping_replace_is_idempotent() {
        let rules = rules(
            r#"{"layers_to_process": {"https://same/wms": {"action": "replace", "by": {"url": "https://same/wms"}}}}"#,
        );
        let mut layers = layer_list(json!([
            {"name": "a", "title": "A", "url": "https://same/wms", "capabilitiesURL": "https://other/caps"}
        ]));

        assert!(apply_layer_rules(&mut layers, &rules).is_modified());
        assert_eq!(layers[0]["capabilitiesURL"], json!("https://same/wms"));
        assert!(!apply_layer_rules(&mut layers, &rules).is_modified());
    }
}
