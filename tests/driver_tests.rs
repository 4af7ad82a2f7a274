// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2025 Blackman Artificial Intelligence Technologies Inc.

use mapstore_migrate::config::{RuleTable, RunOptions};
use mapstore_migrate::documents::DocumentShape;
use mapstore_migrate::drivers::{process_file, process_stored_documents, Outcome};
use mapstore_migrate::store::{MemoryStore, ResourceCategory};
use serde_json::{json, Value};
use std::path::PathBuf;
use tempfile::TempDir;

const RULES: &str = r#"{
    "catalogs_to_process": {
        "sadre": { "action": "rename", "with": "sandre" },
        "ignrasterwms": {
            "action": "replace",
            "by": { "url": "https://data.geopf.fr/wms-r/wms", "title": "Géoplateforme RASTER" }
        }
    },
    "layers_to_process": {
        "https://wxs.ign.fr/essentiels/geoportail/r/wms": {
            "action": "replace",
            "by": { "url": "https://data.geopf.fr/wms-r/wms" }
        },
        "http://retired.example.org/wms": { "action": "drop" }
    }
}"#;

fn options(dry_run: bool) -> RunOptions {
    RunOptions::new(RuleTable::from_json(RULES).unwrap(), dry_run)
}

fn local_config() -> Value {
    json!({
        "proxyUrl": {"url": "/mapstore/proxy/?url="},
        "initialState": {"defaultState": {"catalog": {"default": {
            "selectedService": "sadre",
            "services": {
                "sadre": {"url": "http://a", "type": "csw"},
                "ignrasterwms": {"url": "http://b", "type": "wms"}
            }
        }}}}
    })
}

fn map_document() -> Value {
    json!({
        "version": 2,
        "map": {
            "projection": "EPSG:3857",
            "layers": [
                {"name": "ORTHOIMAGERY.ORTHOPHOTOS", "title": "Photos", "type": "wms",
                 "url": "https://wxs.ign.fr/essentiels/geoportail/r/wms"},
                {"name": "old", "title": "Old", "type": "wms", "url": "http://retired.example.org/wms"},
                {"name": "osm", "title": "OSM", "type": "osm", "source": "osm"}
            ],
            "sources": {
                "https://wxs.ign.fr/essentiels/geoportail/r/wms": {"version": "1.3.0"}
            }
        },
        "catalogServices": {"services": {
            "sadre": {"url": "http://a"},
            "ignrasterwms": {"url": "http://b"}
        }}
    })
}

fn write_json(dir: &TempDir, name: &str, value: &Value) -> PathBuf {
    let path = dir.path().join(name);
    std::fs::write(&path, serde_json::to_string_pretty(value).unwrap()).unwrap();
    path
}

#[test]
fn test_local_config_updated_in_place() {
    let dir = TempDir::new().unwrap();
    let path = write_json(&dir, "localConfig.json", &local_config());

    let outcome = process_file(&path, DocumentShape::LocalConfig, &options(false)).unwrap();
    assert_eq!(outcome, Outcome::Updated);

    let written: Value = serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
    let services = &written["initialState"]["defaultState"]["catalog"]["default"]["services"];
    assert_eq!(services["sandre"], json!({"url": "http://a", "type": "csw"}));
    assert!(services.get("sadre").is_none());
    assert_eq!(
        services["ignrasterwms"]["url"],
        json!("https://data.geopf.fr/wms-r/wms")
    );
    assert_eq!(services["ignrasterwms"]["title"], json!("Géoplateforme RASTER"));
    assert_eq!(written["proxyUrl"], local_config()["proxyUrl"]);

    // Second run finds nothing and leaves the file alone
    let before = std::fs::read_to_string(&path).unwrap();
    let outcome = process_file(&path, DocumentShape::LocalConfig, &options(false)).unwrap();
    assert_eq!(outcome, Outcome::Unchanged);
    assert_eq!(std::fs::read_to_string(&path).unwrap(), before);
}

#[test]
fn test_dry_run_leaves_file_byte_identical() {
    let dir = TempDir::new().unwrap();
    let path = write_json(&dir, "localConfig.json", &local_config());
    let before = std::fs::read(&path).unwrap();

    let outcome = process_file(&path, DocumentShape::LocalConfig, &options(true)).unwrap();

    assert_eq!(outcome, Outcome::WouldUpdate);
    assert_eq!(std::fs::read(&path).unwrap(), before);
}

#[test]
fn test_map_file_leaves_catalogs_alone() {
    let dir = TempDir::new().unwrap();
    let path = write_json(&dir, "new.json", &map_document());

    let outcome = process_file(&path, DocumentShape::Map, &options(false)).unwrap();
    assert_eq!(outcome, Outcome::Updated);

    let written: Value = serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
    let layers = written["map"]["layers"].as_array().unwrap();
    assert_eq!(layers.len(), 2);
    assert_eq!(layers[0]["url"], json!("https://data.geopf.fr/wms-r/wms"));
    assert!(written["map"]["sources"]
        .get("https://data.geopf.fr/wms-r/wms")
        .is_some());
    // Map files do not carry catalogs we manage
    assert_eq!(written["catalogServices"], map_document()["catalogServices"]);
}

#[test]
fn test_map_file_without_map_section() {
    let dir = TempDir::new().unwrap();
    let path = write_json(&dir, "config.json", &json!({"plugins": {}}));

    let outcome = process_file(&path, DocumentShape::Map, &options(false)).unwrap();
    assert_eq!(outcome, Outcome::Unchanged);
}

fn context_document() -> Value {
    json!({
        "mapConfig": map_document(),
        "windowState": {"width": 1024}
    })
}

fn store() -> MemoryStore {
    MemoryStore::new()
        .with_resource(
            1,
            "ign map",
            ResourceCategory::Map,
            Some(map_document().to_string().as_str()),
        )
        .with_resource(2, "empty map", ResourceCategory::Map, None)
        .with_resource(3, "broken", ResourceCategory::Template, Some("{oops"))
        .with_resource(
            4,
            "untouched template",
            ResourceCategory::Template,
            Some(r#"{"map":{"layers":[]},"catalogServices":{"services":{}}}"#),
        )
        .with_resource(
            5,
            "context",
            ResourceCategory::Context,
            Some(context_document().to_string().as_str()),
        )
        .with_resource(
            6,
            "context without map",
            ResourceCategory::Context,
            Some(r#"{"mapConfig":{"catalogServices":{"services":{"sadre":{}}}}}"#),
        )
        .with_resource(
            7,
            "dashboard",
            ResourceCategory::Map,
            Some(json!({"map": {"layers": []}, "catalogServices": {"services": {"sadre": {"url": "x"}}}}).to_string().as_str()),
        )
}

#[tokio::test]
async fn test_database_pass_updates_maps_and_contexts() {
    let mut store = store();

    let summary = process_stored_documents(&mut store, &options(false))
        .await
        .unwrap();

    assert_eq!(summary.seen, 7);
    assert_eq!(summary.updated, 3);
    assert_eq!(summary.unchanged, 1);
    assert_eq!(summary.skipped, 3);
    assert_eq!(summary.failed, 0);

    let map: Value = serde_json::from_str(store.stored_data(1).unwrap()).unwrap();
    assert_eq!(map["map"]["layers"].as_array().unwrap().len(), 2);
    assert!(map["catalogServices"]["services"].get("sandre").is_some());
    assert_eq!(store.resource(1).unwrap().touched, 1);

    // Stored back as compact JSON
    assert!(!store.stored_data(1).unwrap().contains('\n'));

    let context: Value = serde_json::from_str(store.stored_data(5).unwrap()).unwrap();
    assert_eq!(
        context["mapConfig"]["map"]["layers"][0]["url"],
        json!("https://data.geopf.fr/wms-r/wms")
    );
    assert_eq!(context["windowState"], json!({"width": 1024}));

    for id in [2, 3, 4, 6] {
        assert_eq!(store.resource(id).unwrap().touched, 0, "row {}", id);
    }
    assert_eq!(store.stored_data(3), Some("{oops"));
}

#[tokio::test]
async fn test_database_dry_run_persists_nothing() {
    let original = store();
    let mut store = original.clone();

    let summary = process_stored_documents(&mut store, &options(true))
        .await
        .unwrap();

    assert_eq!(summary.updated, 0);
    assert_eq!(summary.would_update, 3);
    for id in 1..=7 {
        assert_eq!(store.resource(id), original.resource(id));
    }
}

#[tokio::test]
async fn test_failed_update_does_not_stop_later_rows() {
    let mut store = store().failing_updates_for(1);

    let summary = process_stored_documents(&mut store, &options(false))
        .await
        .unwrap();

    assert_eq!(summary.failed, 1);
    assert_eq!(summary.updated, 2);
    assert_eq!(store.stored_data(1), Some(map_document().to_string().as_str()));
    assert_eq!(store.resource(1).unwrap().touched, 0);
    assert_eq!(store.resource(5).unwrap().touched, 1);
}
