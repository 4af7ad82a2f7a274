// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2025 Blackman Artificial Intelligence Technologies Inc.

//! Document shapes and collection locators
//!
//! MapStore stores the same entities (catalog services, layers, sources) at
//! different places depending on the document:
//!
//! | shape        | catalogs                                              | layers / sources             |
//! |--------------|-------------------------------------------------------|------------------------------|
//! | local config | `initialState.defaultState.catalog.default.services`  | -                            |
//! | map file     | -                                                     | `map.layers` / `map.sources` |
//! | stored map   | `catalogServices.services`                            | `map.layers` / `map.sources` |
//! | context      | `mapConfig.catalogServices.services`                  | under `mapConfig.map`        |
//!
//! A missing collection is reported as absent. Only a context without a map
//! is an error.

use serde_json::{Map, Value};
use std::fmt;

use crate::error::{MigrateError, Result};

const LOCAL_CONFIG_CATALOGS: &str = "/initialState/defaultState/catalog/default/services";

/// The four document shapes this tool knows how to traverse.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentShape {
    /// `localConfig.json`
    LocalConfig,
    /// `new.json` / `config.json`
    Map,
    /// Database row of category MAP or TEMPLATE
    StoredMap,
    /// Database row of category CONTEXT
    Context,
}

impl fmt::Display for DocumentShape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            DocumentShape::LocalConfig => "local config",
            DocumentShape::Map => "map",
            DocumentShape::StoredMap => "map",
            DocumentShape::Context => "context",
        };
        f.write_str(name)
    }
}

/// Mutable views into the collections found in one document.
#[derive(Debug, Default)]
pub struct Sections<'a> {
    pub catalogs: Option<&'a mut Map<String, Value>>,
    pub layers: Option<&'a mut Vec<Value>>,
    pub sources: Option<&'a mut Map<String, Value>>,
}

impl Sections<'_> {
    /// True when the document holds none of the known collections.
    pub fn is_empty(&self) -> bool {
        self.catalogs.is_none() && self.layers.is_none() && self.sources.is_none()
    }
}

/// Locate the collections of a document of the given shape.
pub fn locate(shape: DocumentShape, document: &mut Value) -> Result<Sections<'_>> {
    match shape {
        DocumentShape::LocalConfig => Ok(locate_local_config(document)),
        DocumentShape::Map => Ok(locate_map(document)),
        DocumentShape::StoredMap => Ok(locate_stored_map(document)),
        DocumentShape::Context => locate_context(document),
    }
}

pub fn locate_local_config(document: &mut Value) -> Sections<'_> {
    Sections {
        catalogs: document
            .pointer_mut(LOCAL_CONFIG_CATALOGS)
            .and_then(Value::as_object_mut),
        ..Default::default()
    }
}

/// Layers and sources of a map file; catalogs are left alone.
pub fn locate_map(document: &mut Value) -> Sections<'_> {
    let mut sections = Sections::default();
    if let Some(map) = document.get_mut("map").and_then(Value::as_object_mut) {
        split_map_section(map, &mut sections);
    }
    sections
}

/// Layers, sources and catalog services of a map stored in the database.
pub fn locate_stored_map(document: &mut Value) -> Sections<'_> {
    let mut sections = Sections::default();
    let Some(root) = document.as_object_mut() else {
        return sections;
    };

    for (key, value) in root.iter_mut() {
        match key.as_str() {
            "map" => {
                if let Some(map) = value.as_object_mut() {
                    split_map_section(map, &mut sections);
                }
            }
            "catalogServices" => {
                sections.catalogs = value.get_mut("services").and_then(Value::as_object_mut);
            }
            _ => {}
        }
    }
    sections
}

/// A context embeds a stored map under `mapConfig`.
pub fn locate_context(document: &mut Value) -> Result<Sections<'_>> {
    let Some(map_config) = document.get_mut("mapConfig") else {
        return Err(MigrateError::Document("context has no mapConfig".to_string()));
    };
    if map_config.get("map").is_none() {
        return Err(MigrateError::Document("context has no map".to_string()));
    }
    Ok(locate_stored_map(map_config))
}

fn split_map_section<'a>(map: &'a mut Map<String, Value>, sections: &mut Sections<'a>) {
    for (key, value) in map.iter_mut() {
        match key.as_str() {
            "layers" => sections.layers = value.as_array_mut(),
            "sources" => sections.sources = value.as_object_mut(),
            _ => {}
        }
    }
}
