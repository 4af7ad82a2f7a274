// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2025 Blackman Artificial Intelligence Technologies Inc.

//! Rule table loaded from the JSON rule file
//!
//! ```json
//! {
//!   "catalogs_to_process": {
//!     "sadre": { "action": "rename", "with": "sandre" },
//!     "ignrasterwms": { "action": "replace", "by": { "url": "https://data.geopf.fr/wms-r/wms" } }
//!   },
//!   "layers_to_process": {
//!     "https://old.example.org/wms": { "action": "drop", "layername": "roads" }
//!   }
//! }
//! ```

use serde::Deserialize;
use std::collections::HashMap;
use std::path::Path;

use crate::error::{MigrateError, Result};

/// Edit rules for one run, keyed by catalog key and by layer/source URL.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct RuleTable {
    /// Rules for catalog services, keyed by catalog key
    #[serde(default)]
    pub catalogs_to_process: HashMap<String, CatalogRule>,

    /// Rules for layers and sources, keyed by service URL
    #[serde(default)]
    pub layers_to_process: HashMap<String, LayerRule>,
}

/// Action applied to a catalog entry.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(tag = "action", rename_all = "lowercase")]
pub enum CatalogRule {
    /// Remove the entry
    Drop,
    /// Move the entry to another key
    Rename { with: String },
    /// Overwrite the entry's url (and title)
    Replace { by: CatalogTarget },
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct CatalogTarget {
    pub url: String,
    #[serde(default)]
    pub title: Option<String>,
}

/// Action applied to layers and sources whose URL matches.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(tag = "action", rename_all = "lowercase")]
pub enum LayerRule {
    Drop {
        #[serde(default)]
        layername: Option<String>,
    },
    Replace {
        #[serde(default)]
        layername: Option<String>,
        by: LayerTarget,
    },
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct LayerTarget {
    pub url: String,
}

impl LayerRule {
    /// Layer name the rule is restricted to, if any.
    pub fn layername(&self) -> Option<&str> {
        match self {
            LayerRule::Drop { layername } | LayerRule::Replace { layername, .. } => {
                layername.as_deref()
            }
        }
    }

    /// Whether the rule applies to a layer with the given `name`.
    pub fn matches_name(&self, name: Option<&str>) -> bool {
        match self.layername() {
            Some(wanted) => name == Some(wanted),
            None => true,
        }
    }
}

impl RuleTable {
    /// Load the rule table from a JSON file.
    pub fn load_from(path: &Path) -> Result<Self> {
        tracing::info!("reading config from {}", path.display());
        let content =
            std::fs::read_to_string(path).map_err(|e| MigrateError::file(path, e))?;
        Self::from_json(&content)
    }

    /// Parse a rule table from JSON text.
    pub fn from_json(content: &str) -> Result<Self> {
        serde_json::from_str(content)
            .map_err(|e| MigrateError::Config(format!("invalid rule table: {}", e)))
    }

    pub fn catalog_rule(&self, key: &str) -> Option<&CatalogRule> {
        self.catalogs_to_process.get(key)
    }

    pub fn layer_rule(&self, url: &str) -> Option<&LayerRule> {
        self.layers_to_process.get(url)
    }

    pub fn is_empty(&self) -> bool {
        self.catalogs_to_process.is_empty() && self.layers_to_process.is_empty()
    }
}
