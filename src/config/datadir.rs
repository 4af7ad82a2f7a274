// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2025 Blackman Artificial Intelligence Technologies Inc.

use std::path::{Path, PathBuf};

/// Environment variable overriding the data directory location.
pub const DATADIR_ENV: &str = "GEORCHESTRA_DATADIR";

/// Default geOrchestra data directory.
pub const DEFAULT_DATADIR: &str = "/etc/georchestra";

/// Layout of a geOrchestra data directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DataDir {
    root: PathBuf,
}

impl DataDir {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Resolve the data directory ($GEORCHESTRA_DATADIR or /etc/georchestra).
    pub fn from_env() -> Self {
        match std::env::var(DATADIR_ENV) {
            Ok(dir) if !dir.is_empty() => Self::new(dir),
            _ => Self::new(DEFAULT_DATADIR),
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Shared properties file holding the `pgsql*` connection keys.
    pub fn properties_path(&self) -> PathBuf {
        self.root.join("default.properties")
    }

    /// Directory holding the MapStore JSON configuration files.
    pub fn mapstore_configs_dir(&self) -> PathBuf {
        self.root.join("mapstore").join("configs")
    }

    pub fn local_config_path(&self) -> PathBuf {
        self.mapstore_configs_dir().join("localConfig.json")
    }

    /// Map files processed with the plain map shape, in processing order.
    pub fn map_config_paths(&self) -> Vec<PathBuf> {
        ["new.json", "config.json"]
            .iter()
            .map(|name| self.mapstore_configs_dir().join(name))
            .collect()
    }
}

impl Default for DataDir {
    fn default() -> Self {
        Self::new(DEFAULT_DATADIR)
    }
}
