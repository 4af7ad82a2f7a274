// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2025 Blackman Artificial Intelligence Technologies Inc.

//! Database connection settings read from `default.properties`

use std::collections::HashMap;
use std::fmt;
use std::path::Path;

use sqlx::postgres::PgConnectOptions;

use crate::error::{MigrateError, Result};

/// Only lines starting with this prefix are considered.
const KEY_PREFIX: &str = "pgsql";

/// PostgreSQL connection settings of a geOrchestra deployment.
#[derive(Clone, PartialEq, Eq)]
pub struct DatabaseProperties {
    pub database: String,
    pub user: String,
    pub port: u16,
    pub host: String,
    pub password: String,
}

impl DatabaseProperties {
    /// Load connection settings from a properties file.
    pub fn load_from(path: &Path) -> Result<Self> {
        let content =
            std::fs::read_to_string(path).map_err(|e| MigrateError::file(path, e))?;
        Self::parse(&content)
    }

    /// Parse `pgsql*=value` lines; other lines are ignored.
    pub fn parse(content: &str) -> Result<Self> {
        let mut values: HashMap<&str, &str> = HashMap::new();
        for line in content.lines() {
            if !line.starts_with(KEY_PREFIX) {
                continue;
            }
            let (key, value) = line.split_once('=').unwrap_or((line, ""));
            values.insert(key.trim(), value.trim());
        }

        let required = |key: &str| -> Result<String> {
            values
                .get(key)
                .map(|v| v.to_string())
                .ok_or_else(|| MigrateError::Config(format!("missing {} in properties", key)))
        };

        let port = required("pgsqlPort")?;
        let port = port.parse::<u16>().map_err(|_| {
            MigrateError::Config(format!("invalid pgsqlPort '{}' in properties", port))
        })?;

        Ok(Self {
            database: required("pgsqlDatabase")?,
            user: required("pgsqlUser")?,
            port,
            host: required("pgsqlHost")?,
            password: required("pgsqlPassword")?,
        })
    }

    /// Connection options for sqlx.
    pub fn connect_options(&self) -> PgConnectOptions {
        PgConnectOptions::new()
            .host(&self.host)
            .port(self.port)
            .username(&self.user)
            .password(&self.password)
            .database(&self.database)
    }
}

// Keeps the password out of logs.
impl fmt::Debug for DatabaseProperties {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DatabaseProperties")
            .field("database", &self.database)
            .field("user", &self.user)
            .field("port", &self.port)
            .field("host", &self.host)
            .field("password", &"***")
            .finish()
    }
}

impl fmt::Display for DatabaseProperties {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "dbname={} user={} port={} host={}",
            self.database, self.user, self.port, self.host
        )
    }
}
