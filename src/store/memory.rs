// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2025 Blackman Artificial Intelligence Technologies Inc.

//! In-memory stored data backend for testing
//!
//! Mirrors the `gs_resource`/`gs_stored_data` rows the drivers work on and
//! can be told to fail updates for given resources.

use async_trait::async_trait;
use std::collections::HashSet;

use super::{ResourceCategory, StoredDataStore, StoredResource};
use crate::error::Result;

/// One resource row with its stored document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MemoryResource {
    pub id: i64,
    pub name: String,
    pub category: ResourceCategory,
    pub stored_data: Option<String>,
    /// Number of times `lastupdate` was touched
    pub touched: u32,
}

#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    resources: Vec<MemoryResource>,
    failing: HashSet<i64>,
    fetches: usize,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a resource row.
    pub fn with_resource(
        mut self,
        id: i64,
        name: impl Into<String>,
        category: ResourceCategory,
        stored_data: Option<&str>,
    ) -> Self {
        self.resources.push(MemoryResource {
            id,
            name: name.into(),
            category,
            stored_data: stored_data.map(str::to_string),
            touched: 0,
        });
        self
    }

    /// Make every update of the given resource fail.
    pub fn failing_updates_for(mut self, id: i64) -> Self {
        self.failing.insert(id);
        self
    }

    pub fn resource(&self, id: i64) -> Option<&MemoryResource> {
        self.resources.iter().find(|r| r.id == id)
    }

    pub fn stored_data(&self, id: i64) -> Option<&str> {
        self.resource(id).and_then(|r| r.stored_data.as_deref())
    }

    /// Number of `fetch_resources` calls made so far.
    pub fn fetch_count(&self) -> usize {
        self.fetches
    }
}

#[async_trait]
impl StoredDataStore for MemoryStore {
    async fn fetch_resources(
        &mut self,
        categories: &[ResourceCategory],
    ) -> Result<Vec<StoredResource>> {
        self.fetches += 1;
        let mut rows: Vec<StoredResource> = self
            .resources
            .iter()
            .filter(|r| categories.contains(&r.category))
            .map(|r| StoredResource {
                id: r.id,
                name: r.name.clone(),
                stored_data: r.stored_data.clone(),
            })
            .collect();
        rows.sort_by_key(|r| r.id);
        Ok(rows)
    }

    async fn update_stored_data(&mut self, id: i64, stored_data: &str) -> Result<()> {
        if self.failing.contains(&id) {
            return Err(sqlx::Error::Protocol(format!(
                "simulated failure updating resource {}",
                id
            ))
            .into());
        }
        if let Some(resource) = self.resources.iter_mut().find(|r| r.id == id) {
            resource.stored_data = Some(stored_data.to_string());
            resource.touched += 1;
        }
        Ok(())
    }
}
