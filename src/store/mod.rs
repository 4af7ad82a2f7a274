// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2025 Blackman Artificial Intelligence Technologies Inc.

//! Access to maps and contexts stored in the MapStore database
//!
//! `PgStore` talks to the `mapstore` PostgreSQL schema; `MemoryStore` keeps
//! rows in memory for tests.

pub mod memory;
pub mod postgres;

use async_trait::async_trait;

use crate::error::Result;

pub use memory::MemoryStore;
pub use postgres::PgStore;

/// Category of a `gs_resource` row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ResourceCategory {
    Map,
    Template,
    Context,
}

impl ResourceCategory {
    /// Name as stored in `gs_category.name`.
    pub fn as_str(&self) -> &'static str {
        match self {
            ResourceCategory::Map => "MAP",
            ResourceCategory::Template => "TEMPLATE",
            ResourceCategory::Context => "CONTEXT",
        }
    }
}

/// A resource joined with its stored document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredResource {
    pub id: i64,
    pub name: String,
    /// Serialized JSON document, None when the resource has no stored data
    pub stored_data: Option<String>,
}

/// Storage backend for stored map/context documents
#[async_trait]
pub trait StoredDataStore: Send {
    /// List resources of the given categories with their stored document.
    async fn fetch_resources(
        &mut self,
        categories: &[ResourceCategory],
    ) -> Result<Vec<StoredResource>>;

    /// Replace a resource's stored document and touch its last update time.
    ///
    /// Both writes happen in one transaction; on error nothing is kept.
    async fn update_stored_data(&mut self, id: i64, stored_data: &str) -> Result<()>;
}
