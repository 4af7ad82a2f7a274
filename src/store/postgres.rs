// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2025 Blackman Artificial Intelligence Technologies Inc.

use async_trait::async_trait;
use sqlx::postgres::PgConnection;
use sqlx::Connection;

use super::{ResourceCategory, StoredDataStore, StoredResource};
use crate::config::DatabaseProperties;
use crate::error::Result;

const SELECT_RESOURCES: &str = "SELECT res.id, res.name, sd.stored_data \
     FROM mapstore.gs_resource AS res \
     LEFT JOIN mapstore.gs_stored_data AS sd ON sd.id = res.id \
     LEFT JOIN mapstore.gs_category AS cat ON cat.id = res.category_id \
     WHERE cat.name = ANY($1) \
     ORDER BY res.id";

const UPDATE_STORED_DATA: &str = "UPDATE mapstore.gs_stored_data SET stored_data = $1 WHERE id = $2";

const TOUCH_RESOURCE: &str =
    "UPDATE mapstore.gs_resource SET lastupdate = now() AT TIME ZONE 'utc' WHERE id = $1";

/// Single PostgreSQL connection to the MapStore database, held for the run.
pub struct PgStore {
    conn: PgConnection,
}

impl PgStore {
    pub async fn connect(properties: &DatabaseProperties) -> Result<Self> {
        let conn = PgConnection::connect_with(&properties.connect_options()).await?;
        tracing::info!("connected to {}", properties);
        Ok(Self { conn })
    }

    /// Close the connection cleanly.
    pub async fn close(self) -> Result<()> {
        self.conn.close().await?;
        Ok(())
    }
}

#[async_trait]
impl StoredDataStore for PgStore {
    async fn fetch_resources(
        &mut self,
        categories: &[ResourceCategory],
    ) -> Result<Vec<StoredResource>> {
        let names: Vec<String> = categories.iter().map(|c| c.as_str().to_string()).collect();
        let rows: Vec<(i64, String, Option<String>)> = sqlx::query_as(SELECT_RESOURCES)
            .bind(names)
            .fetch_all(&mut self.conn)
            .await?;

        Ok(rows
            .into_iter()
            .map(|(id, name, stored_data)| StoredResource {
                id,
                name,
                stored_data,
            })
            .collect())
    }

    async fn update_stored_data(&mut self, id: i64, stored_data: &str) -> Result<()> {
        let mut tx = self.conn.begin().await?;
        sqlx::query(UPDATE_STORED_DATA)
            .bind(stored_data)
            .bind(id)
            .execute(&mut *tx)
            .await?;
        sqlx::query(TOUCH_RESOURCE)
            .bind(id)
            .execute(&mut *tx)
            .await?;
        tx.commit().await?;
        Ok(())
    }
}
