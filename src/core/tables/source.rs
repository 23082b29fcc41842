//! Table sources: where raw datasets come from.
//!
//! The catalog only needs "given a table name, give me its current mapping".
//! [`HttpTableSource`] fetches the text from the upstream static repository;
//! [`StaticTableSource`] serves preloaded tables (tests, offline snapshots).

use std::collections::HashMap;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;

use super::{RawTable, TableName};
use crate::config::UpstreamConfig;
use crate::core::error::{CatalogError, Result};

#[async_trait]
pub trait TableSource: Send + Sync {
    /// Load the full current contents of `table`.
    async fn load(&self, table: TableName) -> Result<RawTable>;
}

// ============================================================================
// HTTP Source
// ============================================================================

/// Fetches tables as UTF-8 text from `{base_url}/{language}/{file}`.
pub struct HttpTableSource {
    client: Client,
    base_url: String,
    language: String,
}

impl HttpTableSource {
    pub fn new(config: &UpstreamConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            language: config.language.clone(),
        })
    }

    pub fn url_for(&self, table: TableName) -> String {
        format!("{}/{}/{}", self.base_url, self.language, table.file_name())
    }
}

#[async_trait]
impl TableSource for HttpTableSource {
    async fn load(&self, table: TableName) -> Result<RawTable> {
        let url = self.url_for(table);
        log::debug!("Fetching table {} from {}", table, url);

        let response = self.client.get(&url).send().await?;

        if !response.status().is_success() {
            return Err(CatalogError::UpstreamStatus {
                table: table.to_string(),
                status: response.status().as_u16(),
            });
        }

        let text = response.text().await?;
        let parsed = RawTable::parse(table, &text)?;
        log::debug!("Loaded table {} ({} records)", table, parsed.len());
        Ok(parsed)
    }
}

// ============================================================================
// Static Source
// ============================================================================

/// Serves tables from memory. Tables never inserted load as empty.
#[derive(Debug, Clone, Default)]
pub struct StaticTableSource {
    tables: HashMap<TableName, RawTable>,
}

impl StaticTableSource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_table(mut self, name: TableName, table: RawTable) -> Self {
        self.tables.insert(name, table);
        self
    }
}

#[async_trait]
impl TableSource for StaticTableSource {
    async fn load(&self, table: TableName) -> Result<RawTable> {
        Ok(self.tables.get(&table).cloned().unwrap_or_default())
    }
}
