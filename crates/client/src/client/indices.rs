//! Index methods for [`EsClient`].
//!
//! # What this module handles:
//! - Settings and `_cat/indices` metadata for every open and closed index
//! - Index and alias existence checks
//! - Updating index settings

use std::collections::BTreeMap;

use serde_json::Value;

use crate::client::EsClient;
use crate::endpoints;
use crate::error::Result;
use crate::models::{AcknowledgedResponse, CatIndex, IndexSettings};

impl EsClient {
    /// Settings of every index, keyed by name.
    pub async fn get_settings(&self) -> Result<BTreeMap<String, IndexSettings>> {
        endpoints::get_settings(&self.http, &self.base_url, &self.auth, self.max_retries).await
    }

    /// `_cat/indices` rows for every index.
    pub async fn cat_indices(&self) -> Result<Vec<CatIndex>> {
        endpoints::cat_indices(&self.http, &self.base_url, &self.auth, self.max_retries).await
    }

    /// Whether an index (or data stream) named `name` exists.
    pub async fn index_exists(&self, name: &str) -> Result<bool> {
        endpoints::index_exists(&self.http, &self.base_url, &self.auth, name, self.max_retries)
            .await
    }

    /// Whether an alias named `name` exists.
    pub async fn alias_exists(&self, name: &str) -> Result<bool> {
        endpoints::alias_exists(&self.http, &self.base_url, &self.auth, name, self.max_retries)
            .await
    }

    /// Apply `settings` to every index in `indices`.
    pub async fn put_settings(
        &self,
        indices: &[String],
        settings: &Value,
    ) -> Result<AcknowledgedResponse> {
        endpoints::put_settings(
            &self.http,
            &self.base_url,
            &self.auth,
            indices,
            settings,
            self.max_retries,
        )
        .await
    }
}
