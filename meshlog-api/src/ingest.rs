// Copyright 2025 Meshlog (https://github.com/meshlog)
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU Affero General Public License as published by
// the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version.
//
// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE. See the
// GNU Affero General Public License for more details.
//
// You should have received a copy of the GNU Affero General Public License
// along with this program. If not, see <https://www.gnu.org/licenses/>.

//! Log ingestion service
//!
//! Persists one record per inbound request and folds its id into the day's
//! index. The record write always precedes the index update, so the index
//! never references a record that was not written. The reverse gap remains:
//! when the index update fails after the record write, the whole operation
//! fails and the record stays logged but uncounted.

use chrono::Utc;
use meshlog_core::{
    DailyIndex, IdGenerator, IndexSummary, LogRecord, MeshlogError, Region, RequestFields, Result,
    ServiceConfig,
};
use meshlog_storage::{codec, index_key, record_key, KvStore};
use serde::Serialize;
use std::sync::Arc;
use tracing::{debug, info};

/// Outcome of a successful ingestion.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct IngestReceipt {
    /// Identifier minted for the record.
    pub log_id: String,
    /// Region the record was stored in.
    pub region: Region,
    /// Post-update totals for today's index.
    pub today: IndexSummary,
}

/// Accepts inbound-request descriptions and records them.
pub struct IngestService {
    store: Arc<dyn KvStore>,
    ids: Arc<dyn IdGenerator>,
    config: ServiceConfig,
}

impl IngestService {
    /// Create the service over a region-scoped store handle.
    pub fn new(
        store: Arc<dyn KvStore>,
        ids: Arc<dyn IdGenerator>,
        config: ServiceConfig,
    ) -> Result<Self> {
        config.validate()?;
        if store.region() != config.region {
            return Err(MeshlogError::InvalidConfig(format!(
                "store is scoped to {} but config names {}",
                store.region(),
                config.region
            )));
        }
        Ok(Self { store, ids, config })
    }

    /// Record one inbound request.
    ///
    /// Mints an identifier, persists the full record under the record TTL,
    /// then appends the id to today's index under the index TTL. Any store
    /// failure surfaces as [`MeshlogError::IngestionFailed`]; partial
    /// progress is never reported as success.
    pub async fn log_request(&self, fields: RequestFields) -> Result<IngestReceipt> {
        debug!(headers = ?fields.sanitized_headers(), "ingesting api request");

        let now = Utc::now();
        let id = self.ids.generate();
        let record = LogRecord::from_fields(id, &fields, now);

        let payload = codec::encode(&record)?;
        self.store
            .put(&record_key(&record.id), payload, self.config.record_ttl_secs)
            .await
            .map_err(ingestion_failed)?;

        let date = now.date_naive();
        let key = index_key(self.store.region(), date);
        let raw = self.store.get(&key).await.map_err(ingestion_failed)?;
        let mut index: DailyIndex = codec::decode_index(raw.as_deref(), date);
        index.append(record.id.clone());
        let encoded = codec::encode(&index)?;
        self.store
            .put(&key, encoded, self.config.index_ttl_secs)
            .await
            .map_err(ingestion_failed)?;

        info!(
            log_id = %record.id,
            region = %self.store.region(),
            count = index.count,
            "request logged"
        );

        Ok(IngestReceipt {
            log_id: record.id,
            region: self.store.region(),
            today: index.summary(),
        })
    }
}

fn ingestion_failed(e: MeshlogError) -> MeshlogError {
    MeshlogError::IngestionFailed(e.to_string())
}
