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

//! Log retrieval service
//!
//! Serves the most recent records of a day, newest first, with statistics
//! derived from the fetched window. A day with no index — expired or never
//! written — is an empty result, not an error. Ids whose records have
//! independently expired are skipped without comment: a record's TTL is
//! shorter than the index's, so dangling ids are the normal end of life.

use chrono::{NaiveDate, Utc};
use meshlog_core::{LogRecord, Region, Result, ServiceConfig};
use meshlog_storage::{codec, index_key, record_key, utc_today, KvStore};
use serde::Serialize;
use std::sync::Arc;
use tracing::{debug, info};

use crate::stats::DerivedStatistics;

/// One page of recent records plus derived statistics.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LogPage {
    /// Fetched records, newest first.
    pub logs: Vec<LogRecord>,
    pub statistics: DerivedStatistics,
    /// The page size actually applied.
    pub requested_limit: usize,
    /// Ids listed in the day's index, including ones whose records have
    /// already expired.
    pub total_available: usize,
}

/// Serves paginated, aggregated views of recent activity.
pub struct QueryService {
    store: Arc<dyn KvStore>,
    config: ServiceConfig,
}

impl QueryService {
    /// Create the service over a region-scoped store handle.
    pub fn new(store: Arc<dyn KvStore>, config: ServiceConfig) -> Result<Self> {
        config.validate()?;
        if store.region() != config.region {
            return Err(meshlog_core::MeshlogError::InvalidConfig(format!(
                "store is scoped to {} but config names {}",
                store.region(),
                config.region
            )));
        }
        Ok(Self { store, config })
    }

    /// Fetch the most recent records for a day.
    ///
    /// `day` defaults to the current UTC date, `limit` to the configured
    /// page size. No upper bound is applied to `limit`; callers are
    /// expected to impose their own.
    pub async fn recent_logs(
        &self,
        day: Option<NaiveDate>,
        limit: Option<usize>,
    ) -> Result<LogPage> {
        let date = day.unwrap_or_else(utc_today);
        let limit = limit.unwrap_or(self.config.default_page_limit);

        let raw = self.store.get(&index_key(self.store.region(), date)).await?;
        let index = codec::decode_index(raw.as_deref(), date);
        let total_available = index.log_ids.len();

        let mut logs: Vec<LogRecord> = Vec::with_capacity(limit.min(total_available));
        for id in index.log_ids.iter().rev().take(limit) {
            let raw = self.store.get(&record_key(id)).await?;
            match codec::decode_record(raw.as_deref()) {
                Some(record) => logs.push(record),
                None => debug!(%id, "record expired before its index entry, skipping"),
            }
        }

        let statistics = DerivedStatistics::compute(&index, &logs, Utc::now());
        info!(
            region = %self.store.region(),
            %date,
            returned = logs.len(),
            total_available,
            "served recent logs"
        );

        Ok(LogPage {
            logs,
            statistics,
            requested_limit: limit,
            total_available,
        })
    }

    /// The region this service reads from.
    pub fn region(&self) -> Region {
        self.store.region()
    }
}
