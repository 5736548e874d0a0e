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

//! In-process store implementation
//!
//! Backed by a bounded moka cache with per-entry expiry, so record keys and
//! index keys can carry different TTLs inside the same store. Capacity is
//! bounded at the workspace key limit of the external store this stands in
//! for; moka evicts least-recently-used entries beyond that.

use crate::kv::KvStore;
use async_trait::async_trait;
use meshlog_core::{MeshlogError, Region, Result};
use moka::{sync::Cache, Expiry};
use std::time::{Duration, Instant};

/// Key capacity of one workspace in the external store.
const MAX_KEYS: u64 = 200_000;

#[derive(Debug, Clone)]
struct StoredEntry {
    value: String,
    ttl: Duration,
}

/// Expiry policy reading each entry's own TTL.
struct PerEntryTtl;

impl Expiry<String, StoredEntry> for PerEntryTtl {
    fn expire_after_create(
        &self,
        _key: &String,
        entry: &StoredEntry,
        _created_at: Instant,
    ) -> Option<Duration> {
        Some(entry.ttl)
    }

    fn expire_after_update(
        &self,
        _key: &String,
        entry: &StoredEntry,
        _updated_at: Instant,
        _duration_until_expiry: Option<Duration>,
    ) -> Option<Duration> {
        Some(entry.ttl)
    }
}

/// In-memory region-scoped key/value store with per-key expiry.
///
/// One instance per logical region; instances never share data.
pub struct MemoryStore {
    region: Region,
    cache: Cache<String, StoredEntry>,
}

impl MemoryStore {
    /// Open a store handle for a region.
    pub fn open(region: Region) -> Self {
        let cache = Cache::builder()
            .max_capacity(MAX_KEYS)
            .expire_after(PerEntryTtl)
            .build();
        Self { region, cache }
    }

    /// Number of live entries (expired entries may linger until the next
    /// maintenance pass).
    pub fn entry_count(&self) -> u64 {
        self.cache.run_pending_tasks();
        self.cache.entry_count()
    }
}

#[async_trait]
impl KvStore for MemoryStore {
    fn region(&self) -> Region {
        self.region
    }

    async fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.cache.get(key).map(|entry| entry.value))
    }

    async fn put(&self, key: &str, value: String, ttl_secs: u64) -> Result<()> {
        if ttl_secs == 0 {
            return Err(MeshlogError::InvalidConfig(
                "ttl must be positive".to_string(),
            ));
        }
        let entry = StoredEntry {
            value,
            ttl: Duration::from_secs(ttl_secs),
        };
        self.cache.insert(key.to_string(), entry);
        Ok(())
    }
}
