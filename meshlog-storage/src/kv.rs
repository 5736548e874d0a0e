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

//! Key/value store adapter contract
//!
//! Wraps an external region-partitioned store with per-key expiry. Transport
//! failures surface as [`MeshlogError::StoreUnavailable`]; the adapter never
//! retries internally. An expired or never-written key reads back as
//! `Ok(None)` — absence is not an error.
//!
//! The external store imposes size limits; they are documented here and
//! surfaced as store failures rather than enforced by the adapter.

use async_trait::async_trait;
use meshlog_core::{Region, Result};

/// Largest accepted key, in bytes. Keys must also be non-empty.
pub const MAX_KEY_BYTES: usize = 1024;

/// Largest accepted value, in bytes.
pub const MAX_VALUE_BYTES: usize = 1024 * 1024;

/// Largest accepted expiry: one year.
pub const MAX_TTL_SECS: u64 = 365 * 24 * 60 * 60;

/// Contract over the external key/value store.
///
/// Every key is implicitly scoped to the handle's region; handles for
/// different regions never observe each other's writes.
#[async_trait]
pub trait KvStore: Send + Sync {
    /// The region this handle was opened for.
    fn region(&self) -> Region;

    /// Read a key. `None` means absent or expired.
    async fn get(&self, key: &str) -> Result<Option<String>>;

    /// Write a key with an expiry, overwriting any previous value.
    async fn put(&self, key: &str, value: String, ttl_secs: u64) -> Result<()>;
}
