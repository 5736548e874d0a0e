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

//! Meshlog Storage Layer
//!
//! Region-partitioned key/value storage with per-key expiry, plus the codec
//! that moves domain records in and out of the store's string value type.
//!
//! ## Architecture
//!
//! ```text
//! Ingestion ──► codec::encode ──► KvStore::put(key, value, ttl)
//! Retrieval ◄── codec::decode ◄── KvStore::get(key)
//! ```
//!
//! - [`kv::KvStore`]: the adapter contract over the external store. One
//!   handle per region, created once and reused.
//! - [`memory::MemoryStore`]: in-process implementation with per-entry TTL.
//! - [`codec`]: total decode/encode; malformed persisted payloads fall back
//!   to safe defaults instead of failing the caller.
//! - [`keys`]: persisted key layout.

pub mod codec;
pub mod keys;
pub mod kv;
pub mod memory;

pub use keys::{index_key, record_key, utc_today, INDEX_PREFIX, RECORD_PREFIX};
pub use kv::{KvStore, MAX_KEY_BYTES, MAX_TTL_SECS, MAX_VALUE_BYTES};
pub use memory::MemoryStore;
