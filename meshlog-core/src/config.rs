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

//! Service configuration
//!
//! Retention horizons and paging defaults for the logging services. The
//! index TTL must never drop below the record TTL: an index that disappears
//! while its members live on is acceptable, the reverse ordering is not.

use crate::{MeshlogError, Region, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Individual record retention: 10 hours.
pub const DEFAULT_RECORD_TTL_SECS: u64 = 10 * 60 * 60;

/// Day-index retention: 24 hours.
pub const DEFAULT_INDEX_TTL_SECS: u64 = 24 * 60 * 60;

/// Records returned by retrieval when the caller gives no limit.
pub const DEFAULT_PAGE_LIMIT: usize = 20;

fn default_record_ttl_secs() -> u64 {
    DEFAULT_RECORD_TTL_SECS
}

fn default_index_ttl_secs() -> u64 {
    DEFAULT_INDEX_TTL_SECS
}

fn default_page_limit() -> usize {
    DEFAULT_PAGE_LIMIT
}

/// Configuration shared by the ingestion and retrieval services.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServiceConfig {
    /// Storage region for every key written or read through the services.
    #[serde(default)]
    pub region: Region,

    /// Seconds before an individual record expires.
    #[serde(default = "default_record_ttl_secs")]
    pub record_ttl_secs: u64,

    /// Seconds before a day index expires. Must be >= `record_ttl_secs`.
    #[serde(default = "default_index_ttl_secs")]
    pub index_ttl_secs: u64,

    /// Page size used when retrieval is called without a limit. No upper
    /// bound is enforced on caller-supplied limits.
    #[serde(default = "default_page_limit")]
    pub default_page_limit: usize,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            region: Region::default(),
            record_ttl_secs: default_record_ttl_secs(),
            index_ttl_secs: default_index_ttl_secs(),
            default_page_limit: default_page_limit(),
        }
    }
}

impl ServiceConfig {
    /// Parse a TOML document; missing fields take their defaults.
    pub fn from_toml_str(raw: &str) -> Result<Self> {
        let config: Self = toml::from_str(raw)
            .map_err(|e| MeshlogError::InvalidConfig(format!("bad config: {e}")))?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a TOML file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let raw = std::fs::read_to_string(path.as_ref())
            .map_err(|e| MeshlogError::InvalidConfig(format!("cannot read config: {e}")))?;
        Self::from_toml_str(&raw)
    }

    /// Reject zero TTLs and an index horizon shorter than the record horizon.
    pub fn validate(&self) -> Result<()> {
        if self.record_ttl_secs == 0 || self.index_ttl_secs == 0 {
            return Err(MeshlogError::InvalidConfig(
                "retention TTLs must be positive".to_string(),
            ));
        }
        if self.index_ttl_secs < self.record_ttl_secs {
            return Err(MeshlogError::InvalidConfig(format!(
                "index TTL ({}s) must not be shorter than record TTL ({}s)",
                self.index_ttl_secs, self.record_ttl_secs
            )));
        }
        Ok(())
    }
}
