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

//! Storage region selection
//!
//! A region picks the physical locality of the backing store. Every key is
//! implicitly scoped to the region of the store handle it was written
//! through; regions never see each other's data.

use crate::{MeshlogError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Storage partition selector.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Region {
    /// North, Central, and South America (stored in the US).
    Americas,
    /// Europe, Middle East, Africa (stored in the EU).
    Europe,
    /// Asia and Pacific (stored in Japan).
    #[default]
    AsiaPacific,
}

impl Region {
    /// Canonical wire string, used in persisted key names.
    pub fn as_str(&self) -> &'static str {
        match self {
            Region::Americas => "americas",
            Region::Europe => "europe",
            Region::AsiaPacific => "asia-pacific",
        }
    }

    /// All regions, in a fixed order.
    pub fn all() -> [Region; 3] {
        [Region::Americas, Region::Europe, Region::AsiaPacific]
    }
}

impl fmt::Display for Region {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Region {
    type Err = MeshlogError;

    /// Parses the canonical spelling and the legacy short codes
    /// (`amer`/`emea`/`apac`) still found in older deployments.
    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "americas" | "amer" => Ok(Region::Americas),
            "europe" | "emea" => Ok(Region::Europe),
            "asia-pacific" | "apac" => Ok(Region::AsiaPacific),
            other => Err(MeshlogError::InvalidConfig(format!(
                "unknown region '{other}'"
            ))),
        }
    }
}
