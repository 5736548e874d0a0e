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

//! Persisted key layout
//!
//! - Records: `record:{id}`
//! - Day indexes: `index:{region}:{YYYY-MM-DD}`
//!
//! Record keys carry no region because the store handle itself is
//! region-scoped; the index key repeats the region so the layout stays
//! unambiguous when keys are inspected out of band.

use chrono::{NaiveDate, Utc};
use meshlog_core::Region;

/// Key prefix for individual log records.
pub const RECORD_PREFIX: &str = "record";

/// Key prefix for day indexes.
pub const INDEX_PREFIX: &str = "index";

/// Storage key for one log record.
pub fn record_key(id: &str) -> String {
    format!("{RECORD_PREFIX}:{id}")
}

/// Storage key for the day index of a region and UTC date.
pub fn index_key(region: Region, date: NaiveDate) -> String {
    format!("{INDEX_PREFIX}:{}:{}", region.as_str(), date.format("%Y-%m-%d"))
}

/// The current UTC calendar day, the locale-independent day key.
pub fn utc_today() -> NaiveDate {
    Utc::now().date_naive()
}
