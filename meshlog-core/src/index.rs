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

//! Per-day record index
//!
//! One [`DailyIndex`] exists per region and UTC calendar day. `count` is the
//! total number of records ingested that day and only ever grows; `log_ids`
//! lists identifiers in ingestion order, oldest first. Individual records
//! expire sooner than the index, so `log_ids` can reference records that are
//! no longer retrievable — that is expected, never an error.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Per-day, per-region summary of ingested records.
///
/// Invariant: `log_ids.len() <= count`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DailyIndex {
    /// UTC calendar day this index covers.
    pub date: NaiveDate,
    /// Total records ingested that day; monotonically non-decreasing.
    pub count: u64,
    /// Record identifiers in ingestion order, oldest first.
    pub log_ids: Vec<String>,
}

impl DailyIndex {
    /// The zero-value index for a day with no ingestions.
    pub fn empty(date: NaiveDate) -> Self {
        Self {
            date,
            count: 0,
            log_ids: Vec::new(),
        }
    }

    /// Record one ingestion: append the id and bump the count together so
    /// the length/count invariant cannot be violated.
    pub fn append(&mut self, id: String) {
        self.log_ids.push(id);
        self.count += 1;
    }

    /// Condensed view returned to ingestion callers.
    pub fn summary(&self) -> IndexSummary {
        IndexSummary {
            date: self.date,
            total_count: self.count,
            total_log_ids: self.log_ids.len(),
        }
    }
}

/// Post-update index totals included in an ingestion receipt.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IndexSummary {
    pub date: NaiveDate,
    pub total_count: u64,
    pub total_log_ids: usize,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn day() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 6, 1).unwrap()
    }

    #[test]
    fn empty_index_is_zero_valued() {
        let index = DailyIndex::empty(day());
        assert_eq!(index.count, 0);
        assert!(index.log_ids.is_empty());
    }

    #[test]
    fn append_keeps_ids_and_count_in_step() {
        let mut index = DailyIndex::empty(day());
        for i in 0..5 {
            index.append(format!("id-{i}"));
        }
        assert_eq!(index.count, 5);
        assert_eq!(index.log_ids.len(), 5);
        assert_eq!(index.log_ids.first().unwrap(), "id-0");
        assert!(index.log_ids.len() as u64 <= index.count);
    }

    #[test]
    fn persisted_shape_matches_deployed_payloads() {
        let mut index = DailyIndex::empty(day());
        index.append("a".into());
        let json = serde_json::to_string(&index).unwrap();
        assert!(json.contains("\"logIds\":[\"a\"]"));
        assert!(json.contains("\"date\":\"2025-06-01\""));
    }

    #[test]
    fn summary_reflects_totals() {
        let mut index = DailyIndex::empty(day());
        index.append("a".into());
        index.append("b".into());
        let summary = index.summary();
        assert_eq!(summary.total_count, 2);
        assert_eq!(summary.total_log_ids, 2);
        assert_eq!(summary.date, day());
    }
}
