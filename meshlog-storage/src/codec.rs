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

//! Record codec and normalizer
//!
//! The index's on-disk shape has changed across deployments, so every read
//! re-validates: a payload either decodes as the current shape or is
//! normalized field by field to a safe default. Decoding is total — a
//! corrupt or legacy value never aborts the caller's request, it logs one
//! warning and degrades.

use chrono::NaiveDate;
use meshlog_core::{DailyIndex, LogRecord, Result};
use serde::Serialize;
use serde_json::Value;
use tracing::warn;

/// Serialize a domain value to the store's string value type.
pub fn encode<T: Serialize>(value: &T) -> Result<String> {
    Ok(serde_json::to_string(value)?)
}

/// Decode a stored log record. Absent or unreadable values yield `None`;
/// the caller treats the record as expired and skips it.
pub fn decode_record(raw: Option<&str>) -> Option<LogRecord> {
    let raw = raw?;
    match serde_json::from_str(raw) {
        Ok(record) => Some(record),
        Err(e) => {
            warn!(error = %e, "unreadable log record, skipping");
            None
        }
    }
}

/// Decode a stored day index. Absent, legacy-shaped, or corrupt values all
/// resolve to a well-formed index; `date` seeds the zero-value fallback.
pub fn decode_index(raw: Option<&str>, date: NaiveDate) -> DailyIndex {
    let Some(raw) = raw else {
        return DailyIndex::empty(date);
    };
    let index = match serde_json::from_str::<DailyIndex>(raw) {
        Ok(index) => index,
        Err(_) => {
            warn!(%date, "day index has legacy or corrupt shape, normalizing");
            normalize_index(raw, date)
        }
    };
    clamp_count(index)
}

/// Field-level normalization for payloads that miss the current shape:
/// non-object documents reset wholesale, a non-numeric count resets to
/// zero, and the id list (current `logIds` or legacy `requests`) keeps
/// only its string elements.
fn normalize_index(raw: &str, date: NaiveDate) -> DailyIndex {
    let Ok(Value::Object(map)) = serde_json::from_str::<Value>(raw) else {
        return DailyIndex::empty(date);
    };

    let stored_date = map
        .get("date")
        .and_then(Value::as_str)
        .and_then(|s| s.parse().ok())
        .unwrap_or(date);
    let count = map.get("count").and_then(Value::as_u64).unwrap_or(0);
    let log_ids = match map.get("logIds").or_else(|| map.get("requests")) {
        Some(Value::Array(items)) => items
            .iter()
            .filter_map(Value::as_str)
            .map(str::to_string)
            .collect(),
        _ => Vec::new(),
    };

    DailyIndex {
        date: stored_date,
        count,
        log_ids,
    }
}

/// Drifted payloads can claim fewer ingestions than they list ids for;
/// raising the count preserves the length/count invariant.
fn clamp_count(mut index: DailyIndex) -> DailyIndex {
    let listed = index.log_ids.len() as u64;
    if listed > index.count {
        warn!(
            count = index.count,
            listed, "day index count below id list length, raising"
        );
        index.count = listed;
    }
    index
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn day() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 6, 1).unwrap()
    }

    #[test]
    fn absent_index_yields_zero_value() {
        let index = decode_index(None, day());
        assert_eq!(index, DailyIndex::empty(day()));
    }

    #[test]
    fn current_shape_roundtrips() {
        let mut index = DailyIndex::empty(day());
        index.append("a".into());
        index.append("b".into());
        let raw = encode(&index).unwrap();
        assert_eq!(decode_index(Some(&raw), day()), index);
    }

    #[test]
    fn truncated_payload_yields_zero_value() {
        let index = decode_index(Some(r#"{"date":"2025-06-01","cou"#), day());
        assert_eq!(index.count, 0);
        assert!(index.log_ids.is_empty());
    }

    #[test]
    fn bare_string_payload_yields_zero_value() {
        // Very old deployments stored stats as a plain string.
        let index = decode_index(Some(r#""42 requests so far""#), day());
        assert_eq!(index.count, 0);
        assert!(index.log_ids.is_empty());
    }

    #[test]
    fn non_numeric_count_resets_to_zero() {
        let raw = r#"{"date":"2025-06-01","count":"seven","logIds":["a"]}"#;
        let index = decode_index(Some(raw), day());
        // The id survives, and the count is re-raised to cover it.
        assert_eq!(index.log_ids, vec!["a".to_string()]);
        assert_eq!(index.count, 1);
    }

    #[test]
    fn non_sequence_ids_reset_to_empty() {
        let raw = r#"{"date":"2025-06-01","count":3,"logIds":42}"#;
        let index = decode_index(Some(raw), day());
        assert_eq!(index.count, 3);
        assert!(index.log_ids.is_empty());
    }

    #[test]
    fn legacy_requests_field_is_read() {
        let raw = r#"{"date":"2025-06-01","count":2,"requests":["a","b"]}"#;
        let index = decode_index(Some(raw), day());
        assert_eq!(index.log_ids, vec!["a".to_string(), "b".to_string()]);
        assert_eq!(index.count, 2);
    }

    #[test]
    fn legacy_request_objects_are_dropped() {
        // The oldest shape listed request summaries, not ids.
        let raw = r#"{"date":"2025-06-01","count":2,"requests":[{"method":"POST"},{"method":"GET"}]}"#;
        let index = decode_index(Some(raw), day());
        assert!(index.log_ids.is_empty());
        assert_eq!(index.count, 2);
    }

    #[test]
    fn count_below_id_list_is_raised() {
        let raw = r#"{"date":"2025-06-01","count":1,"logIds":["a","b","c"]}"#;
        let index = decode_index(Some(raw), day());
        assert_eq!(index.count, 3);
    }

    #[test]
    fn stored_date_wins_over_requested() {
        let raw = r#"{"date":"2025-05-31","count":"bad","logIds":[]}"#;
        let index = decode_index(Some(raw), day());
        assert_eq!(index.date, NaiveDate::from_ymd_opt(2025, 5, 31).unwrap());
    }

    #[test]
    fn absent_record_yields_none() {
        assert!(decode_record(None).is_none());
    }

    #[test]
    fn corrupt_record_yields_none() {
        assert!(decode_record(Some("not json")).is_none());
    }

    #[test]
    fn valid_record_decodes() {
        let raw = r#"{"id":"x","timestamp":"2025-06-01T12:00:00Z","method":"GET","url":"u","query":"q","userAgent":"ua"}"#;
        let record = decode_record(Some(raw)).unwrap();
        assert_eq!(record.id, "x");
        assert_eq!(record.user_agent, "ua");
    }

    proptest! {
        /// Decoding never fails and never yields more ids than the count.
        #[test]
        fn decode_index_is_total(raw in ".*") {
            let index = decode_index(Some(&raw), day());
            prop_assert!(index.log_ids.len() as u64 <= index.count);
        }

        #[test]
        fn decode_record_is_total(raw in ".*") {
            let _ = decode_record(Some(&raw));
        }
    }
}
