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

//! Derived statistics
//!
//! Computed on read from the fetched window of records, never persisted.

use chrono::{DateTime, Utc};
use meshlog_core::{DailyIndex, LogRecord};
use serde::{Deserialize, Serialize};

/// Queries longer than this are fingerprinted by their leading characters.
pub const QUERY_FINGERPRINT_LEN: usize = 50;

/// Number of top query fingerprints reported.
pub const TOP_QUERY_LIMIT: usize = 5;

/// One query fingerprint and how often it occurred.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QueryCount {
    pub query: String,
    pub count: u64,
}

/// Read-only statistics computed over a retrieval result.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DerivedStatistics {
    /// The day's index (zero-valued when the day has no data).
    pub today: DailyIndex,
    /// Records actually fetched for this page.
    pub retrieved_count: usize,
    /// Fetched records whose timestamp falls within the last hour.
    pub requests_in_last_hour: usize,
    /// Timestamp of the newest fetched record.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub most_recent_timestamp: Option<DateTime<Utc>>,
    /// Up to five most frequent query fingerprints, most frequent first.
    pub top_queries: Vec<QueryCount>,
}

impl DerivedStatistics {
    /// Compute statistics for a page of records. `logs` must be ordered
    /// newest first, as retrieval returns them.
    pub fn compute(index: &DailyIndex, logs: &[LogRecord], now: DateTime<Utc>) -> Self {
        let hour_ago = now - chrono::Duration::hours(1);
        Self {
            today: index.clone(),
            retrieved_count: logs.len(),
            requests_in_last_hour: logs.iter().filter(|l| l.timestamp > hour_ago).count(),
            most_recent_timestamp: logs.first().map(|l| l.timestamp),
            top_queries: top_queries(logs),
        }
    }
}

/// Normalized frequency-counting key for a query: the first
/// [`QUERY_FINGERPRINT_LEN`] characters, internal whitespace runs collapsed
/// to single spaces, trimmed. Truncation happens first so two queries that
/// only differ past the prefix share a fingerprint.
pub fn query_fingerprint(query: &str) -> String {
    let truncated: String = query.chars().take(QUERY_FINGERPRINT_LEN).collect();
    truncated.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// The top fingerprints by descending count. Ties keep first-encountered
/// order, so the result is deterministic for identical input order.
pub fn top_queries(logs: &[LogRecord]) -> Vec<QueryCount> {
    let mut counts: Vec<QueryCount> = Vec::new();
    for log in logs {
        let fingerprint = query_fingerprint(&log.query);
        match counts.iter_mut().find(|c| c.query == fingerprint) {
            Some(entry) => entry.count += 1,
            None => counts.push(QueryCount {
                query: fingerprint,
                count: 1,
            }),
        }
    }
    counts.sort_by(|a, b| b.count.cmp(&a.count));
    counts.truncate(TOP_QUERY_LIMIT);
    counts
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn record(query: &str, timestamp: DateTime<Utc>) -> LogRecord {
        LogRecord {
            id: "id".into(),
            timestamp,
            method: "POST".into(),
            url: "u".into(),
            query: query.into(),
            user_agent: "ua".into(),
        }
    }

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 6, 1, 12, 0, 0).unwrap()
    }

    #[test]
    fn fingerprint_truncates_then_collapses() {
        let long = "query   with\t\twide   gaps".to_string() + &" x".repeat(40);
        let fingerprint = query_fingerprint(&long);
        assert!(fingerprint.len() <= QUERY_FINGERPRINT_LEN);
        assert_eq!(query_fingerprint("  a   b  "), "a b");
    }

    #[test]
    fn fingerprint_shares_prefix_past_cutoff() {
        let base = "q".repeat(QUERY_FINGERPRINT_LEN);
        let a = format!("{base}-variant-one");
        let b = format!("{base}-variant-two");
        assert_eq!(query_fingerprint(&a), query_fingerprint(&b));
    }

    #[test]
    fn repeated_query_ranks_first_singletons_follow_in_order() {
        let mut logs: Vec<LogRecord> = (0..7).map(|_| record("hot query", now())).collect();
        for q in ["w", "x", "y", "z"] {
            logs.push(record(q, now()));
        }
        let top = top_queries(&logs);
        assert_eq!(top.len(), 5);
        assert_eq!(top[0], QueryCount { query: "hot query".into(), count: 7 });
        let tail: Vec<&str> = top[1..].iter().map(|c| c.query.as_str()).collect();
        assert_eq!(tail, vec!["w", "x", "y", "z"]);
    }

    #[test]
    fn top_queries_caps_at_five() {
        let logs: Vec<LogRecord> = (0..8).map(|i| record(&format!("q{i}"), now())).collect();
        assert_eq!(top_queries(&logs).len(), TOP_QUERY_LIMIT);
    }

    #[test]
    fn last_hour_window_excludes_older_records() {
        let logs = vec![
            record("a", now() - chrono::Duration::minutes(10)),
            record("b", now() - chrono::Duration::minutes(59)),
            record("c", now() - chrono::Duration::hours(2)),
        ];
        let stats = DerivedStatistics::compute(
            &DailyIndex::empty(now().date_naive()),
            &logs,
            now(),
        );
        assert_eq!(stats.requests_in_last_hour, 2);
        assert_eq!(
            stats.most_recent_timestamp,
            Some(now() - chrono::Duration::minutes(10))
        );
        assert_eq!(stats.retrieved_count, 3);
    }

    #[test]
    fn empty_page_has_no_most_recent_timestamp() {
        let stats =
            DerivedStatistics::compute(&DailyIndex::empty(now().date_naive()), &[], now());
        assert_eq!(stats.most_recent_timestamp, None);
        assert_eq!(stats.requests_in_last_hour, 0);
        assert!(stats.top_queries.is_empty());
    }
}
