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

//! Response envelopes for the presentation layer
//!
//! Success and failure share one shape per operation, distinguished by the
//! explicit `success` flag — never by shape alone. Failures carry a
//! human-readable message.

use meshlog_core::{IndexSummary, LogRecord, Region, Result};
use serde::Serialize;

use crate::ingest::IngestReceipt;
use crate::query::LogPage;
use crate::stats::DerivedStatistics;

/// Envelope for the log-request operation.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LogRequestResponse {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub log_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub region: Option<Region>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stats_for_today: Option<IndexSummary>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl From<Result<IngestReceipt>> for LogRequestResponse {
    fn from(result: Result<IngestReceipt>) -> Self {
        match result {
            Ok(receipt) => Self {
                success: true,
                log_id: Some(receipt.log_id),
                region: Some(receipt.region),
                stats_for_today: Some(receipt.today),
                error: None,
            },
            Err(e) => Self {
                success: false,
                log_id: None,
                region: None,
                stats_for_today: None,
                error: Some(e.to_string()),
            },
        }
    }
}

/// Envelope for the recent-logs operation.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RecentLogsResponse {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub logs: Option<Vec<LogRecord>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub statistics: Option<DerivedStatistics>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub requested_limit: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total_available: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl From<Result<LogPage>> for RecentLogsResponse {
    fn from(result: Result<LogPage>) -> Self {
        match result {
            Ok(page) => Self {
                success: true,
                logs: Some(page.logs),
                statistics: Some(page.statistics),
                requested_limit: Some(page.requested_limit),
                total_available: Some(page.total_available),
                error: None,
            },
            Err(e) => Self {
                success: false,
                logs: None,
                statistics: None,
                requested_limit: None,
                total_available: None,
                error: Some(e.to_string()),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use meshlog_core::MeshlogError;

    #[test]
    fn success_envelope_carries_receipt() {
        let receipt = IngestReceipt {
            log_id: "abc".into(),
            region: Region::AsiaPacific,
            today: IndexSummary {
                date: NaiveDate::from_ymd_opt(2025, 6, 1).unwrap(),
                total_count: 3,
                total_log_ids: 3,
            },
        };
        let response = LogRequestResponse::from(Ok(receipt));
        let json = serde_json::to_string(&response).unwrap();
        assert!(json.contains("\"success\":true"));
        assert!(json.contains("\"logId\":\"abc\""));
        assert!(json.contains("\"totalCount\":3"));
        assert!(!json.contains("\"error\""));
    }

    #[test]
    fn failure_envelope_carries_message_only() {
        let response = LogRequestResponse::from(Err(MeshlogError::IngestionFailed(
            "state store unavailable: connection refused".into(),
        )));
        let json = serde_json::to_string(&response).unwrap();
        assert!(json.contains("\"success\":false"));
        assert!(json.contains("connection refused"));
        assert!(!json.contains("\"logId\""));
    }

    #[test]
    fn recent_logs_failure_has_no_page_fields() {
        let response = RecentLogsResponse::from(Err(MeshlogError::StoreUnavailable(
            "init failed".into(),
        )));
        let json = serde_json::to_string(&response).unwrap();
        assert!(json.contains("\"success\":false"));
        assert!(!json.contains("\"logs\""));
        assert!(!json.contains("\"totalAvailable\""));
    }
}
