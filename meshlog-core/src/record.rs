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

//! Log records and ingestion input
//!
//! A [`LogRecord`] is one ingested API request. It is created once at
//! ingestion, never mutated, and expires from the store after the record
//! TTL. Persisted JSON uses camelCase field names to stay readable against
//! payloads written by earlier deployments.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Method recorded when the caller did not supply one.
pub const DEFAULT_METHOD: &str = "POST";
/// URL sentinel for requests with no URL field.
pub const UNKNOWN_URL: &str = "Unknown URL";
/// Query sentinel for requests with no query/body descriptor.
pub const NO_QUERY: &str = "No query provided";
/// User agent sentinel when the header is missing.
pub const UNKNOWN_USER_AGENT: &str = "Unknown";

/// Replacement for the authorization header value in anything we log.
const HIDDEN: &str = "<hidden>";

fn default_method() -> String {
    DEFAULT_METHOD.to_string()
}

fn default_url() -> String {
    UNKNOWN_URL.to_string()
}

fn default_query() -> String {
    NO_QUERY.to_string()
}

fn default_user_agent() -> String {
    UNKNOWN_USER_AGENT.to_string()
}

/// One ingested request.
///
/// The non-identifying fields carry serde defaults so that records written
/// by older deployments (which omitted some of them) still decode.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LogRecord {
    /// Opaque unique identifier assigned at ingestion.
    pub id: String,
    /// Instant the request was received (or the caller-supplied override).
    pub timestamp: DateTime<Utc>,
    #[serde(default = "default_method")]
    pub method: String,
    #[serde(default = "default_url")]
    pub url: String,
    #[serde(default = "default_query")]
    pub query: String,
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
}

impl LogRecord {
    /// Build a record from ingestion input, filling every missing field
    /// with its documented default.
    pub fn from_fields(id: String, fields: &RequestFields, now: DateTime<Utc>) -> Self {
        Self {
            id,
            timestamp: fields.timestamp.unwrap_or(now),
            method: fields.method.clone().unwrap_or_else(default_method),
            url: fields.url.clone().unwrap_or_else(default_url),
            query: fields.query.clone().unwrap_or_else(default_query),
            user_agent: fields.user_agent().unwrap_or_else(default_user_agent),
        }
    }
}

/// Caller-supplied description of an inbound request. Every field is
/// optional; defaults are applied when the record is built.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct RequestFields {
    pub timestamp: Option<DateTime<Utc>>,
    pub method: Option<String>,
    pub url: Option<String>,
    pub query: Option<String>,
    /// Raw request headers; only `user-agent` is persisted.
    pub headers: HashMap<String, String>,
}

impl RequestFields {
    /// The `user-agent` header, matched case-insensitively.
    pub fn user_agent(&self) -> Option<String> {
        self.headers
            .iter()
            .find(|(name, _)| name.eq_ignore_ascii_case("user-agent"))
            .map(|(_, value)| value.clone())
    }

    /// Headers safe to emit in logs: the authorization value is masked.
    pub fn sanitized_headers(&self) -> HashMap<String, String> {
        self.headers
            .iter()
            .map(|(name, value)| {
                if name.eq_ignore_ascii_case("authorization") {
                    (name.clone(), HIDDEN.to_string())
                } else {
                    (name.clone(), value.clone())
                }
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 6, 1, 12, 0, 0).unwrap()
    }

    #[test]
    fn defaults_applied_for_missing_fields() {
        let record = LogRecord::from_fields("abc".into(), &RequestFields::default(), now());
        assert_eq!(record.id, "abc");
        assert_eq!(record.timestamp, now());
        assert_eq!(record.method, DEFAULT_METHOD);
        assert_eq!(record.url, UNKNOWN_URL);
        assert_eq!(record.query, NO_QUERY);
        assert_eq!(record.user_agent, UNKNOWN_USER_AGENT);
    }

    #[test]
    fn supplied_fields_pass_through() {
        let fields = RequestFields {
            timestamp: Some(now() - chrono::Duration::minutes(5)),
            method: Some("GET".into()),
            url: Some("https://example.com/graphql".into()),
            query: Some("{ products { sku } }".into()),
            headers: HashMap::from([("User-Agent".to_string(), "curl/8.0".to_string())]),
        };
        let record = LogRecord::from_fields("abc".into(), &fields, now());
        assert_eq!(record.timestamp, now() - chrono::Duration::minutes(5));
        assert_eq!(record.method, "GET");
        assert_eq!(record.url, "https://example.com/graphql");
        assert_eq!(record.query, "{ products { sku } }");
        assert_eq!(record.user_agent, "curl/8.0");
    }

    #[test]
    fn persisted_shape_uses_camel_case() {
        let record = LogRecord::from_fields("abc".into(), &RequestFields::default(), now());
        let json = serde_json::to_string(&record).unwrap();
        assert!(json.contains("\"userAgent\""));
        assert!(!json.contains("\"user_agent\""));
    }

    #[test]
    fn partial_record_decodes_with_defaults() {
        let json = r#"{"id":"old-1","timestamp":"2025-06-01T12:00:00Z"}"#;
        let record: LogRecord = serde_json::from_str(json).unwrap();
        assert_eq!(record.method, DEFAULT_METHOD);
        assert_eq!(record.user_agent, UNKNOWN_USER_AGENT);
    }

    #[test]
    fn authorization_header_is_masked() {
        let fields = RequestFields {
            headers: HashMap::from([
                ("Authorization".to_string(), "Bearer secret".to_string()),
                ("user-agent".to_string(), "curl/8.0".to_string()),
            ]),
            ..Default::default()
        };
        let sanitized = fields.sanitized_headers();
        assert_eq!(sanitized["Authorization"], "<hidden>");
        assert_eq!(sanitized["user-agent"], "curl/8.0");
    }
}
