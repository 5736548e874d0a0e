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

//! Meshlog API
//!
//! The two public operations of the request-logging subsystem, exposed to
//! the presentation layer as plain async services plus serializable
//! response envelopes:
//!
//! - [`IngestService::log_request`]: record one inbound request and update
//!   the day's index.
//! - [`QueryService::recent_logs`]: page through a day's most recent
//!   records with derived statistics.
//!
//! Each call is a single request-scoped unit of work; store operations are
//! awaited sequentially with no internal fan-out. Concurrent ingestions for
//! the same region and day race on the index read-modify-write with
//! last-writer-wins semantics (the store offers no compare-and-swap).

pub mod ingest;
pub mod query;
pub mod response;
pub mod stats;

pub use ingest::{IngestReceipt, IngestService};
pub use query::{LogPage, QueryService};
pub use response::{LogRequestResponse, RecentLogsResponse};
pub use stats::{DerivedStatistics, QueryCount, QUERY_FINGERPRINT_LEN, TOP_QUERY_LIMIT};
