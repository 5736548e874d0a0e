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

//! Meshlog Core
//!
//! Fundamental data structures and types for the request-logging subsystem:
//! log records, per-day indexes, storage regions, identifier generation,
//! and service configuration.

pub mod config;
pub mod error;
pub mod id;
pub mod index;
pub mod record;
pub mod region;

pub use config::{ServiceConfig, DEFAULT_INDEX_TTL_SECS, DEFAULT_PAGE_LIMIT, DEFAULT_RECORD_TTL_SECS};
pub use error::{MeshlogError, Result};
pub use id::{ClockRandomIds, IdGenerator, SequentialIds};
pub use index::{DailyIndex, IndexSummary};
pub use record::{LogRecord, RequestFields};
pub use region::Region;
