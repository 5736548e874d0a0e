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

//! Error taxonomy for the logging subsystem
//!
//! Absent keys and malformed persisted payloads are not errors: the codec
//! absorbs them and substitutes defaults. Only store-level failures and
//! invalid caller configuration surface here.

use thiserror::Error;

/// Meshlog errors.
#[derive(Debug, Error)]
pub enum MeshlogError {
    /// The underlying state store could not be reached or initialized.
    /// Never retried internally; retry policy belongs to the caller.
    #[error("state store unavailable: {0}")]
    StoreUnavailable(String),

    /// The record write or the day-index update failed. The operation is
    /// reported as a whole failure even when the record itself was persisted.
    #[error("failed to log request: {0}")]
    IngestionFailed(String),

    /// Configuration or caller input rejected by validation.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// A domain value could not be serialized for storage.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Result type for meshlog operations.
pub type Result<T> = std::result::Result<T, MeshlogError>;
