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

//! Record identifier generation
//!
//! Identifier generation sits behind a trait so tests can inject
//! deterministic ids. The production generator combines the millisecond
//! clock with 64 random bits; no central sequence is required for
//! collision resistance across concurrent callers and processes.

use rand::Rng;
use std::sync::atomic::{AtomicU64, Ordering};

/// Mints record identifiers.
pub trait IdGenerator: Send + Sync {
    /// Produce a fresh identifier, unique across concurrent calls.
    fn generate(&self) -> String;
}

/// Clock + randomness identifier generator used in production.
#[derive(Debug, Default)]
pub struct ClockRandomIds;

impl IdGenerator for ClockRandomIds {
    fn generate(&self) -> String {
        let millis = chrono::Utc::now().timestamp_millis().max(0) as u128;
        let noise: u64 = rand::thread_rng().gen();
        format!("{:x}", (millis << 64) | noise as u128)
    }
}

/// Deterministic generator for tests: `prefix-1`, `prefix-2`, ...
#[derive(Debug)]
pub struct SequentialIds {
    prefix: String,
    next: AtomicU64,
}

impl SequentialIds {
    pub fn new(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
            next: AtomicU64::new(1),
        }
    }
}

impl IdGenerator for SequentialIds {
    fn generate(&self) -> String {
        let n = self.next.fetch_add(1, Ordering::Relaxed);
        format!("{}-{}", self.prefix, n)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn clock_random_ids_are_unique() {
        let ids = ClockRandomIds;
        let minted: HashSet<String> = (0..1000).map(|_| ids.generate()).collect();
        assert_eq!(minted.len(), 1000);
    }

    #[test]
    fn clock_random_ids_are_lowercase_hex() {
        let id = ClockRandomIds.generate();
        assert!(!id.is_empty());
        assert!(id.chars().all(|c| c.is_ascii_hexdigit() && !c.is_ascii_uppercase()));
    }

    #[test]
    fn sequential_ids_count_up() {
        let ids = SequentialIds::new("test");
        assert_eq!(ids.generate(), "test-1");
        assert_eq!(ids.generate(), "test-2");
        assert_eq!(ids.generate(), "test-3");
    }
}
