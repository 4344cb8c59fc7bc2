//! The persisted cache entry format: `{"dados": <payload>, "timestamp": <ms>}`.

use std::time::Duration;

use serde::{Deserialize, Serialize};
use serde_json::Value;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CacheEntry {
    /// The raw payload as received; re-validated on every read.
    pub dados: Value,
    /// Epoch milliseconds at which the payload was stored.
    pub timestamp: i64,
}

impl CacheEntry {
    #[must_use]
    pub fn new(dados: Value, timestamp: i64) -> Self {
        Self { dados, timestamp }
    }

    /// An entry is fresh while `now - timestamp < ttl`.
    ///
    /// Entries stamped in the future (clock moved backwards) are stale.
    #[must_use]
    pub fn is_fresh(&self, now_millis: i64, ttl: Duration) -> bool {
        let age = i128::from(now_millis) - i128::from(self.timestamp);
        let ttl = i128::try_from(ttl.as_millis()).unwrap_or(i128::MAX);
        (0..ttl).contains(&age)
    }
}
