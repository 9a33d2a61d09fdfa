use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Running count of removed items, per calendar day and overall.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct DeletionStats {
    pub per_day: BTreeMap<String, u64>,
    pub total: u64,
}

impl DeletionStats {
    /// Adds `removed` to the counter for `day` (an ISO date) and to the total.
    pub fn record(&mut self, day: &str, removed: u64) {
        if removed == 0 {
            return;
        }
        *self.per_day.entry(day.to_string()).or_insert(0) += removed;
        self.total += removed;
    }

    pub fn on_day(&self, day: &str) -> u64 {
        self.per_day.get(day).copied().unwrap_or(0)
    }
}
