use serde::de::DeserializeOwned;
use serde::Serialize;
use sweep_core::{DeletionStats, PersistedState};
use sweep_engine::KeyValueStore;
use sweep_logging::{sweep_debug, sweep_error, sweep_info, sweep_warn};

const STATE_KEY: &str = "bulk_delete_state";
const STATS_KEY: &str = "bulk_delete_stats";

/// RON documents in a key-value store. Failures are logged and never reach
/// the caller.
pub struct Persistence {
    store: Box<dyn KeyValueStore>,
}

impl Persistence {
    pub fn new(store: Box<dyn KeyValueStore>) -> Self {
        Self { store }
    }

    pub fn load_state(&self) -> PersistedState {
        let state: PersistedState = self.load(STATE_KEY).unwrap_or_default();
        sweep_info!(
            "Restored state: enabled={}, {} selected ids",
            state.is_enabled,
            state.selected_ids.len()
        );
        state
    }

    pub fn save_state(&self, state: &PersistedState) {
        self.save(STATE_KEY, state);
    }

    pub fn load_stats(&self) -> DeletionStats {
        self.load(STATS_KEY).unwrap_or_default()
    }

    /// Adds `removed` to the counter for `day`.
    pub fn record_removals(&self, day: &str, removed: usize) -> DeletionStats {
        let mut stats = self.load_stats();
        stats.record(day, removed as u64);
        self.save(STATS_KEY, &stats);
        stats
    }

    fn load<T: DeserializeOwned>(&self, key: &str) -> Option<T> {
        let content = match self.store.load(key) {
            Ok(Some(text)) => text,
            Ok(None) => {
                sweep_debug!("Nothing stored under {key}");
                return None;
            }
            Err(err) => {
                sweep_warn!("Failed to read {key}: {err}");
                return None;
            }
        };

        match ron::from_str(&content) {
            Ok(value) => Some(value),
            Err(err) => {
                sweep_warn!("Failed to parse {key}: {err}");
                None
            }
        }
    }

    fn save<T: Serialize>(&self, key: &str, value: &T) {
        let pretty = ron::ser::PrettyConfig::new();
        let content = match ron::ser::to_string_pretty(value, pretty) {
            Ok(text) => text,
            Err(err) => {
                sweep_error!("Failed to serialize {key}: {err}");
                return;
            }
        };

        if let Err(err) = self.store.save(key, &content) {
            sweep_error!("Failed to write {key}: {err}");
        }
    }
}
