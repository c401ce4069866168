use arcade_core::format::format_short;

use crate::storage::{KeyValueStore, play_count_key};

/// Play count for one page path.
///
/// When storage has no value yet the count starts from the number rendered
/// into the page, so the first play on a fresh browser reads as
/// `rendered + 1` rather than `1`.
pub struct PlayCounter<S: KeyValueStore> {
    store: S,
    key: String,
    count: u64,
}

impl<S: KeyValueStore> PlayCounter<S> {
    pub fn load(store: S, path: &str, seed: u64) -> Self {
        let key = play_count_key(path);
        let count = store
            .get(&key)
            .and_then(|v| v.trim().parse().ok())
            .unwrap_or(seed);
        Self { store, key, count }
    }

    pub fn count(&self) -> u64 {
        self.count
    }

    pub fn increment(&mut self) -> u64 {
        self.count = self.count.saturating_add(1);
        self.store.set(&self.key, &self.count.to_string());
        self.count
    }

    pub fn display(&self) -> String {
        format_short(self.count)
    }
}

/// Seed from a `data-plays` attribute: leading digits, `0` when absent.
pub fn parse_seed(raw: Option<&str>) -> u64 {
    let digits: String = raw
        .unwrap_or_default()
        .trim()
        .chars()
        .take_while(char::is_ascii_digit)
        .collect();
    digits.parse().unwrap_or(0)
}
