use std::cell::RefCell;
use std::collections::HashMap;

pub const THEME_KEY: &str = "theme";

/// Per-page play counter key.
pub fn play_count_key(path: &str) -> String {
    format!("playCount_{path}")
}

/// Per-page user rating key.
pub fn rating_key(path: &str) -> String {
    format!("rating_{path}")
}

/// String key-value persistence shared by the page components.
pub trait KeyValueStore {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&self, key: &str, value: &str);
}

impl<T: KeyValueStore + ?Sized> KeyValueStore for &T {
    fn get(&self, key: &str) -> Option<String> {
        (**self).get(key)
    }

    fn set(&self, key: &str, value: &str) {
        (**self).set(key, value)
    }
}

/// Browser `localStorage`. Reads return `None` and writes are dropped when
/// storage is unavailable (private mode, native builds).
#[derive(Debug, Default, Clone, Copy)]
pub struct LocalStorage;

impl KeyValueStore for LocalStorage {
    fn get(&self, key: &str) -> Option<String> {
        with_local_storage(|s| s.get_item(key).ok().flatten()).flatten()
    }

    fn set(&self, key: &str, value: &str) {
        with_local_storage(|s| {
            if let Err(e) = s.set_item(key, value) {
                crate::diag::console_warn!("localStorage write of {key} failed: {e:?}");
            }
        });
    }
}

/// In-memory store for tests and for pages without storage access.
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: RefCell<HashMap<String, String>>,
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.borrow().get(key).cloned()
    }

    fn set(&self, key: &str, value: &str) {
        self.entries
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
    }
}

/// Calls the closure with browser localStorage, if available. Always `None`
/// on non-WASM.
#[allow(unused_variables)]
pub fn with_local_storage<R>(f: impl FnOnce(&web_sys::Storage) -> R) -> Option<R> {
    #[cfg(target_family = "wasm")]
    {
        if let Some(window) = web_sys::window()
            && let Ok(Some(storage)) = window.local_storage()
        {
            return Some(f(&storage));
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keys_follow_page_path() {
        assert_eq!(play_count_key("/snake/"), "playCount_/snake/");
        assert_eq!(rating_key("/snake/"), "rating_/snake/");
    }

    #[test]
    fn memory_store_round_trip() {
        let store = MemoryStore::default();
        assert_eq!(store.get("theme"), None);
        store.set("theme", "light");
        store.set("theme", "dark");
        assert_eq!(store.get("theme").as_deref(), Some("dark"));
    }

    #[test]
    fn local_storage_is_inert_natively() {
        let store = LocalStorage;
        store.set("k", "v");
        assert_eq!(store.get("k"), None);
    }
}
