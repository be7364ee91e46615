//! Enabled word sets, persisted through a key/value store
//!
//! The stored value is a JSON array of set ids under `SETTINGS_KEY`, the same
//! shape the browser keeps in `localStorage`.

use alloc::collections::BTreeMap;
use alloc::format;
use alloc::string::String;
use alloc::vec::Vec;

use crate::log;
use crate::vocabulary::{all_set_ids, WordSet};

/// Storage key for the enabled set ids
pub const SETTINGS_KEY: &str = "wordmatch_enabled_sets";

/// Minimal string key/value store (mirrors `window.localStorage`)
pub trait SettingsStore {
    fn get_item(&self, key: &str) -> Option<String>;
    fn set_item(&mut self, key: &str, value: &str);
}

/// In-memory store for tests and headless hosts
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    items: BTreeMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl SettingsStore for MemoryStore {
    fn get_item(&self, key: &str) -> Option<String> {
        self.items.get(key).cloned()
    }

    fn set_item(&mut self, key: &str, value: &str) {
        self.items.insert(String::from(key), String::from(value));
    }
}

/// Enabled set ids. Nothing stored (or an unreadable value) means every set.
pub fn load_enabled_sets(store: &impl SettingsStore, sets: &[WordSet]) -> Vec<String> {
    let Some(raw) = store.get_item(SETTINGS_KEY) else {
        return all_set_ids(sets);
    };
    match serde_json::from_str::<Vec<String>>(&raw) {
        Ok(ids) => ids,
        Err(e) => {
            log::warn(&format!("ignoring unreadable {SETTINGS_KEY}: {e}"));
            all_set_ids(sets)
        }
    }
}

pub fn save_enabled_sets(store: &mut impl SettingsStore, ids: &[String]) {
    match serde_json::to_string(ids) {
        Ok(json) => store.set_item(SETTINGS_KEY, &json),
        Err(e) => log::error(&format!("failed to encode enabled sets: {e}")),
    }
}

/// Enable `set_id` if it is off, disable it if it is on, and persist.
/// Returns the new list.
pub fn toggle_set(store: &mut impl SettingsStore, sets: &[WordSet], set_id: &str) -> Vec<String> {
    let mut ids = load_enabled_sets(store, sets);
    if let Some(index) = ids.iter().position(|id| id == set_id) {
        ids.remove(index);
    } else {
        ids.push(String::from(set_id));
    }
    log::action("toggle_set", &format!("{set_id} -> {ids:?}"));
    save_enabled_sets(store, &ids);
    ids
}
