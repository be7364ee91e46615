//! `window.localStorage` behind the core `SettingsStore` trait

use wordmatch_core::log;
use wordmatch_core::settings::SettingsStore;

/// Settings persisted in the browser. Falls back to doing nothing when
/// storage is unavailable (private mode, sandboxed iframes).
#[derive(Default)]
pub struct LocalStorageStore {
    storage: Option<web_sys::Storage>,
}

impl LocalStorageStore {
    pub fn new() -> Self {
        let storage = web_sys::window().and_then(|window| match window.local_storage() {
            Ok(storage) => storage,
            Err(e) => {
                log::warn(&format!("localStorage unavailable: {:?}", e));
                None
            }
        });
        Self { storage }
    }
}

impl SettingsStore for LocalStorageStore {
    fn get_item(&self, key: &str) -> Option<String> {
        let storage = self.storage.as_ref()?;
        storage.get_item(key).ok().flatten()
    }

    fn set_item(&mut self, key: &str, value: &str) {
        let Some(storage) = self.storage.as_ref() else {
            return;
        };
        if let Err(e) = storage.set_item(key, value) {
            log::error(&format!("failed to persist {key}: {:?}", e));
        }
    }
}
