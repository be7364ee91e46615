//! Game engine for browser WASM builds
//!
//! Wraps the core `MatchEngine` for JavaScript. The page drives the clock by
//! calling `advance` from its animation loop and re-renders from `get_view`.

use std::format;
use std::string::{String, ToString};
use std::vec::Vec;

use serde::Serialize;
use wasm_bindgen::prelude::*;
use wordmatch_core::dictionary::{browse, Direction};
use wordmatch_core::log;
use wordmatch_core::settings::{load_enabled_sets, toggle_set};
use wordmatch_core::state::GameConfig;
use wordmatch_core::types::{CardId, Side};
use wordmatch_core::vocabulary::{all_unique_pairs, WordSetInfo};
use wordmatch_core::MatchEngine;

use crate::storage::LocalStorageStore;

/// The main game engine exposed to WASM
#[wasm_bindgen]
pub struct WordMatchEngine {
    engine: MatchEngine,
    /// Setup-screen settings for the next session
    config: GameConfig,
    store: LocalStorageStore,
}

#[wasm_bindgen]
impl WordMatchEngine {
    /// Create a new engine. Without a seed one is drawn from the browser.
    #[wasm_bindgen(constructor)]
    pub fn new(seed: Option<u64>) -> Self {
        let seed = seed.unwrap_or_else(random_seed);
        log::debug("new", &format!("seed={seed}"));
        Self {
            engine: MatchEngine::new(seed),
            config: GameConfig::default(),
            store: LocalStorageStore::new(),
        }
    }

    /// All vocabulary sets (id, name, description, word count)
    #[wasm_bindgen]
    pub fn get_word_sets(&self) -> JsValue {
        let sets: Vec<WordSetInfo> = self
            .engine
            .vocabulary()
            .iter()
            .map(WordSetInfo::from)
            .collect();
        to_js("get_word_sets", &sets)
    }

    /// Ids of the enabled sets
    #[wasm_bindgen]
    pub fn get_enabled_sets(&self) -> JsValue {
        to_js("get_enabled_sets", &self.enabled_sets())
    }

    /// Flip one set on or off and persist the choice
    #[wasm_bindgen]
    pub fn toggle_set(&mut self, set_id: &str) -> JsValue {
        let enabled = toggle_set(&mut self.store, self.engine.vocabulary(), set_id);
        to_js("toggle_set", &enabled)
    }

    /// Setup-screen settings
    #[wasm_bindgen]
    pub fn get_config(&self) -> JsValue {
        to_js("get_config", &self.config)
    }

    #[wasm_bindgen]
    pub fn increase_card_count(&mut self) {
        self.config.increase_card_count();
    }

    #[wasm_bindgen]
    pub fn decrease_card_count(&mut self) {
        self.config.decrease_card_count();
    }

    #[wasm_bindgen]
    pub fn increase_time_limit(&mut self) {
        self.config.increase_time_limit();
    }

    #[wasm_bindgen]
    pub fn decrease_time_limit(&mut self) {
        self.config.decrease_time_limit();
    }

    #[wasm_bindgen]
    pub fn set_timer_enabled(&mut self, enabled: bool) {
        self.config.timer_enabled = enabled;
    }

    /// Start a session with the current settings and enabled sets
    #[wasm_bindgen]
    pub fn start_game(&mut self) -> Result<(), String> {
        let enabled = self.enabled_sets();
        self.engine
            .start(self.config, &enabled)
            .map_err(|e| e.to_string())
    }

    /// Play again after a session ended
    #[wasm_bindgen]
    pub fn restart(&mut self) -> Result<(), String> {
        let enabled = self.enabled_sets();
        self.engine.restart(&enabled).map_err(|e| e.to_string())
    }

    /// Back to the setup screen
    #[wasm_bindgen]
    pub fn abandon(&mut self) {
        self.engine.abandon();
    }

    /// Handle a click. `side` is "left" or "right".
    #[wasm_bindgen]
    pub fn select(&mut self, card_id: u32, side: &str) -> Result<JsValue, String> {
        let side = Side::parse(side).ok_or_else(|| format!("Unknown side: {side}"))?;
        let outcome = self
            .engine
            .select(CardId(card_id), side)
            .map_err(|e| e.to_string())?;
        Ok(to_js("select", &outcome))
    }

    /// Move the virtual clock forward by `elapsed_ms`
    #[wasm_bindgen]
    pub fn advance(&mut self, elapsed_ms: u32) {
        self.engine.advance(u64::from(elapsed_ms));
    }

    /// Current game view as JSON
    #[wasm_bindgen]
    pub fn get_view(&self) -> JsValue {
        log::debug("get_view", "Serializing session to view");
        to_js("get_view", &self.engine.view())
    }

    /// End-of-game figures, or null while playing
    #[wasm_bindgen]
    pub fn get_summary(&self) -> JsValue {
        match self.engine.summary() {
            Some(summary) => to_js("get_summary", &summary),
            None => JsValue::NULL,
        }
    }

    /// Dictionary listing. `direction` is "forward" or "reverse".
    #[wasm_bindgen]
    pub fn get_dictionary(&self, direction: &str, query: &str) -> Result<JsValue, String> {
        let direction =
            Direction::parse(direction).ok_or_else(|| format!("Unknown direction: {direction}"))?;
        let pairs = all_unique_pairs(self.engine.vocabulary());
        Ok(to_js("get_dictionary", &browse(&pairs, direction, query)))
    }

    /// SCALE-encoded snapshot for `sessionStorage`
    #[wasm_bindgen]
    pub fn export_snapshot(&self) -> Vec<u8> {
        self.engine.snapshot()
    }

    /// Resume from `export_snapshot` bytes
    #[wasm_bindgen]
    pub fn import_snapshot(&mut self, bytes: Vec<u8>) -> Result<(), String> {
        if bytes.is_empty() {
            return Err("Empty snapshot".to_string());
        }
        self.engine.restore(&bytes).map_err(|e| e.to_string())?;
        self.config = self.engine.session().config;
        log::info("import_snapshot completed successfully");
        Ok(())
    }
}

impl WordMatchEngine {
    fn enabled_sets(&self) -> Vec<String> {
        load_enabled_sets(&self.store, self.engine.vocabulary())
    }
}

fn to_js<T: Serialize>(label: &str, value: &T) -> JsValue {
    match serde_wasm_bindgen::to_value(value) {
        Ok(val) => val,
        Err(e) => {
            log::error(&format!("{label} serialization failed: {:?}", e));
            JsValue::NULL
        }
    }
}

fn random_seed() -> u64 {
    let mut bytes = [0u8; 8];
    if let Err(e) = getrandom::getrandom(&mut bytes) {
        log::warn(&format!("getrandom failed, using a fixed seed: {e}"));
        return 0x5eed;
    }
    u64::from_le_bytes(bytes)
}
