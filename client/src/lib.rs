extern crate alloc;

pub mod engine;
pub mod storage;

use wasm_bindgen::prelude::*;

#[wasm_bindgen(start)]
pub fn init() {
    console_error_panic_hook::set_once();
    #[cfg(feature = "browser_log")]
    let _ = console_log::init_with_level(log::Level::Debug);
}

/// Format seconds as `m:ss` for the timer display
#[wasm_bindgen]
pub fn format_time(seconds: u32) -> String {
    wordmatch_core::view::format_time(seconds)
}
