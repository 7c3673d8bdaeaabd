//! WASM module: browser-native wallet connection
//!
//! Provides the JS-facing bridge plus the injected-provider registry:
//! - Probing of `window`-level provider globals via js-sys
//! - EIP-1193 and Phantom-style account requests over wasm-bindgen futures
//! - JS bindings via wasm-bindgen
//!
//! Architecture:
//! ```text
//! ┌─────────────────────────────────────────┐
//! │          WalletBridge (JS API)          │
//! │  connect(tag), callbacks to the page    │
//! └─────────────────┬───────────────────────┘
//!                   │
//! ┌─────────────────▼───────────────────────┐
//! │         Orchestrator (shared core)      │
//! │  detect → attempt / deep-link fallback  │
//! └─────────────────┬───────────────────────┘
//!                   │
//! ┌─────────────────▼───────────────────────┐
//! │       InjectedRegistry / JsProvider     │
//! │  window.ethereum, window.phantom, ...   │
//! └─────────────────────────────────────────┘
//! ```

mod bridge;
mod injected;

pub use bridge::WalletBridge;
pub use injected::{InjectedRegistry, JsProvider};

use wasm_bindgen::prelude::*;

/// Initialize WASM module (called automatically on load)
#[wasm_bindgen(start)]
pub fn init() {
    console_error_panic_hook::set_once();
}

/// Log to browser console
pub fn console_log(s: &str) {
    web_sys::console::log_1(&JsValue::from_str(s));
}

macro_rules! log {
    ($($t:tt)*) => {
        crate::wasm::console_log(&format!($($t)*))
    }
}

pub(crate) use log;
