//! WalletBridge: the orchestrator exposed to JavaScript.
//!
//! The page constructs one bridge with a callbacks object and wires each
//! wallet row's click handler to `connect(tag)`:
//!
//! ```javascript
//! import { WalletBridge } from 'walletbridge';
//!
//! const bridge = new WalletBridge({
//!     onState: (state) => renderPanel(state),
//!     onAlert: (message) => alert(message),
//! });
//!
//! row.addEventListener('click', () => bridge.connect(row.dataset.wallet));
//! ```
//!
//! `onState` receives the serialized `UiState` value; the page owns all
//! rendering, including turning a fallback's `qrUrl` into an image.

use super::injected::InjectedRegistry;
use super::log;
use crate::deeplink::DeepLinkBuilder;
use crate::orchestrator::{Orchestrator, Scheduler};
use crate::ui::{UiSink, UiState};
use async_trait::async_trait;
use js_sys::{Function, Promise, Reflect};
use std::rc::Rc;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::JsFuture;
use web_sys::window;

fn js_error(message: impl ToString) -> JsValue {
    JsValue::from_str(&message.to_string())
}

fn callback(target: &JsValue, key: &str) -> Result<Function, JsValue> {
    Reflect::get(target, &JsValue::from_str(key))
        .ok()
        .and_then(|v| v.dyn_into::<Function>().ok())
        .ok_or_else(|| js_error(format!("callbacks.{key} must be a function")))
}

/// UiSink adapter over the page's callback functions.
struct CallbackUi {
    on_state: Function,
    on_alert: Function,
}

impl UiSink for CallbackUi {
    fn render(&self, state: UiState) {
        let value = serde_wasm_bindgen::to_value(&state).unwrap_or(JsValue::NULL);
        let _ = self.on_state.call1(&JsValue::NULL, &value);
    }

    fn alert(&self, message: &str) {
        let _ = self.on_alert.call1(&JsValue::NULL, &JsValue::from_str(message));
    }

    fn open_external(&self, url: &str) {
        if let Some(window) = window() {
            let _ = window.open_with_url_and_target(url, "_blank");
        }
    }
}

/// Scheduler backed by `setTimeout`.
struct WebScheduler;

#[async_trait(?Send)]
impl Scheduler for WebScheduler {
    async fn sleep_ms(&self, ms: u64) {
        let promise = Promise::new(&mut |resolve, _reject| {
            let fired = window().and_then(|w| {
                w.set_timeout_with_callback_and_timeout_and_arguments_0(&resolve, ms as i32)
                    .ok()
            });
            if fired.is_none() {
                let _ = resolve.call0(&JsValue::UNDEFINED);
            }
        });
        let _ = JsFuture::from(promise).await;
    }
}

/// Browser-native connection orchestrator with JS bindings.
#[wasm_bindgen]
pub struct WalletBridge {
    inner: Rc<Orchestrator<InjectedRegistry, CallbackUi, WebScheduler>>,
}

#[wasm_bindgen]
impl WalletBridge {
    /// Create a bridge wired to the page's callbacks (`onState`, `onAlert`).
    /// Deep links point back at the page's own URL.
    #[wasm_bindgen(constructor)]
    pub fn new(callbacks: JsValue) -> Result<WalletBridge, JsValue> {
        let ui = CallbackUi {
            on_state: callback(&callbacks, "onState")?,
            on_alert: callback(&callbacks, "onAlert")?,
        };

        let page_url = window()
            .ok_or_else(|| js_error("no window object"))?
            .location()
            .href()
            .map_err(|e| js_error(format!("{e:?}")))?;

        log!("[WalletBridge] Created for {}", page_url);
        Ok(Self {
            inner: Rc::new(Orchestrator::new(
                InjectedRegistry::new(),
                ui,
                WebScheduler,
                DeepLinkBuilder::new(page_url),
            )),
        })
    }

    /// Run one connection attempt for the wallet row tag and resolve with
    /// the serialized terminal outcome.
    #[wasm_bindgen]
    pub async fn connect(&self, wallet: &str) -> Result<JsValue, JsValue> {
        log!("[WalletBridge] connect: {}", wallet);
        let outcome = self.inner.connect_tag(wallet).await;
        serde_wasm_bindgen::to_value(&outcome).map_err(|e| js_error(e))
    }
}
