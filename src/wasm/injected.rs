//! Injected-provider detection and invocation.
//!
//! Wallet extensions register themselves as globals on `window`
//! (`window.ethereum`, `window.phantom.solana`, ...), each carrying a
//! vendor marker flag. Detection probes those globals via js-sys reflection
//! without mutating anything; invocation wraps the provider's promise-based
//! request API behind the shared `WalletProvider` trait.

use crate::outcome::ProviderError;
use crate::provider::{ProviderRegistry, WalletProvider};
use crate::wallet::WalletId;
use async_trait::async_trait;
use js_sys::{Array, Function, Object, Promise, Reflect};
use std::rc::Rc;
use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_futures::JsFuture;
use web_sys::window;

/// How the provider's account request is issued.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum RequestFlavor {
    /// `provider.request({ method: "eth_requestAccounts" })` → string array.
    Eip1193,
    /// `provider.connect()` → object with a `publicKey` whose string form
    /// is the address (Phantom-style).
    Connect,
}

/// Read a property, treating absent/undefined/null as missing.
fn get(target: &JsValue, key: &str) -> Option<JsValue> {
    let value = Reflect::get(target, &JsValue::from_str(key)).ok()?;
    if value.is_undefined() || value.is_null() {
        None
    } else {
        Some(value)
    }
}

/// Vendor marker check: a boolean property equal to `true`.
fn flag(target: &JsValue, key: &str) -> bool {
    get(target, key).and_then(|v| v.as_bool()).unwrap_or(false)
}

fn method(target: &JsValue, key: &str) -> Option<Function> {
    get(target, key)?.dyn_into::<Function>().ok()
}

/// Translate a JS rejection value into a typed provider error, keeping the
/// EIP-1193 `code` so user cancellation stays distinguishable.
fn provider_error(err: JsValue) -> ProviderError {
    let code = get(&err, "code").and_then(|v| v.as_f64()).map(|c| c as i64);
    let message = get(&err, "message")
        .and_then(|v| v.as_string())
        .unwrap_or_default();
    ProviderError::new(code, message)
}

/// Handle to one injected provider object.
pub struct JsProvider {
    object: JsValue,
    kind: WalletId,
    flavor: RequestFlavor,
}

impl JsProvider {
    fn eip1193(object: JsValue, kind: WalletId) -> Self {
        Self {
            object,
            kind,
            flavor: RequestFlavor::Eip1193,
        }
    }

    fn connect_style(object: JsValue, kind: WalletId) -> Self {
        Self {
            object,
            kind,
            flavor: RequestFlavor::Connect,
        }
    }

    async fn await_call(&self, function: &Function, args: &[JsValue]) -> Result<JsValue, ProviderError> {
        let result = function
            .apply(&self.object, &Array::from_iter(args.iter()))
            .map_err(provider_error)?;
        match result.dyn_into::<Promise>() {
            Ok(promise) => JsFuture::from(promise).await.map_err(provider_error),
            Err(value) => Ok(value),
        }
    }

    async fn request_eip1193(&self) -> Result<Vec<String>, ProviderError> {
        let request = method(&self.object, "request").ok_or_else(|| {
            ProviderError::new(None, "provider has no request method")
        })?;

        let params = Object::new();
        Reflect::set(
            &params,
            &JsValue::from_str("method"),
            &JsValue::from_str("eth_requestAccounts"),
        )
        .map_err(provider_error)?;

        let resolved = self.await_call(&request, &[params.into()]).await?;
        let accounts = resolved
            .dyn_into::<Array>()
            .map_err(|_| ProviderError::new(None, "invalid accounts response"))?;
        Ok(accounts.iter().filter_map(|v| v.as_string()).collect())
    }

    async fn request_connect(&self) -> Result<Vec<String>, ProviderError> {
        let connect = method(&self.object, "connect")
            .ok_or_else(|| ProviderError::new(None, "provider has no connect method"))?;

        let resolved = self.await_call(&connect, &[]).await?;
        let public_key = get(&resolved, "publicKey")
            .ok_or_else(|| ProviderError::new(None, "connect response has no publicKey"))?;
        // publicKey is a key object; its toString() is the address.
        let address = match public_key.as_string() {
            Some(s) => s,
            None => {
                let obj: Object = public_key
                    .dyn_into()
                    .map_err(|_| ProviderError::new(None, "invalid publicKey in response"))?;
                String::from(obj.to_string())
            }
        };
        Ok(vec![address])
    }
}

#[async_trait(?Send)]
impl WalletProvider for JsProvider {
    fn supports_request_accounts(&self) -> bool {
        match self.flavor {
            RequestFlavor::Eip1193 => method(&self.object, "request").is_some(),
            RequestFlavor::Connect => method(&self.object, "connect").is_some(),
        }
    }

    fn is_of_kind(&self, wallet: &WalletId) -> bool {
        if self.kind == *wallet {
            return true;
        }
        match wallet {
            WalletId::MetaMask => flag(&self.object, "isMetaMask"),
            WalletId::Phantom => flag(&self.object, "isPhantom"),
            WalletId::Coinbase => flag(&self.object, "isCoinbaseWallet"),
            WalletId::SafePal => flag(&self.object, "isSafePal"),
            _ => false,
        }
    }

    async fn request_accounts(&self) -> Result<Vec<String>, ProviderError> {
        match self.flavor {
            RequestFlavor::Eip1193 => self.request_eip1193().await,
            RequestFlavor::Connect => self.request_connect().await,
        }
    }
}

/// Registry over the browser's injected globals.
#[derive(Debug, Clone, Copy, Default)]
pub struct InjectedRegistry;

impl InjectedRegistry {
    pub fn new() -> Self {
        Self
    }

    fn window_value() -> Option<JsValue> {
        window().map(JsValue::from)
    }

    fn ethereum() -> Option<JsValue> {
        get(&Self::window_value()?, "ethereum")
    }

    /// Single well-known global carrying a vendor marker, with a scan of
    /// the shared `ethereum.providers` list when multiple extensions have
    /// registered under one global.
    fn marked_ethereum(marker: &str) -> Option<JsValue> {
        let ethereum = Self::ethereum()?;
        if flag(&ethereum, marker) {
            return Some(ethereum);
        }
        let providers = get(&ethereum, "providers")?.dyn_into::<Array>().ok()?;
        providers.iter().find(|p| flag(p, marker))
    }

    fn detect_metamask() -> Option<JsValue> {
        Self::marked_ethereum("isMetaMask")
    }

    fn detect_coinbase() -> Option<JsValue> {
        Self::marked_ethereum("isCoinbaseWallet")
            .or_else(|| get(&Self::window_value()?, "coinbaseWalletExtension"))
    }

    fn detect_safepal() -> Option<JsValue> {
        get(&Self::window_value()?, "safepal").or_else(|| Self::marked_ethereum("isSafePal"))
    }

    /// Namespaced non-EVM global: `window.phantom.solana` with `isPhantom`.
    fn detect_phantom() -> Option<JsValue> {
        let phantom = get(&Self::window_value()?, "phantom")?;
        let solana = get(&phantom, "solana")?;
        flag(&solana, "isPhantom").then_some(solana)
    }
}

impl ProviderRegistry for InjectedRegistry {
    fn detect(&self, wallet: &WalletId) -> Option<Rc<dyn WalletProvider>> {
        let provider: JsProvider = match wallet {
            WalletId::MetaMask => {
                JsProvider::eip1193(Self::detect_metamask()?, WalletId::MetaMask)
            }
            WalletId::Coinbase => {
                JsProvider::eip1193(Self::detect_coinbase()?, WalletId::Coinbase)
            }
            WalletId::SafePal => JsProvider::eip1193(Self::detect_safepal()?, WalletId::SafePal),
            WalletId::Phantom => {
                JsProvider::connect_style(Self::detect_phantom()?, WalletId::Phantom)
            }
            WalletId::BrowserInjected => {
                JsProvider::eip1193(Self::ethereum()?, WalletId::BrowserInjected)
            }
            // No injected form: WalletConnect and unknown wallets take the
            // deep-link path, Binance is redirect-only.
            WalletId::WalletConnect | WalletId::Binance | WalletId::Other(_) => return None,
        };
        Some(Rc::new(provider))
    }
}
