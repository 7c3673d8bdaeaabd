//! Walletbridge: one "connect wallet" flow across heterogeneous providers.
//!
//! # Architecture
//!
//! ```text
//! Orchestrator (entry point)
//!   │
//!   ├── ProviderRegistry ── detect(WalletId) → Option<provider handle>
//!   │     └── wasm: InjectedRegistry (window.ethereum, window.phantom, ...)
//!   │
//!   ├── ConnectionAttempt ── Idle → Requesting → {Connected, Cancelled, Failed}
//!   │
//!   ├── DeepLinkBuilder ── fallback artifact when no provider is present
//!   │     └── universal link (MetaMask) or wc: pairing URI
//!   │
//!   └── UiSink (collaborator) ── render(UiState), alert, open_external
//! ```
//!
//! # Outcomes
//!
//! | Outcome | Meaning |
//! |---------|---------|
//! | `Connected { address }` | provider resolved accounts; first entry normalized |
//! | `Fallback { uri, label }` | no provider; scannable/copyable deep link |
//! | `Cancelled` | user dismissed the prompt (silent) or redirect-only branch |
//! | `Failed { message }` | provider error or empty account list; one alert |
//!
//! Concurrency is single-threaded and cooperative: attempts carry monotonic
//! sequence numbers and only the latest attempt's outcome reaches the UI.
//!
//! # Features
//!
//! - `native` - tracing subscriber for integration tests and non-browser hosts
//! - `wasm` - browser platform (injected provider probing, wasm-bindgen API)
//!
//! # Usage
//!
//! ```ignore
//! use walletbridge::{DeepLinkBuilder, NoDelay, Orchestrator, WalletId};
//!
//! let orchestrator = Orchestrator::new(
//!     registry,                 // impl ProviderRegistry
//!     ui,                       // impl UiSink
//!     NoDelay,
//!     DeepLinkBuilder::new("https://stake.example.org/"),
//! );
//!
//! let outcome = orchestrator.connect(WalletId::MetaMask).await;
//! ```

// =============================================================================
// Shared modules (compile everywhere)
// =============================================================================
pub mod attempt;
pub mod deeplink;
pub mod orchestrator;
pub mod outcome;
pub mod provider;
pub mod ui;
pub mod wallet;

// =============================================================================
// Native-only modules (tracing subscriber)
// =============================================================================
#[cfg(feature = "native")]
pub mod logging;

// =============================================================================
// WASM-only modules (browser, wasm-bindgen)
// =============================================================================
#[cfg(feature = "wasm")]
pub mod wasm;

// =============================================================================
// Re-exports: Shared
// =============================================================================
pub use attempt::{AttemptState, ConnectionAttempt};
pub use deeplink::{qr_image_url, DeepLink, DeepLinkBuilder, PairingSource, PlaceholderPairing};
pub use orchestrator::{NoDelay, Orchestrator, Scheduler, REDIRECT_DELAY_MS};
pub use outcome::{
    ConnectError, ConnectionOutcome, ProviderError, GENERIC_ERROR_MESSAGE, USER_REJECTED_CODE,
};
pub use provider::{ProviderRegistry, WalletProvider};
pub use ui::{short_address, UiSink, UiState};
pub use wallet::WalletId;

// =============================================================================
// Re-exports: Native
// =============================================================================
#[cfg(feature = "native")]
pub use logging::init_logging;

// =============================================================================
// Re-exports: WASM
// =============================================================================
#[cfg(feature = "wasm")]
pub use wasm::{InjectedRegistry, JsProvider, WalletBridge};
