//! Provider handle and registry traits.
//!
//! A `WalletProvider` is an opaque, capability-tagged handle to a
//! browser-exposed provider object. The orchestrator only borrows it for the
//! duration of one attempt and never mutates it; the handle lives as long as
//! the page session.

use crate::outcome::ProviderError;
use crate::wallet::WalletId;
use async_trait::async_trait;
use std::rc::Rc;

/// Capability-tagged handle to an in-browser wallet provider.
#[async_trait(?Send)]
pub trait WalletProvider {
    /// Whether the handle exposes an account-request method at all.
    fn supports_request_accounts(&self) -> bool {
        true
    }

    /// Vendor check: does this handle carry the marker for `wallet`?
    fn is_of_kind(&self, wallet: &WalletId) -> bool;

    /// Issue the provider-specific account request
    /// (`eth_requestAccounts` or the chain-equivalent) and await its result.
    ///
    /// For providers that resolve a public-key-like object instead of a
    /// string list, implementations return the key's string form as the
    /// single account entry.
    async fn request_accounts(&self) -> Result<Vec<String>, ProviderError>;
}

/// Detection of available in-browser providers.
///
/// Detection is pure and synchronous: it probes for presence and vendor
/// markers without mutating global state. Absence is an expected outcome
/// (`None`), never an error.
pub trait ProviderRegistry {
    fn detect(&self, wallet: &WalletId) -> Option<Rc<dyn WalletProvider>>;
}
