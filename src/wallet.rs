//! Wallet identifiers and per-vendor connection metadata.
//!
//! Each supported wallet is an enum tag carrying everything the orchestrator
//! needs to drive it: the spinner message, the universal-link domain (when the
//! vendor supports one), and whether the wallet is redirect-only.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Identifier for a supported wallet, as selected in the UI.
///
/// `Other` is the open fallback for identifier strings this crate does not
/// know about; those always take the deep-link path.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum WalletId {
    MetaMask,
    Phantom,
    Coinbase,
    SafePal,
    Binance,
    /// Any injected `window.ethereum` provider, vendor unknown.
    BrowserInjected,
    WalletConnect,
    Other(String),
}

impl WalletId {
    /// Parse the identifier string a wallet row is tagged with.
    pub fn from_tag(tag: &str) -> Self {
        match tag {
            "MetaMask" => WalletId::MetaMask,
            "Phantom" => WalletId::Phantom,
            "CoinbaseWallet" => WalletId::Coinbase,
            "SafePal" => WalletId::SafePal,
            "Binance" => WalletId::Binance,
            "BrowserWallet" => WalletId::BrowserInjected,
            "WalletConnect" => WalletId::WalletConnect,
            other => WalletId::Other(other.to_string()),
        }
    }

    /// The identifier string used in UI row tags.
    pub fn as_tag(&self) -> &str {
        match self {
            WalletId::MetaMask => "MetaMask",
            WalletId::Phantom => "Phantom",
            WalletId::Coinbase => "CoinbaseWallet",
            WalletId::SafePal => "SafePal",
            WalletId::Binance => "Binance",
            WalletId::BrowserInjected => "BrowserWallet",
            WalletId::WalletConnect => "WalletConnect",
            WalletId::Other(tag) => tag,
        }
    }

    /// Human-readable vendor name.
    pub fn display_name(&self) -> &str {
        match self {
            WalletId::MetaMask => "MetaMask",
            WalletId::Phantom => "Phantom",
            WalletId::Coinbase => "Coinbase Wallet",
            WalletId::SafePal => "SafePal",
            WalletId::Binance => "Binance Wallet",
            WalletId::BrowserInjected => "Browser Wallet",
            WalletId::WalletConnect => "WalletConnect",
            WalletId::Other(tag) => tag,
        }
    }

    /// Message shown on the connecting indicator while a request is pending.
    pub fn connecting_message(&self) -> String {
        match self {
            WalletId::BrowserInjected => "Connecting...".to_string(),
            WalletId::Other(_) => "Requesting connection...".to_string(),
            other => format!("Opening {}...", other.display_name()),
        }
    }

    /// Wallets with no programmatic API: the orchestrator opens the vendor
    /// site externally instead of attempting a connection.
    pub fn is_redirect_only(&self) -> bool {
        matches!(self, WalletId::Binance)
    }

    /// Domain for universal-link deep links, when the vendor supports them.
    pub fn universal_link_domain(&self) -> Option<&'static str> {
        match self {
            WalletId::MetaMask => Some("metamask.app.link"),
            _ => None,
        }
    }

    /// Vendor site opened by the redirect-only branch.
    pub fn redirect_url(&self) -> Option<&'static str> {
        match self {
            WalletId::Binance => Some("https://www.bnbchain.org/en/binance-wallet"),
            _ => None,
        }
    }
}

impl fmt::Display for WalletId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tag_round_trip() {
        for tag in [
            "MetaMask",
            "Phantom",
            "CoinbaseWallet",
            "SafePal",
            "Binance",
            "BrowserWallet",
            "WalletConnect",
        ] {
            assert_eq!(WalletId::from_tag(tag).as_tag(), tag);
        }
    }

    #[test]
    fn unknown_tag_falls_through_to_other() {
        let id = WalletId::from_tag("Rainbow");
        assert_eq!(id, WalletId::Other("Rainbow".to_string()));
        assert_eq!(id.as_tag(), "Rainbow");
        assert!(id.universal_link_domain().is_none());
    }

    #[test]
    fn connecting_messages() {
        assert_eq!(WalletId::MetaMask.connecting_message(), "Opening MetaMask...");
        assert_eq!(WalletId::BrowserInjected.connecting_message(), "Connecting...");
        assert_eq!(
            WalletId::Other("Rainbow".into()).connecting_message(),
            "Requesting connection..."
        );
    }

    #[test]
    fn binance_is_redirect_only() {
        assert!(WalletId::Binance.is_redirect_only());
        assert!(WalletId::Binance.redirect_url().is_some());
        assert!(!WalletId::MetaMask.is_redirect_only());
    }
}
