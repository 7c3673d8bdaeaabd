//! The presentation collaborator seam.
//!
//! The orchestrator never touches the DOM; it hands explicit `UiState`
//! values to a `UiSink` and the collaborator owns all rendering. These are
//! the only side-effecting calls the core makes outward.

use serde::{Deserialize, Serialize};

/// Explicit UI state value, rendered by the collaborator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "view", rename_all = "camelCase")]
pub enum UiState {
    /// Nothing pending; wallet list is selectable.
    Idle,
    /// A connection request is in flight.
    Connecting { message: String },
    /// No provider present: show the scannable code and copy affordance.
    #[serde(rename_all = "camelCase")]
    Fallback {
        /// The deep-link URI, exposed verbatim via the copy affordance.
        uri: String,
        title: String,
        subtitle: String,
        /// Image-endpoint URL the QR collaborator can render directly.
        qr_url: String,
    },
    /// Connected; `short_address` is the truncated badge text.
    #[serde(rename_all = "camelCase")]
    Connected { short_address: String },
}

/// Outbound presentation interface.
pub trait UiSink {
    fn render(&self, state: UiState);

    /// Surface a non-fatal failure message. Exactly one call per failed
    /// attempt; never called for user cancellation.
    fn alert(&self, message: &str);

    /// Open a URL in a new browsing context (redirect-only wallets).
    fn open_external(&self, url: &str);
}

/// Truncate an address for the connected badge: first 6 + last 4 characters
/// joined by an ellipsis. Short addresses pass through unchanged.
pub fn short_address(address: &str) -> String {
    if address.chars().count() <= 10 {
        return address.to_string();
    }
    let head: String = address.chars().take(6).collect();
    let tail: String = address
        .chars()
        .rev()
        .take(4)
        .collect::<Vec<_>>()
        .into_iter()
        .rev()
        .collect();
    format!("{head}...{tail}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn short_address_truncates() {
        assert_eq!(
            short_address("0xABCunusedunusedunusedunused"),
            "0xABCu...used"
        );
        assert_eq!(
            short_address("0x1234567890abcdef1234567890abcdef12345678"),
            "0x1234...5678"
        );
    }

    #[test]
    fn short_address_keeps_short_inputs() {
        assert_eq!(short_address("0x1234"), "0x1234");
        assert_eq!(short_address(""), "");
    }

    #[test]
    fn states_serialize_with_a_view_tag_and_camel_case_fields() {
        let connected = UiState::Connected {
            short_address: "0x1234...5678".to_string(),
        };
        assert_eq!(
            serde_json::to_value(&connected).unwrap(),
            serde_json::json!({ "view": "connected", "shortAddress": "0x1234...5678" })
        );

        let fallback = UiState::Fallback {
            uri: "wc:topic@2?relay-protocol=irn".to_string(),
            title: "Connect WalletConnect".to_string(),
            subtitle: "Scan with your wallet app".to_string(),
            qr_url: "https://api.qrserver.com/v1/create-qr-code/?size=220x220".to_string(),
        };
        assert_eq!(
            serde_json::to_value(&fallback).unwrap(),
            serde_json::json!({
                "view": "fallback",
                "uri": "wc:topic@2?relay-protocol=irn",
                "title": "Connect WalletConnect",
                "subtitle": "Scan with your wallet app",
                "qrUrl": "https://api.qrserver.com/v1/create-qr-code/?size=220x220",
            })
        );
    }
}
