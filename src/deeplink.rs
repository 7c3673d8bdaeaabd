//! Deep-link synthesis for the no-provider fallback path.
//!
//! When no in-browser provider is detected, the orchestrator hands the UI a
//! connection URI to render as a scannable code and expose via a copy
//! affordance. MetaMask gets a universal link back to the page; everything
//! else gets a WalletConnect pairing URI.

use crate::wallet::WalletId;

/// WalletConnect protocol version used in assembled `wc:` URIs.
const WC_VERSION: u32 = 2;
/// Relay protocol tag for the WalletConnect URI query.
const WC_RELAY_PROTOCOL: &str = "irn";

const QR_ENDPOINT: &str = "https://api.qrserver.com/v1/create-qr-code/";
const QR_SIZE: &str = "220x220";

/// Fallback connection artifact: the URI plus the panel copy around it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeepLink {
    pub uri: String,
    pub label: String,
    pub sublabel: String,
}

/// Source of WalletConnect pairing topics.
///
/// A production session layer obtains the topic from a real pairing
/// handshake with a relay; this crate only assembles the final URI string
/// given a topic.
pub trait PairingSource {
    fn pairing_topic(&self) -> String;
}

/// Stub pairing source with a fixed placeholder topic.
///
/// The resulting `wc:` URI is well-formed but not a live pairing session;
/// wallets scanning it will not complete a handshake. Swap in a real
/// `PairingSource` to wire an actual session layer.
#[derive(Debug, Clone, Default)]
pub struct PlaceholderPairing;

impl PairingSource for PlaceholderPairing {
    fn pairing_topic(&self) -> String {
        "walletbridge-placeholder-topic".to_string()
    }
}

/// Builds fallback deep links for one page.
pub struct DeepLinkBuilder {
    page_url: String,
    pairing: Box<dyn PairingSource>,
}

impl DeepLinkBuilder {
    pub fn new(page_url: impl Into<String>) -> Self {
        Self {
            page_url: page_url.into(),
            pairing: Box::new(PlaceholderPairing),
        }
    }

    pub fn with_pairing(mut self, pairing: Box<dyn PairingSource>) -> Self {
        self.pairing = pairing;
        self
    }

    /// Assemble the fallback artifact for `wallet`. Deterministic given the
    /// page URL and the pairing topic; no I/O.
    pub fn build(&self, wallet: &WalletId) -> DeepLink {
        match wallet.universal_link_domain() {
            Some(domain) => DeepLink {
                uri: universal_link(domain, &self.page_url),
                label: format!("Scan with {}", wallet.display_name()),
                sublabel: format!(
                    "Open {} on your phone and scan this code",
                    wallet.display_name()
                ),
            },
            None => DeepLink {
                uri: wc_uri(&self.pairing.pairing_topic()),
                label: "Scan with your wallet".to_string(),
                sublabel: "Use any WalletConnect-compatible wallet".to_string(),
            },
        }
    }
}

/// `https://<domain>/dapp/<page-url-without-scheme>`
fn universal_link(domain: &str, page_url: &str) -> String {
    let stripped = page_url
        .strip_prefix("https://")
        .or_else(|| page_url.strip_prefix("http://"))
        .unwrap_or(page_url);
    format!("https://{domain}/dapp/{stripped}")
}

/// `wc:<topic>@<version>?relay-protocol=<protocol>`
fn wc_uri(topic: &str) -> String {
    format!("wc:{topic}@{WC_VERSION}?relay-protocol={WC_RELAY_PROTOCOL}")
}

/// Image-endpoint URL for rendering `uri` as a scannable code.
///
/// The URI goes into the `data` parameter percent-encoded; the collaborator
/// can set this directly as an image source.
pub fn qr_image_url(uri: &str) -> String {
    format!(
        "{QR_ENDPOINT}?size={QR_SIZE}&bgcolor=ffffff&color=000000&data={}",
        urlencoding::encode(uri)
    )
}
