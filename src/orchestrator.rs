//! Connection orchestrator: the public entry point.
//!
//! Given a wallet identifier, consults the provider registry, then either
//! runs a `ConnectionAttempt`, synthesizes a deep-link fallback, or (for
//! redirect-only wallets) opens the vendor site externally. Exactly one
//! terminal `ConnectionOutcome` is produced per call.

use crate::attempt::ConnectionAttempt;
use crate::deeplink::{qr_image_url, DeepLinkBuilder};
use crate::outcome::ConnectionOutcome;
use crate::provider::ProviderRegistry;
use crate::ui::{short_address, UiSink, UiState};
use crate::wallet::WalletId;
use async_trait::async_trait;
use std::cell::Cell;
use tracing::{debug, info};

/// Delay before the redirect-only branch opens the vendor site, so the
/// connecting indicator is visible at all.
pub const REDIRECT_DELAY_MS: u64 = 800;

/// Timer collaborator. The browser implementation suspends on `setTimeout`;
/// tests resolve immediately.
#[async_trait(?Send)]
pub trait Scheduler {
    async fn sleep_ms(&self, ms: u64);
}

/// Scheduler that never waits. Used in tests and non-browser hosts.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoDelay;

#[async_trait(?Send)]
impl Scheduler for NoDelay {
    async fn sleep_ms(&self, _ms: u64) {}
}

/// Drives wallet selection events to terminal outcomes.
///
/// Single-threaded and cooperative: `connect` takes `&self`, so attempts
/// may interleave on one event loop. Each attempt is tagged with a
/// monotonically increasing sequence number; an outcome only reaches the
/// UI if no newer attempt has started since ("latest attempt wins").
pub struct Orchestrator<R, U, S> {
    registry: R,
    ui: U,
    scheduler: S,
    links: DeepLinkBuilder,
    seq: Cell<u64>,
}

impl<R, U, S> Orchestrator<R, U, S>
where
    R: ProviderRegistry,
    U: UiSink,
    S: Scheduler,
{
    pub fn new(registry: R, ui: U, scheduler: S, links: DeepLinkBuilder) -> Self {
        Self {
            registry,
            ui,
            scheduler,
            links,
            seq: Cell::new(0),
        }
    }

    /// Convenience entry point for UI rows tagged with identifier strings.
    pub async fn connect_tag(&self, tag: &str) -> ConnectionOutcome {
        self.connect(WalletId::from_tag(tag)).await
    }

    /// Run one connection attempt for `wallet` and deliver its terminal
    /// outcome. The returned value is always the attempt's own outcome;
    /// UI side effects are skipped when a newer attempt has since started.
    pub async fn connect(&self, wallet: WalletId) -> ConnectionOutcome {
        let seq = self.next_seq();
        debug!(wallet = %wallet, seq, "connect requested");

        if wallet.is_redirect_only() {
            return self.redirect(wallet, seq).await;
        }

        let outcome = match self.registry.detect(&wallet) {
            Some(provider) => {
                let attempt = ConnectionAttempt::new(wallet.clone(), seq);
                let outcome = attempt.run(provider.as_ref(), &self.ui).await;
                if self.is_latest(seq) {
                    self.apply(&outcome);
                } else {
                    debug!(wallet = %wallet, seq, "stale outcome discarded");
                }
                outcome
            }
            None => self.fallback(&wallet),
        };

        info!(wallet = %wallet, seq, outcome = ?outcome, "attempt resolved");
        outcome
    }

    /// Degenerate branch for wallets with no programmatic API: show the
    /// connecting indicator briefly, open the vendor site in a new browsing
    /// context, return to idle. Not a true connection.
    async fn redirect(&self, wallet: WalletId, seq: u64) -> ConnectionOutcome {
        self.ui.render(UiState::Connecting {
            message: wallet.connecting_message(),
        });
        self.scheduler.sleep_ms(REDIRECT_DELAY_MS).await;
        if self.is_latest(seq) {
            if let Some(url) = wallet.redirect_url() {
                self.ui.open_external(url);
            }
            self.ui.render(UiState::Idle);
        }
        info!(wallet = %wallet, seq, "redirected to vendor site");
        ConnectionOutcome::Cancelled
    }

    /// No provider present: hand the deep-link artifact to the UI. The user
    /// must scan, copy, or cancel; there is no timeout and no retry here.
    fn fallback(&self, wallet: &WalletId) -> ConnectionOutcome {
        let link = self.links.build(wallet);
        self.ui.render(UiState::Fallback {
            uri: link.uri.clone(),
            title: link.label.clone(),
            subtitle: link.sublabel,
            qr_url: qr_image_url(&link.uri),
        });
        ConnectionOutcome::Fallback {
            uri: link.uri,
            label: link.label,
        }
    }

    /// Apply a terminal outcome to the UI. Failures reset to idle before
    /// surfacing the message; cancellation resets silently.
    fn apply(&self, outcome: &ConnectionOutcome) {
        match outcome {
            ConnectionOutcome::Connected { address } => {
                self.ui.render(UiState::Connected {
                    short_address: short_address(address),
                });
            }
            ConnectionOutcome::Cancelled => {
                self.ui.render(UiState::Idle);
            }
            ConnectionOutcome::Failed { message } => {
                self.ui.render(UiState::Idle);
                self.ui.alert(message);
            }
            // Fallback never comes out of an attempt run.
            ConnectionOutcome::Fallback { .. } => {}
        }
    }

    fn next_seq(&self) -> u64 {
        let next = self.seq.get() + 1;
        self.seq.set(next);
        next
    }

    fn is_latest(&self, seq: u64) -> bool {
        self.seq.get() == seq
    }
}
