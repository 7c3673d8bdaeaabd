//! One connection attempt, driven as a small state machine.
//!
//! States: `Idle → Requesting → {Connected, Cancelled, Failed}`. Terminal
//! states absorb; `run` consumes the attempt, so at most one outcome can
//! ever be produced from it.

use crate::outcome::{ConnectError, ConnectionOutcome, ProviderError};
use crate::provider::WalletProvider;
use crate::ui::{UiSink, UiState};
use crate::wallet::WalletId;
use tracing::{debug, warn};

/// State of a connection attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AttemptState {
    Idle,
    Requesting,
    Connected,
    Cancelled,
    Failed,
}

impl AttemptState {
    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            AttemptState::Connected | AttemptState::Cancelled | AttemptState::Failed
        )
    }
}

/// A single connection try for one wallet, created when the user selects a
/// wallet row and destroyed once its terminal outcome is delivered.
#[derive(Debug)]
pub struct ConnectionAttempt {
    wallet: WalletId,
    seq: u64,
    state: AttemptState,
}

impl ConnectionAttempt {
    pub fn new(wallet: WalletId, seq: u64) -> Self {
        Self {
            wallet,
            seq,
            state: AttemptState::Idle,
        }
    }

    pub fn wallet(&self) -> &WalletId {
        &self.wallet
    }

    /// Monotonic sequence number used for stale-outcome discard.
    pub fn seq(&self) -> u64 {
        self.seq
    }

    pub fn state(&self) -> AttemptState {
        self.state
    }

    /// Drive the attempt to a terminal outcome.
    ///
    /// Entering `Requesting` shows the connecting indicator with the
    /// wallet-specific message; the provider call then resolves into exactly
    /// one of the three terminal states.
    pub async fn run<U: UiSink + ?Sized>(
        mut self,
        provider: &dyn WalletProvider,
        ui: &U,
    ) -> ConnectionOutcome {
        self.state = AttemptState::Requesting;
        ui.render(UiState::Connecting {
            message: self.wallet.connecting_message(),
        });
        debug!(wallet = %self.wallet, seq = self.seq, "requesting accounts");

        if !provider.is_of_kind(&self.wallet) {
            // Detection already matched the vendor marker; a mismatch here
            // means the registry handed over the wrong handle.
            warn!(wallet = %self.wallet, seq = self.seq, "provider vendor marker mismatch");
        }

        if !provider.supports_request_accounts() {
            self.state = AttemptState::Failed;
            return ConnectError::Provider(ProviderError::new(
                None,
                format!("{} provider does not support account requests", self.wallet),
            ))
            .into();
        }

        match classify(provider.request_accounts().await) {
            Ok(address) => {
                self.state = AttemptState::Connected;
                debug!(wallet = %self.wallet, seq = self.seq, "connected");
                ConnectionOutcome::Connected { address }
            }
            Err(ConnectError::UserCancelled) => {
                self.state = AttemptState::Cancelled;
                debug!(wallet = %self.wallet, seq = self.seq, "cancelled by user");
                ConnectionOutcome::Cancelled
            }
            Err(err) => {
                self.state = AttemptState::Failed;
                debug!(wallet = %self.wallet, seq = self.seq, error = %err, "attempt failed");
                err.into()
            }
        }
    }
}

/// Classify the provider call's result: the normalized address on success,
/// or the attempt-scoped error.
///
/// - non-empty account list → first entry is the address
/// - rejection with the user-rejection code → `UserCancelled`
/// - any other rejection → `Provider`
/// - empty account list → `NoAccounts` (treated as a provider error)
pub fn classify(result: Result<Vec<String>, ProviderError>) -> Result<String, ConnectError> {
    match result {
        Ok(accounts) => accounts
            .into_iter()
            .next()
            .ok_or(ConnectError::NoAccounts),
        Err(err) if err.is_user_rejection() => Err(ConnectError::UserCancelled),
        Err(err) => Err(ConnectError::Provider(err)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_account_becomes_the_address() {
        let address = classify(Ok(vec!["0xabc".into(), "0xdef".into()])).unwrap();
        assert_eq!(address, "0xabc");
    }

    #[test]
    fn empty_account_list_is_a_failure() {
        assert_eq!(classify(Ok(vec![])), Err(ConnectError::NoAccounts));
    }

    #[test]
    fn rejection_code_4001_is_cancellation() {
        let result = classify(Err(ProviderError::rejected_by_user()));
        assert_eq!(result, Err(ConnectError::UserCancelled));
    }

    #[test]
    fn other_rejections_are_provider_errors() {
        let err = ProviderError::new(Some(-32002), "Already processing");
        let result = classify(Err(err.clone()));
        assert_eq!(result, Err(ConnectError::Provider(err)));
    }

    #[test]
    fn terminal_states() {
        assert!(!AttemptState::Idle.is_terminal());
        assert!(!AttemptState::Requesting.is_terminal());
        assert!(AttemptState::Connected.is_terminal());
        assert!(AttemptState::Cancelled.is_terminal());
        assert!(AttemptState::Failed.is_terminal());
    }
}
