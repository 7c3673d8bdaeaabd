//! Connection outcomes and the error taxonomy.

use crate::wallet::WalletId;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// EIP-1193 user-rejection code. Providers signal "the user closed the
/// prompt" with this code; it is expected interaction, not an error.
pub const USER_REJECTED_CODE: i64 = 4001;

/// Fallback message when a provider rejects without one.
pub const GENERIC_ERROR_MESSAGE: &str = "Unknown error";

/// Rejection raised by a provider's account-request call.
///
/// Carries the provider-defined numeric code (when present) so user
/// cancellation can be told apart from real failures.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProviderError {
    pub code: Option<i64>,
    pub message: String,
}

impl std::fmt::Display for ProviderError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.display_message())
    }
}

impl std::error::Error for ProviderError {}

impl ProviderError {
    pub fn new(code: Option<i64>, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }

    /// Rejection with the standard user-rejection code.
    pub fn rejected_by_user() -> Self {
        Self::new(Some(USER_REJECTED_CODE), "User rejected the request")
    }

    pub fn is_user_rejection(&self) -> bool {
        self.code == Some(USER_REJECTED_CODE)
    }

    /// The provider's message, or the generic fallback when empty.
    pub fn display_message(&self) -> &str {
        if self.message.is_empty() {
            GENERIC_ERROR_MESSAGE
        } else {
            &self.message
        }
    }
}

/// Attempt-scoped error taxonomy. Nothing here is fatal to the hosting
/// page; every variant is recoverable by explicit re-initiation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConnectError {
    /// Expected: no in-browser provider. Routes to the deep-link fallback.
    #[error("no provider detected for {0}")]
    ProviderAbsent(WalletId),

    /// Expected: the user dismissed the provider prompt. Silent reset.
    #[error("request rejected by user")]
    UserCancelled,

    /// Unexpected provider failure, surfaced to the user.
    #[error("{0}")]
    Provider(ProviderError),

    /// The provider resolved but returned an empty account list.
    #[error("No accounts returned")]
    NoAccounts,
}

/// Terminal result of one connection attempt.
///
/// Exactly one of these is produced per attempt, and an attempt never
/// transitions out of it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "camelCase")]
pub enum ConnectionOutcome {
    /// A provider resolved accounts; `address` is the normalized first entry.
    Connected { address: String },
    /// No provider present: a scannable/copyable connection artifact.
    Fallback { uri: String, label: String },
    /// The user dismissed the provider prompt. Intentionally silent.
    Cancelled,
    /// Provider failure or empty account list; non-fatal, no retry.
    Failed { message: String },
}

impl From<ConnectError> for ConnectionOutcome {
    fn from(err: ConnectError) -> Self {
        match err {
            ConnectError::UserCancelled => ConnectionOutcome::Cancelled,
            ConnectError::Provider(e) => ConnectionOutcome::Failed {
                message: e.display_message().to_string(),
            },
            ConnectError::NoAccounts => ConnectionOutcome::Failed {
                message: ConnectError::NoAccounts.to_string(),
            },
            // Absence is handled by the orchestrator's fallback branch; if it
            // reaches here the caller still gets a non-fatal failure.
            ConnectError::ProviderAbsent(id) => ConnectionOutcome::Failed {
                message: format!("no provider detected for {id}"),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn user_rejection_is_code_4001() {
        assert!(ProviderError::rejected_by_user().is_user_rejection());
        assert!(!ProviderError::new(Some(4100), "unauthorized").is_user_rejection());
        assert!(!ProviderError::new(None, "boom").is_user_rejection());
    }

    #[test]
    fn empty_message_falls_back_to_generic() {
        let err = ProviderError::new(Some(-32603), "");
        assert_eq!(err.display_message(), GENERIC_ERROR_MESSAGE);
        assert_eq!(err.to_string(), GENERIC_ERROR_MESSAGE);
    }

    #[test]
    fn outcomes_serialize_with_a_status_tag() {
        let connected = ConnectionOutcome::Connected {
            address: "0xabc".to_string(),
        };
        assert_eq!(
            serde_json::to_value(&connected).unwrap(),
            serde_json::json!({ "status": "connected", "address": "0xabc" })
        );
        assert_eq!(
            serde_json::to_value(ConnectionOutcome::Cancelled).unwrap(),
            serde_json::json!({ "status": "cancelled" })
        );
    }

    #[test]
    fn cancellation_maps_to_silent_outcome() {
        let outcome: ConnectionOutcome = ConnectError::UserCancelled.into();
        assert_eq!(outcome, ConnectionOutcome::Cancelled);
    }

    #[test]
    fn provider_error_keeps_its_message() {
        let outcome: ConnectionOutcome =
            ConnectError::Provider(ProviderError::new(Some(-32002), "Already processing")).into();
        assert_eq!(
            outcome,
            ConnectionOutcome::Failed {
                message: "Already processing".to_string()
            }
        );
    }
}
