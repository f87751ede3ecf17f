use crate::classify::TerminalKind;
use solana_sdk::{signature::Signature, transaction::TransactionError};
use std::time::Duration;
use thiserror::Error;

pub type TxResult<T> = Result<T, TxError>;

pub type LedgerResult<T> = Result<T, LedgerError>;

/// Failures reported by the ledger boundary.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LedgerError {
    #[error("RPC error: {0}")]
    Rpc(String),

    #[error("Validity anchor expired before {signature} reached the requested commitment")]
    AnchorExpired { signature: Signature },

    #[error("Wait for commitment timed out after {0:?}")]
    WaitTimeout(Duration),

    #[error("Invalid transaction payload: {0}")]
    InvalidPayload(String),

    #[error("Invalid RPC response: {0}")]
    InvalidResponse(String),
}

impl LedgerError {
    /// Whether the node answered with a rate limit.
    pub fn is_rate_limited(&self) -> bool {
        match self {
            LedgerError::Rpc(message) => crate::classify::is_rate_limited(message),
            _ => false,
        }
    }
}

impl From<solana_client::client_error::ClientError> for LedgerError {
    fn from(error: solana_client::client_error::ClientError) -> Self {
        LedgerError::Rpc(error.to_string())
    }
}

/// Errors surfaced by the submission engine and confirmation tracker
#[derive(Error, Debug, Clone, PartialEq)]
pub enum TxError {
    #[error(transparent)]
    Ledger(#[from] LedgerError),

    #[error("Transaction rejected ({kind}): {message}")]
    Rejected { kind: TerminalKind, message: String },

    #[error("Transaction failed after {attempts} attempts: {last_error}")]
    RetriesExhausted {
        attempts: u32,
        last_error: Box<TxError>,
    },

    #[error("Transaction {signature} not confirmed after {attempts} attempts: {last_error}")]
    ConfirmationTimeout {
        signature: Signature,
        attempts: u32,
        last_error: String,
    },

    #[error("Transaction {signature} failed on-ledger: {error}")]
    ExecutionFailed {
        signature: Signature,
        error: TransactionError,
    },

    #[error("Deadline exceeded after {attempts} attempts{}", describe_cause(.last_error))]
    DeadlineExceeded {
        attempts: u32,
        last_error: Option<String>,
    },

    #[error("Signing failed: {0}")]
    Signing(String),

    #[error("Serialization failed: {0}")]
    Serialization(String),

    #[error("Configuration error: {0}")]
    Config(String),
}

fn describe_cause(cause: &Option<String>) -> String {
    cause
        .as_ref()
        .map(|cause| format!(": {}", cause))
        .unwrap_or_default()
}

impl TxError {
    /// The transaction may have landed even though the call failed.
    pub fn is_ambiguous(&self) -> bool {
        match self {
            TxError::ConfirmationTimeout { .. } | TxError::DeadlineExceeded { .. } => true,
            TxError::RetriesExhausted { last_error, .. } => last_error.is_ambiguous(),
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exhaustion_names_attempts_and_cause() {
        let error = TxError::RetriesExhausted {
            attempts: 5,
            last_error: Box::new(TxError::Ledger(LedgerError::Rpc("connection reset".into()))),
        };
        assert_eq!(
            error.to_string(),
            "Transaction failed after 5 attempts: RPC error: connection reset"
        );
        assert!(!error.is_ambiguous());
    }

    #[test]
    fn test_deadline_message() {
        let bare = TxError::DeadlineExceeded {
            attempts: 2,
            last_error: None,
        };
        assert_eq!(bare.to_string(), "Deadline exceeded after 2 attempts");

        let with_cause = TxError::DeadlineExceeded {
            attempts: 2,
            last_error: Some("RPC error: 503".into()),
        };
        assert_eq!(
            with_cause.to_string(),
            "Deadline exceeded after 2 attempts: RPC error: 503"
        );
        assert!(with_cause.is_ambiguous());
    }

    #[test]
    fn test_rate_limit_detection() {
        assert!(LedgerError::Rpc("HTTP status client error (429 Too Many Requests)".into())
            .is_rate_limited());
        assert!(!LedgerError::Rpc("connection refused".into()).is_rate_limited());
        assert!(!LedgerError::WaitTimeout(Duration::from_secs(45)).is_rate_limited());
    }
}
