//! Retryable vs. terminal classification of broadcast failures.
//!
//! Nodes report most rejections as free-form text, so classification matches
//! known substrings. Only the allow-list below is terminal; anything
//! unrecognised is retried.

use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TerminalKind {
    InsufficientFunds,
    BlockhashNotFound,
    TransactionTooLarge,
    InvalidTransaction,
    IncorrectProgramId,
    AccountNotFound,
    InvalidAccountData,
    AlreadyProcessed,
}

impl TerminalKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            TerminalKind::InsufficientFunds => "insufficient funds",
            TerminalKind::BlockhashNotFound => "blockhash not found",
            TerminalKind::TransactionTooLarge => "transaction too large",
            TerminalKind::InvalidTransaction => "invalid transaction",
            TerminalKind::IncorrectProgramId => "incorrect program id",
            TerminalKind::AccountNotFound => "account not found",
            TerminalKind::InvalidAccountData => "invalid account data",
            TerminalKind::AlreadyProcessed => "already processed",
        }
    }
}

impl fmt::Display for TerminalKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RetryCause {
    RateLimited,
    Transient,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorClass {
    Retryable(RetryCause),
    Terminal(TerminalKind),
}

impl ErrorClass {
    pub fn is_terminal(&self) -> bool {
        matches!(self, ErrorClass::Terminal(_))
    }
}

const TERMINAL_KINDS: [TerminalKind; 8] = [
    TerminalKind::InsufficientFunds,
    TerminalKind::BlockhashNotFound,
    TerminalKind::TransactionTooLarge,
    TerminalKind::InvalidTransaction,
    TerminalKind::IncorrectProgramId,
    TerminalKind::AccountNotFound,
    TerminalKind::InvalidAccountData,
    TerminalKind::AlreadyProcessed,
];

pub fn classify(message: &str) -> ErrorClass {
    let message = message.to_lowercase();

    if let Some(kind) = TERMINAL_KINDS
        .iter()
        .find(|kind| message.contains(kind.as_str()))
    {
        return ErrorClass::Terminal(*kind);
    }

    if is_rate_limited(&message) {
        ErrorClass::Retryable(RetryCause::RateLimited)
    } else {
        ErrorClass::Retryable(RetryCause::Transient)
    }
}

pub fn is_rate_limited(message: &str) -> bool {
    let message = message.to_lowercase();
    message.contains("429") || message.contains("too many requests")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_terminal_substrings() {
        let cases = [
            (
                "Transaction simulation failed: Attempt to debit an account but found no record of a prior credit. Insufficient funds for fee",
                TerminalKind::InsufficientFunds,
            ),
            ("Blockhash not found", TerminalKind::BlockhashNotFound),
            ("transaction too large: 1300 > 1232", TerminalKind::TransactionTooLarge),
            ("invalid transaction: signature failure", TerminalKind::InvalidTransaction),
            ("Incorrect program id for instruction", TerminalKind::IncorrectProgramId),
            ("AccountNotFound: account not found", TerminalKind::AccountNotFound),
            ("invalid account data for instruction", TerminalKind::InvalidAccountData),
            ("Transaction already processed", TerminalKind::AlreadyProcessed),
        ];

        for (message, kind) in cases {
            assert_eq!(classify(message), ErrorClass::Terminal(kind), "{}", message);
        }
    }

    #[test]
    fn test_unknown_errors_are_retryable() {
        assert_eq!(
            classify("error sending request: connection reset by peer"),
            ErrorClass::Retryable(RetryCause::Transient)
        );
        assert_eq!(classify(""), ErrorClass::Retryable(RetryCause::Transient));
        assert!(!classify("Node is behind by 42 slots").is_terminal());
    }

    #[test]
    fn test_rate_limit_is_retryable() {
        assert_eq!(
            classify("HTTP status client error (429 Too Many Requests) for url"),
            ErrorClass::Retryable(RetryCause::RateLimited)
        );
    }

    #[test]
    fn test_terminal_wins_over_rate_limit() {
        assert_eq!(
            classify("429: insufficient funds"),
            ErrorClass::Terminal(TerminalKind::InsufficientFunds)
        );
    }
}
