use solana_sdk::pubkey::Pubkey;
use thiserror::Error;

pub type SdkResult<T> = Result<T, SdkError>;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SdkError {
    #[error("Invalid seeds: {0}")]
    InvalidSeed(String),

    #[error("Argument {name} out of range: {reason}")]
    ArgumentRange { name: &'static str, reason: String },

    #[error("Invalid argument {name}: {reason}")]
    InvalidArgument { name: &'static str, reason: String },

    #[error("Missing account metadata: {0}")]
    MissingAccountMetadata(&'static str),

    #[error("Account {address} appears with conflicting signer/writable flags")]
    ConflictingAccountFlags { address: Pubkey },

    #[error("Invalid account data: {0}")]
    InvalidAccountData(String),
}
