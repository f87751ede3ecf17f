use ecosystem_sdk::SdkError;
use ecosystem_tx::{LedgerError, TxError};
use solana_sdk::pubkey::Pubkey;
use thiserror::Error;

pub type ClientResult<T> = Result<T, ClientError>;

#[derive(Error, Debug)]
pub enum ClientError {
    #[error("Ledger error: {0}")]
    Ledger(#[from] LedgerError),

    #[error("SDK error: {0}")]
    Sdk(#[from] SdkError),

    /// Submission failure, tagged with the operation that produced it.
    #[error("{operation} failed: {source}")]
    Operation {
        operation: &'static str,
        #[source]
        source: TxError,
    },

    #[error("Account not found: {0}")]
    AccountNotFound(String),

    #[error("Mint not found: {0}")]
    MintNotFound(Pubkey),

    #[error("Owner {owner} of {address} is not a recognized token program")]
    UnrecognizedTokenProgram { address: Pubkey, owner: Pubkey },

    #[error("Ecosystem config not found for mint {0}")]
    EcosystemNotFound(Pubkey),

    #[error("No ecosystem token account for {owner} and mint {mint}")]
    NoEcosystemTokenAccount { owner: Pubkey, mint: Pubkey },
}

impl ClientError {
    /// The engine error behind a failed submission, if this is one.
    pub fn tx_error(&self) -> Option<&TxError> {
        match self {
            ClientError::Operation { source, .. } => Some(source),
            _ => None,
        }
    }
}
