use crate::LedgerResult;
use async_trait::async_trait;
use solana_sdk::{
    account::Account,
    commitment_config::{CommitmentConfig, CommitmentLevel},
    hash::Hash,
    pubkey::Pubkey,
    signature::Signature,
    transaction::TransactionError,
};
use std::{fmt, str::FromStr};

/// Durability tiers, ordered by irreversibility.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Commitment {
    Processed,
    #[default]
    Confirmed,
    Finalized,
}

impl Commitment {
    pub fn level(self) -> CommitmentLevel {
        match self {
            Commitment::Processed => CommitmentLevel::Processed,
            Commitment::Confirmed => CommitmentLevel::Confirmed,
            Commitment::Finalized => CommitmentLevel::Finalized,
        }
    }

    pub fn to_config(self) -> CommitmentConfig {
        CommitmentConfig {
            commitment: self.level(),
        }
    }
}

impl fmt::Display for Commitment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Commitment::Processed => "processed",
            Commitment::Confirmed => "confirmed",
            Commitment::Finalized => "finalized",
        })
    }
}

impl FromStr for Commitment {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.to_ascii_lowercase().as_str() {
            "processed" => Ok(Commitment::Processed),
            "confirmed" => Ok(Commitment::Confirmed),
            "finalized" => Ok(Commitment::Finalized),
            other => Err(format!(
                "unknown commitment {:?}, expected processed, confirmed or finalized",
                other
            )),
        }
    }
}

/// Recent blockhash bounding how long a signed transaction stays valid.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ValidityAnchor {
    pub blockhash: Hash,
    pub last_valid_block_height: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BroadcastConfig {
    pub skip_preflight: bool,
    pub preflight_commitment: Commitment,
}

/// Latest status the ledger reports for a signature.
#[derive(Debug, Clone, PartialEq)]
pub struct SignatureStatus {
    /// Highest commitment reached so far, if any
    pub commitment: Option<Commitment>,
    /// On-ledger execution error
    pub err: Option<TransactionError>,
}

impl SignatureStatus {
    pub fn satisfies(&self, commitment: Commitment) -> bool {
        self.commitment.is_some_and(|reached| reached >= commitment)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum WaitOutcome {
    Committed,
    Failed(TransactionError),
}

/// The ledger RPC operations the submission pipeline depends on.
#[async_trait]
pub trait LedgerClient: Send + Sync {
    async fn latest_anchor(&self, commitment: Commitment) -> LedgerResult<ValidityAnchor>;

    /// Broadcast serialized transaction bytes exactly as given.
    async fn broadcast(&self, payload: &[u8], config: &BroadcastConfig)
        -> LedgerResult<Signature>;

    async fn signature_status(&self, signature: &Signature)
        -> LedgerResult<Option<SignatureStatus>>;

    /// Resolve once `signature` reaches `commitment` or fails on-ledger.
    ///
    /// Fails with [`crate::LedgerError::AnchorExpired`] once `anchor` can no
    /// longer be included.
    async fn wait_for_commitment(
        &self,
        signature: &Signature,
        anchor: &ValidityAnchor,
        commitment: Commitment,
    ) -> LedgerResult<WaitOutcome>;

    async fn account(&self, address: &Pubkey) -> LedgerResult<Option<Account>>;

    /// Token accounts held by `owner` for `mint`.
    async fn token_accounts_by_owner(&self, owner: &Pubkey, mint: &Pubkey)
        -> LedgerResult<Vec<Pubkey>>;
}
