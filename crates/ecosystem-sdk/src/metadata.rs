use crate::{SdkError, SdkResult};
use solana_sdk::pubkey::Pubkey;

/// Facts about external accounts that have to be read from the ledger
/// before an instruction can be assembled.
///
/// Each builder requires only the fields its account list references and
/// fails with [`SdkError::MissingAccountMetadata`] when one of them is unset.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AccountMetadata {
    /// Token program owning the collateral mint
    pub collateral_token_program: Option<Pubkey>,
    /// Mint of the user's collateral token account
    pub collateral_token_mint: Option<Pubkey>,
    /// Token program owning the ecosystem mint
    pub ecosystem_token_program: Option<Pubkey>,
    /// The payer's token account for the ecosystem mint
    pub user_ecosystem_token_account: Option<Pubkey>,
    /// Token program owning the withdrawal output mint
    pub output_mint_token_program: Option<Pubkey>,
}

impl AccountMetadata {
    pub(crate) fn require(value: Option<Pubkey>, name: &'static str) -> SdkResult<Pubkey> {
        value.ok_or(SdkError::MissingAccountMetadata(name))
    }
}
