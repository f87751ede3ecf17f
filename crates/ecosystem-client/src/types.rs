/*!
# Client Data Types

Parameters accepted by the operation drivers and the identifiers they hand
back once a transaction is confirmed.
*/

use ecosystem_sdk::{MerchantBalance, TRANSFER_HOOK_PROGRAM_ID};
use solana_sdk::{pubkey::Pubkey, signature::Signature};

/// Parameters for a new ecosystem mint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateEcosystemParams {
    pub decimals: u8,
    pub name: String,
    pub symbol: String,
    pub uri: String,
    pub transfer_hook_program_id: Pubkey,
    /// Defaults to the payer
    pub ecosystem_partner_wallet: Option<Pubkey>,
    pub max_minting_cap: u64,
    pub withdrawal_fee_basis_points: u16,
    pub deposit_fee_basis_points: u16,
    pub collateral_token_mint: Pubkey,
}

impl CreateEcosystemParams {
    pub const DEFAULT_DECIMALS: u8 = 5;
    pub const DEFAULT_NAME: &'static str = "Test Ecosystem Token";
    pub const DEFAULT_SYMBOL: &'static str = "TEST";
    pub const DEFAULT_MAX_MINTING_CAP: u64 = 1_000_000_000_000;

    pub fn new(collateral_token_mint: Pubkey) -> Self {
        Self {
            decimals: Self::DEFAULT_DECIMALS,
            name: Self::DEFAULT_NAME.to_string(),
            symbol: Self::DEFAULT_SYMBOL.to_string(),
            uri: String::new(),
            transfer_hook_program_id: TRANSFER_HOOK_PROGRAM_ID,
            ecosystem_partner_wallet: None,
            max_minting_cap: Self::DEFAULT_MAX_MINTING_CAP,
            withdrawal_fee_basis_points: 0,
            deposit_fee_basis_points: 0,
            collateral_token_mint,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DepositParams {
    pub ecosystem_mint: Pubkey,
    pub user_collateral_account: Pubkey,
    pub amount: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ApproveWithdrawalParams {
    pub ecosystem_mint: Pubkey,
    pub merchant: Pubkey,
    pub merchant_token_account: Pubkey,
}

/// `signature` is `None` when the config already existed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InitializeResult {
    pub config: Pubkey,
    pub signature: Option<Signature>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CreateEcosystemResult {
    pub mint: Pubkey,
    pub ecosystem_config: Pubkey,
    pub fee_vault: Pubkey,
    pub collateral_vault: Pubkey,
    pub signature: Signature,
}

/// `signature` is `None` when the token account already existed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CreateTokenAccountResult {
    pub token_account: Pubkey,
    pub signature: Option<Signature>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DepositResult {
    pub signature: Signature,
    pub user_ecosystem_token_account: Pubkey,
    /// Balance read back after confirmation; `None` if it could not be read
    pub ecosystem_token_balance: Option<u64>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WithdrawalRequestResult {
    pub withdrawal_request: Pubkey,
    pub merchant_balance: Pubkey,
    pub signature: Signature,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OperationResult {
    pub signature: Signature,
}

/// What was found at a merchant balance address.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BalanceReport {
    pub address: Pubkey,
    pub ecosystem_config: Pubkey,
    pub state: BalanceState,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BalanceState {
    Missing,
    Decoded {
        owner: Pubkey,
        data_len: usize,
        balance: MerchantBalance,
    },
    /// Data too short to decode; kept raw for display
    Undecoded { owner: Pubkey, data: Vec<u8> },
}
