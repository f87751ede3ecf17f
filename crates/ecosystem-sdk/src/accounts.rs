//! Account lists, one type per program instruction.
//!
//! The program reads its accounts positionally, so each type fixes the order
//! in its `to_account_metas` implementation and nowhere else.

use solana_sdk::{instruction::AccountMeta, pubkey::Pubkey};

pub trait ToAccountMetas {
    fn to_account_metas(&self) -> Vec<AccountMeta>;
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Initialize {
    pub config: Pubkey,
    pub payer: Pubkey,
    pub system_program: Pubkey,
}

impl ToAccountMetas for Initialize {
    fn to_account_metas(&self) -> Vec<AccountMeta> {
        vec![
            AccountMeta::new(self.config, false),
            AccountMeta::new(self.payer, true),
            AccountMeta::new_readonly(self.system_program, false),
        ]
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateEcosystem {
    pub config: Pubkey,
    pub payer: Pubkey,
    pub mint: Pubkey,
    pub mint_authority: Pubkey,
    pub ecosystem_config: Pubkey,
    pub fee_vault_authority: Pubkey,
    pub collateral_token_mint: Pubkey,
    pub fee_vault: Pubkey,
    pub collateral_vault: Pubkey,
    pub token_program: Pubkey,
    pub collateral_token_program: Pubkey,
    pub system_program: Pubkey,
    pub rent: Pubkey,
}

impl ToAccountMetas for CreateEcosystem {
    fn to_account_metas(&self) -> Vec<AccountMeta> {
        vec![
            AccountMeta::new_readonly(self.config, false),
            AccountMeta::new(self.payer, true),
            AccountMeta::new(self.mint, true),
            AccountMeta::new_readonly(self.mint_authority, false),
            AccountMeta::new(self.ecosystem_config, false),
            AccountMeta::new_readonly(self.fee_vault_authority, false),
            AccountMeta::new_readonly(self.collateral_token_mint, false),
            AccountMeta::new(self.fee_vault, false),
            AccountMeta::new(self.collateral_vault, false),
            AccountMeta::new_readonly(self.token_program, false),
            AccountMeta::new_readonly(self.collateral_token_program, false),
            AccountMeta::new_readonly(self.system_program, false),
            AccountMeta::new_readonly(self.rent, false),
        ]
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DepositEcosystem {
    pub payer: Pubkey,
    pub config: Pubkey,
    pub ecosystem_mint: Pubkey,
    pub mint_authority: Pubkey,
    pub user_ecosystem_token_account: Pubkey,
    pub ecosystem_config: Pubkey,
    pub collateral_token_mint: Pubkey,
    pub user_collateral_account: Pubkey,
    pub fee_vault: Pubkey,
    pub collateral_vault: Pubkey,
    pub ecosystem_token_program: Pubkey,
    pub collateral_token_program: Pubkey,
}

impl ToAccountMetas for DepositEcosystem {
    fn to_account_metas(&self) -> Vec<AccountMeta> {
        vec![
            AccountMeta::new(self.payer, true),
            AccountMeta::new_readonly(self.config, false),
            AccountMeta::new(self.ecosystem_mint, false),
            AccountMeta::new_readonly(self.mint_authority, false),
            AccountMeta::new(self.user_ecosystem_token_account, false),
            AccountMeta::new(self.ecosystem_config, false),
            AccountMeta::new_readonly(self.collateral_token_mint, false),
            AccountMeta::new(self.user_collateral_account, false),
            AccountMeta::new(self.fee_vault, false),
            AccountMeta::new(self.collateral_vault, false),
            AccountMeta::new_readonly(self.ecosystem_token_program, false),
            AccountMeta::new_readonly(self.collateral_token_program, false),
        ]
    }
}

/// Shared by add-approver and remove-approver.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ManageApprover {
    pub config: Pubkey,
    pub payer: Pubkey,
}

impl ToAccountMetas for ManageApprover {
    fn to_account_metas(&self) -> Vec<AccountMeta> {
        vec![
            AccountMeta::new(self.config, false),
            AccountMeta::new(self.payer, true),
        ]
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateWithdrawalRequest {
    pub payer: Pubkey,
    pub merchant_balance: Pubkey,
    pub ecosystem_config: Pubkey,
    pub ecosystem_mint: Pubkey,
    pub withdrawal_request: Pubkey,
    pub system_program: Pubkey,
}

impl ToAccountMetas for CreateWithdrawalRequest {
    fn to_account_metas(&self) -> Vec<AccountMeta> {
        vec![
            AccountMeta::new(self.payer, true),
            AccountMeta::new_readonly(self.merchant_balance, false),
            AccountMeta::new_readonly(self.ecosystem_config, false),
            AccountMeta::new_readonly(self.ecosystem_mint, false),
            AccountMeta::new(self.withdrawal_request, false),
            AccountMeta::new_readonly(self.system_program, false),
        ]
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApproveWithdrawalRequest {
    pub config: Pubkey,
    pub approver: Pubkey,
    pub withdrawal_request: Pubkey,
    pub merchant_balance: Pubkey,
    pub ecosystem_config: Pubkey,
    pub ecosystem_mint: Pubkey,
    pub output_mint: Pubkey,
    pub output_mint_program: Pubkey,
    pub vault: Pubkey,
    pub vault_output_token_account: Pubkey,
    pub merchant_token_account: Pubkey,
    pub fee_vault: Pubkey,
}

impl ToAccountMetas for ApproveWithdrawalRequest {
    fn to_account_metas(&self) -> Vec<AccountMeta> {
        vec![
            AccountMeta::new_readonly(self.config, false),
            AccountMeta::new(self.approver, true),
            AccountMeta::new(self.withdrawal_request, false),
            AccountMeta::new(self.merchant_balance, false),
            AccountMeta::new(self.ecosystem_config, false),
            AccountMeta::new_readonly(self.ecosystem_mint, false),
            AccountMeta::new_readonly(self.output_mint, false),
            AccountMeta::new_readonly(self.output_mint_program, false),
            AccountMeta::new(self.vault, false),
            AccountMeta::new(self.vault_output_token_account, false),
            AccountMeta::new(self.merchant_token_account, false),
            AccountMeta::new(self.fee_vault, false),
        ]
    }
}
