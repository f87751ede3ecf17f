//! Instruction payloads, one type per program instruction.

use crate::{
    Arg, Discriminator, InstructionData, ADD_APPROVER_DISCRIMINATOR,
    APPROVE_WITHDRAWAL_REQUEST_DISCRIMINATOR, CREATE_ECOSYSTEM_DISCRIMINATOR,
    CREATE_WITHDRAWAL_REQUEST_DISCRIMINATOR, DEPOSIT_ECOSYSTEM_DISCRIMINATOR,
    INITIALIZE_DISCRIMINATOR, REMOVE_APPROVER_DISCRIMINATOR,
};
use solana_sdk::pubkey::Pubkey;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Initialize {}

impl InstructionData for Initialize {
    const DISCRIMINATOR: Discriminator = INITIALIZE_DISCRIMINATOR;

    fn args(&self) -> Vec<Arg<'_>> {
        vec![]
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateEcosystem {
    pub decimals: u8,
    pub name: String,
    pub symbol: String,
    pub uri: String,
    pub transfer_hook_program_id: Pubkey,
    pub ecosystem_partner_wallet: Pubkey,
    pub max_minting_cap: u64,
    pub withdrawal_fee_basis_points: u16,
    pub deposit_fee_basis_points: u16,
    pub collateral_token_mint: Pubkey,
}

impl InstructionData for CreateEcosystem {
    const DISCRIMINATOR: Discriminator = CREATE_ECOSYSTEM_DISCRIMINATOR;

    fn args(&self) -> Vec<Arg<'_>> {
        vec![
            Arg::U8(self.decimals),
            Arg::Str(&self.name),
            Arg::Str(&self.symbol),
            Arg::Str(&self.uri),
            Arg::Address(self.transfer_hook_program_id),
            Arg::Address(self.ecosystem_partner_wallet),
            Arg::U64(self.max_minting_cap),
            Arg::U16(self.withdrawal_fee_basis_points),
            Arg::U16(self.deposit_fee_basis_points),
            Arg::Address(self.collateral_token_mint),
        ]
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DepositEcosystem {
    pub amount: u64,
}

impl InstructionData for DepositEcosystem {
    const DISCRIMINATOR: Discriminator = DEPOSIT_ECOSYSTEM_DISCRIMINATOR;

    fn args(&self) -> Vec<Arg<'_>> {
        vec![Arg::U64(self.amount)]
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AddApprover {
    pub approver: Pubkey,
}

impl InstructionData for AddApprover {
    const DISCRIMINATOR: Discriminator = ADD_APPROVER_DISCRIMINATOR;

    fn args(&self) -> Vec<Arg<'_>> {
        vec![Arg::Address(self.approver)]
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemoveApprover {
    pub approver: Pubkey,
}

impl InstructionData for RemoveApprover {
    const DISCRIMINATOR: Discriminator = REMOVE_APPROVER_DISCRIMINATOR;

    fn args(&self) -> Vec<Arg<'_>> {
        vec![Arg::Address(self.approver)]
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CreateWithdrawalRequest {}

impl InstructionData for CreateWithdrawalRequest {
    const DISCRIMINATOR: Discriminator = CREATE_WITHDRAWAL_REQUEST_DISCRIMINATOR;

    fn args(&self) -> Vec<Arg<'_>> {
        vec![]
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ApproveWithdrawalRequest {}

impl InstructionData for ApproveWithdrawalRequest {
    const DISCRIMINATOR: Discriminator = APPROVE_WITHDRAWAL_REQUEST_DISCRIMINATOR;

    fn args(&self) -> Vec<Arg<'_>> {
        vec![]
    }
}
