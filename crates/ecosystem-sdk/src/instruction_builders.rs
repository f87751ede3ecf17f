use crate::{
    accounts::{self, ToAccountMetas},
    instruction, AccountMetadata, AddressFinder, InstructionData, SdkError, SdkResult,
    WITHDRAWAL_OUTPUT_MINT,
};
use solana_sdk::{
    instruction::{AccountMeta, Instruction},
    pubkey::Pubkey,
};
use spl_associated_token_account::instruction::create_associated_token_account_idempotent;
use std::collections::HashMap;

/// Reject account lists that name the same account with different flags.
pub fn check_account_flags(metas: &[AccountMeta]) -> SdkResult<()> {
    let mut seen: HashMap<Pubkey, (bool, bool)> = HashMap::with_capacity(metas.len());
    for meta in metas {
        let flags = (meta.is_signer, meta.is_writable);
        if let Some(previous) = seen.insert(meta.pubkey, flags) {
            if previous != flags {
                return Err(SdkError::ConflictingAccountFlags {
                    address: meta.pubkey,
                });
            }
        }
    }
    Ok(())
}

fn to_instruction<A, D>(address_finder: &AddressFinder, ix_accounts: &A, ix_data: &D) -> SdkResult<Instruction>
where
    A: ToAccountMetas,
    D: InstructionData,
{
    let accounts = ix_accounts.to_account_metas();
    check_account_flags(&accounts)?;

    Ok(Instruction {
        program_id: address_finder.program_id,
        accounts,
        data: ix_data.data()?,
    })
}

pub fn build_initialize_ix(
    address_finder: &AddressFinder,
    payer: Pubkey,
) -> SdkResult<(Instruction, accounts::Initialize, instruction::Initialize)> {
    let (config, _) = address_finder.find_config_address()?;

    let ix_accounts = accounts::Initialize {
        config,
        payer,
        system_program: address_finder.system_program_id,
    };

    let ix_data = instruction::Initialize {};

    let ix = to_instruction(address_finder, &ix_accounts, &ix_data)?;

    Ok((ix, ix_accounts, ix_data))
}

/// `ix_data.collateral_token_mint` selects the collateral; its owning token
/// program must be present in `metadata`.
pub fn build_create_ecosystem_ix(
    address_finder: &AddressFinder,
    payer: Pubkey,
    mint: Pubkey,
    metadata: &AccountMetadata,
    ix_data: instruction::CreateEcosystem,
) -> SdkResult<(Instruction, accounts::CreateEcosystem, instruction::CreateEcosystem)> {
    let collateral_token_program = AccountMetadata::require(
        metadata.collateral_token_program,
        "collateral token program",
    )?;

    let (config, _) = address_finder.find_config_address()?;
    let (mint_authority, _) = address_finder.find_mint_authority_address(&mint)?;
    let (ecosystem_config, _) = address_finder.find_ecosystem_config_address(&mint)?;
    let (fee_vault_authority, _) = address_finder.find_fee_vault_authority_address(&mint)?;
    let (fee_vault, _) = address_finder.find_fee_vault_address(&mint)?;
    let (collateral_vault, _) = address_finder.find_collateral_vault_address(&mint)?;

    let ix_accounts = accounts::CreateEcosystem {
        config,
        payer,
        mint,
        mint_authority,
        ecosystem_config,
        fee_vault_authority,
        collateral_token_mint: ix_data.collateral_token_mint,
        fee_vault,
        collateral_vault,
        token_program: address_finder.token_program_id,
        collateral_token_program,
        system_program: address_finder.system_program_id,
        rent: address_finder.rent_id,
    };

    let ix = to_instruction(address_finder, &ix_accounts, &ix_data)?;

    Ok((ix, ix_accounts, ix_data))
}

pub fn build_deposit_ecosystem_ix(
    address_finder: &AddressFinder,
    payer: Pubkey,
    ecosystem_mint: Pubkey,
    user_collateral_account: Pubkey,
    metadata: &AccountMetadata,
    amount: u64,
) -> SdkResult<(Instruction, accounts::DepositEcosystem, instruction::DepositEcosystem)> {
    let user_ecosystem_token_account = AccountMetadata::require(
        metadata.user_ecosystem_token_account,
        "user ecosystem token account",
    )?;
    let collateral_token_mint =
        AccountMetadata::require(metadata.collateral_token_mint, "collateral token mint")?;
    let ecosystem_token_program =
        AccountMetadata::require(metadata.ecosystem_token_program, "ecosystem token program")?;
    let collateral_token_program = AccountMetadata::require(
        metadata.collateral_token_program,
        "collateral token program",
    )?;

    let (config, _) = address_finder.find_config_address()?;
    let (mint_authority, _) = address_finder.find_mint_authority_address(&ecosystem_mint)?;
    let (ecosystem_config, _) = address_finder.find_ecosystem_config_address(&ecosystem_mint)?;
    let (fee_vault, _) = address_finder.find_fee_vault_address(&ecosystem_mint)?;
    let (collateral_vault, _) = address_finder.find_collateral_vault_address(&ecosystem_mint)?;

    let ix_accounts = accounts::DepositEcosystem {
        payer,
        config,
        ecosystem_mint,
        mint_authority,
        user_ecosystem_token_account,
        ecosystem_config,
        collateral_token_mint,
        user_collateral_account,
        fee_vault,
        collateral_vault,
        ecosystem_token_program,
        collateral_token_program,
    };

    let ix_data = instruction::DepositEcosystem { amount };

    let ix = to_instruction(address_finder, &ix_accounts, &ix_data)?;

    Ok((ix, ix_accounts, ix_data))
}

pub fn build_add_approver_ix(
    address_finder: &AddressFinder,
    payer: Pubkey,
    approver: Pubkey,
) -> SdkResult<(Instruction, accounts::ManageApprover, instruction::AddApprover)> {
    let (config, _) = address_finder.find_config_address()?;

    let ix_accounts = accounts::ManageApprover { config, payer };

    let ix_data = instruction::AddApprover { approver };

    let ix = to_instruction(address_finder, &ix_accounts, &ix_data)?;

    Ok((ix, ix_accounts, ix_data))
}

pub fn build_remove_approver_ix(
    address_finder: &AddressFinder,
    payer: Pubkey,
    approver: Pubkey,
) -> SdkResult<(Instruction, accounts::ManageApprover, instruction::RemoveApprover)> {
    let (config, _) = address_finder.find_config_address()?;

    let ix_accounts = accounts::ManageApprover { config, payer };

    let ix_data = instruction::RemoveApprover { approver };

    let ix = to_instruction(address_finder, &ix_accounts, &ix_data)?;

    Ok((ix, ix_accounts, ix_data))
}

pub fn build_create_withdrawal_request_ix(
    address_finder: &AddressFinder,
    payer: Pubkey,
    merchant: Pubkey,
    ecosystem_mint: Pubkey,
) -> SdkResult<(
    Instruction,
    accounts::CreateWithdrawalRequest,
    instruction::CreateWithdrawalRequest,
)> {
    let (ecosystem_config, _) = address_finder.find_ecosystem_config_address(&ecosystem_mint)?;
    let (merchant_balance, _) =
        address_finder.find_merchant_balance_address(&merchant, &ecosystem_mint)?;
    let (withdrawal_request, _) =
        address_finder.find_withdrawal_request_address(&merchant, &ecosystem_config)?;

    let ix_accounts = accounts::CreateWithdrawalRequest {
        payer,
        merchant_balance,
        ecosystem_config,
        ecosystem_mint,
        withdrawal_request,
        system_program: address_finder.system_program_id,
    };

    let ix_data = instruction::CreateWithdrawalRequest {};

    let ix = to_instruction(address_finder, &ix_accounts, &ix_data)?;

    Ok((ix, ix_accounts, ix_data))
}

pub fn build_approve_withdrawal_request_ix(
    address_finder: &AddressFinder,
    approver: Pubkey,
    ecosystem_mint: Pubkey,
    merchant: Pubkey,
    merchant_token_account: Pubkey,
    metadata: &AccountMetadata,
) -> SdkResult<(
    Instruction,
    accounts::ApproveWithdrawalRequest,
    instruction::ApproveWithdrawalRequest,
)> {
    let output_mint_program = AccountMetadata::require(
        metadata.output_mint_token_program,
        "output mint token program",
    )?;
    let output_mint = WITHDRAWAL_OUTPUT_MINT;

    let (config, _) = address_finder.find_config_address()?;
    let (ecosystem_config, _) = address_finder.find_ecosystem_config_address(&ecosystem_mint)?;
    let (fee_vault, _) = address_finder.find_fee_vault_address(&ecosystem_mint)?;
    let (withdrawal_request, _) =
        address_finder.find_withdrawal_request_address(&merchant, &ecosystem_config)?;
    let (merchant_balance, _) =
        address_finder.find_merchant_balance_address(&merchant, &ecosystem_mint)?;
    let (vault, _) = address_finder.find_vault_address()?;
    let vault_output_token_account =
        address_finder.find_associated_token_address(&vault, &output_mint, &output_mint_program);

    let ix_accounts = accounts::ApproveWithdrawalRequest {
        config,
        approver,
        withdrawal_request,
        merchant_balance,
        ecosystem_config,
        ecosystem_mint,
        output_mint,
        output_mint_program,
        vault,
        vault_output_token_account,
        merchant_token_account,
        fee_vault,
    };

    let ix_data = instruction::ApproveWithdrawalRequest {};

    let ix = to_instruction(address_finder, &ix_accounts, &ix_data)?;

    Ok((ix, ix_accounts, ix_data))
}

/// Idempotent associated token account creation for `owner`, paid by `payer`.
///
/// Returns the instruction and the address it will create.
pub fn build_create_token_account_ix(
    address_finder: &AddressFinder,
    payer: Pubkey,
    owner: Pubkey,
    mint: Pubkey,
    token_program: Pubkey,
) -> (Instruction, Pubkey) {
    let token_account = address_finder.find_associated_token_address(&owner, &mint, &token_program);
    let ix = create_associated_token_account_idempotent(&payer, &owner, &mint, &token_program);
    (ix, token_account)
}
