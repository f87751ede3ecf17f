/*!
# Transaction Builders

High-level builders for ecosystem program operations. All functions follow
the naming pattern `build_*_tx` and return unsigned transactions whose
recent blockhash is left at its default value: the validity anchor is
attached when the transaction is signed, exactly once, right before
submission.

## Usage

```rust
use ecosystem_sdk::{build_deposit_ecosystem_tx, AccountMetadata, AddressFinder, DEFAULT_COMPUTE_UNITS};
use solana_sdk::pubkey::Pubkey;

let address_finder = AddressFinder::default();
let metadata = AccountMetadata {
    collateral_token_mint: Some(Pubkey::new_unique()),
    collateral_token_program: Some(ecosystem_sdk::SPL_TOKEN_PROGRAM_ID),
    ecosystem_token_program: Some(ecosystem_sdk::TOKEN_2022_PROGRAM_ID),
    user_ecosystem_token_account: Some(Pubkey::new_unique()),
    ..Default::default()
};

let tx = build_deposit_ecosystem_tx(
    &address_finder,
    Pubkey::new_unique(),
    Pubkey::new_unique(),
    Pubkey::new_unique(),
    &metadata,
    1_000_000,
    DEFAULT_COMPUTE_UNITS,
)
.expect("deposit transaction");

assert_eq!(tx.message.instructions.len(), 2);
```
*/

use crate::{
    build_add_approver_ix, build_approve_withdrawal_request_ix, build_create_ecosystem_ix,
    build_create_token_account_ix, build_create_withdrawal_request_ix,
    build_deposit_ecosystem_ix, build_initialize_ix, build_remove_approver_ix, instruction,
    AccountMetadata, AddressFinder, SdkResult,
};
use solana_sdk::{
    compute_budget::ComputeBudgetInstruction, instruction::Instruction, message::Message,
    pubkey::Pubkey, transaction::Transaction,
};

/// Compute unit limit instruction placed ahead of heavier program instructions.
pub fn compute_unit_limit_ix(units: u32) -> Instruction {
    ComputeBudgetInstruction::set_compute_unit_limit(units)
}

/// Unsigned transaction paid for by `payer`.
pub fn build_transaction(payer: &Pubkey, instructions: &[Instruction]) -> Transaction {
    let message = Message::new(instructions, Some(payer));
    Transaction::new_unsigned(message)
}

pub fn build_initialize_tx(address_finder: &AddressFinder, payer: &Pubkey) -> SdkResult<Transaction> {
    let (initialize_ix, _, _) = build_initialize_ix(address_finder, *payer)?;

    Ok(build_transaction(payer, &[initialize_ix]))
}

/// The new `mint` must co-sign alongside the payer.
pub fn build_create_ecosystem_tx(
    address_finder: &AddressFinder,
    payer: &Pubkey,
    mint: &Pubkey,
    metadata: &AccountMetadata,
    ix_data: instruction::CreateEcosystem,
    compute_units: u32,
) -> SdkResult<Transaction> {
    let (create_ix, _, _) =
        build_create_ecosystem_ix(address_finder, *payer, *mint, metadata, ix_data)?;

    Ok(build_transaction(
        payer,
        &[compute_unit_limit_ix(compute_units), create_ix],
    ))
}

pub fn build_deposit_ecosystem_tx(
    address_finder: &AddressFinder,
    payer: Pubkey,
    ecosystem_mint: Pubkey,
    user_collateral_account: Pubkey,
    metadata: &AccountMetadata,
    amount: u64,
    compute_units: u32,
) -> SdkResult<Transaction> {
    let (deposit_ix, _, _) = build_deposit_ecosystem_ix(
        address_finder,
        payer,
        ecosystem_mint,
        user_collateral_account,
        metadata,
        amount,
    )?;

    Ok(build_transaction(
        &payer,
        &[compute_unit_limit_ix(compute_units), deposit_ix],
    ))
}

pub fn build_add_approver_tx(
    address_finder: &AddressFinder,
    payer: &Pubkey,
    approver: &Pubkey,
) -> SdkResult<Transaction> {
    let (add_ix, _, _) = build_add_approver_ix(address_finder, *payer, *approver)?;

    Ok(build_transaction(payer, &[add_ix]))
}

pub fn build_remove_approver_tx(
    address_finder: &AddressFinder,
    payer: &Pubkey,
    approver: &Pubkey,
) -> SdkResult<Transaction> {
    let (remove_ix, _, _) = build_remove_approver_ix(address_finder, *payer, *approver)?;

    Ok(build_transaction(payer, &[remove_ix]))
}

pub fn build_create_withdrawal_request_tx(
    address_finder: &AddressFinder,
    payer: &Pubkey,
    merchant: &Pubkey,
    ecosystem_mint: &Pubkey,
) -> SdkResult<Transaction> {
    let (request_ix, _, _) =
        build_create_withdrawal_request_ix(address_finder, *payer, *merchant, *ecosystem_mint)?;

    Ok(build_transaction(payer, &[request_ix]))
}

pub fn build_approve_withdrawal_request_tx(
    address_finder: &AddressFinder,
    approver: &Pubkey,
    ecosystem_mint: &Pubkey,
    merchant: &Pubkey,
    merchant_token_account: &Pubkey,
    metadata: &AccountMetadata,
) -> SdkResult<Transaction> {
    let (approve_ix, _, _) = build_approve_withdrawal_request_ix(
        address_finder,
        *approver,
        *ecosystem_mint,
        *merchant,
        *merchant_token_account,
        metadata,
    )?;

    Ok(build_transaction(approver, &[approve_ix]))
}

/// Returns the transaction together with the token account it creates.
pub fn build_create_token_account_tx(
    address_finder: &AddressFinder,
    payer: &Pubkey,
    mint: &Pubkey,
    token_program: &Pubkey,
) -> (Transaction, Pubkey) {
    let (create_ix, token_account) =
        build_create_token_account_ix(address_finder, *payer, *payer, *mint, *token_program);

    (build_transaction(payer, &[create_ix]), token_account)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{SPL_TOKEN_PROGRAM_ID, TOKEN_2022_PROGRAM_ID, TRANSFER_HOOK_PROGRAM_ID};
    use solana_sdk::hash::Hash;

    #[test]
    fn test_transactions_are_unsigned_and_unanchored() {
        let finder = AddressFinder::default();
        let payer = Pubkey::new_unique();

        let tx = build_initialize_tx(&finder, &payer).unwrap();

        assert_eq!(tx.message.account_keys[0], payer);
        assert_eq!(tx.message.recent_blockhash, Hash::default());
        assert_eq!(tx.signatures.len(), 1);
        assert!(tx
            .signatures
            .iter()
            .all(|sig| *sig == solana_sdk::signature::Signature::default()));
    }

    #[test]
    fn test_create_ecosystem_requires_two_signers() {
        let finder = AddressFinder::default();
        let payer = Pubkey::new_unique();
        let mint = Pubkey::new_unique();
        let metadata = AccountMetadata {
            collateral_token_program: Some(SPL_TOKEN_PROGRAM_ID),
            ..Default::default()
        };
        let ix_data = instruction::CreateEcosystem {
            decimals: 5,
            name: "Test Ecosystem Token".to_string(),
            symbol: "TEST".to_string(),
            uri: String::new(),
            transfer_hook_program_id: TRANSFER_HOOK_PROGRAM_ID,
            ecosystem_partner_wallet: payer,
            max_minting_cap: 1_000_000_000_000,
            withdrawal_fee_basis_points: 0,
            deposit_fee_basis_points: 0,
            collateral_token_mint: Pubkey::new_unique(),
        };

        let tx =
            build_create_ecosystem_tx(&finder, &payer, &mint, &metadata, ix_data, 400_000).unwrap();

        assert_eq!(tx.message.header.num_required_signatures, 2);
        assert_eq!(&tx.message.account_keys[..2], &[payer, mint]);

        let expected = compute_unit_limit_ix(400_000);
        let budget_ix = &tx.message.instructions[0];
        assert_eq!(
            tx.message.account_keys[budget_ix.program_id_index as usize],
            expected.program_id
        );
        assert_eq!(budget_ix.data, expected.data);
    }

    #[test]
    fn test_create_token_account_targets_payer() {
        let finder = AddressFinder::default();
        let payer = Pubkey::new_unique();
        let mint = Pubkey::new_unique();

        let (tx, token_account) =
            build_create_token_account_tx(&finder, &payer, &mint, &TOKEN_2022_PROGRAM_ID);

        assert_eq!(
            token_account,
            finder.find_associated_token_address(&payer, &mint, &TOKEN_2022_PROGRAM_ID)
        );
        assert!(tx.message.account_keys.contains(&token_account));
        assert_eq!(tx.message.header.num_required_signatures, 1);
    }
}
