use ecosystem_sdk::{
    accounts::ToAccountMetas, build_deposit_ecosystem_ix, build_initialize_ix,
    instruction, AccountMetadata, AddressFinder, InstructionData, ADD_APPROVER_DISCRIMINATOR,
    APPROVE_WITHDRAWAL_REQUEST_DISCRIMINATOR, CREATE_ECOSYSTEM_DISCRIMINATOR,
    CREATE_WITHDRAWAL_REQUEST_DISCRIMINATOR, DEPOSIT_ECOSYSTEM_DISCRIMINATOR,
    INITIALIZE_DISCRIMINATOR, REMOVE_APPROVER_DISCRIMINATOR, SPL_TOKEN_PROGRAM_ID,
    TOKEN_2022_PROGRAM_ID,
};
use solana_sdk::pubkey::Pubkey;

#[test]
fn deposit_scenario_bytes() {
    let data = instruction::DepositEcosystem { amount: 500_000 }.data().unwrap();

    assert_eq!(hex::encode_upper(&data), "B1C141B48837B22B20A1070000000000");
}

#[test]
fn discriminators_are_distinct() {
    let all = [
        INITIALIZE_DISCRIMINATOR,
        CREATE_ECOSYSTEM_DISCRIMINATOR,
        DEPOSIT_ECOSYSTEM_DISCRIMINATOR,
        ADD_APPROVER_DISCRIMINATOR,
        REMOVE_APPROVER_DISCRIMINATOR,
        CREATE_WITHDRAWAL_REQUEST_DISCRIMINATOR,
        APPROVE_WITHDRAWAL_REQUEST_DISCRIMINATOR,
    ];
    for (i, a) in all.iter().enumerate() {
        for b in &all[i + 1..] {
            assert_ne!(a, b);
        }
    }
}

#[test]
fn deposit_account_order_holds_for_many_inputs() {
    let finder = AddressFinder::default();

    for _ in 0..16 {
        let payer = Pubkey::new_unique();
        let mint = Pubkey::new_unique();
        let collateral_account = Pubkey::new_unique();
        let metadata = AccountMetadata {
            collateral_token_mint: Some(Pubkey::new_unique()),
            collateral_token_program: Some(SPL_TOKEN_PROGRAM_ID),
            ecosystem_token_program: Some(TOKEN_2022_PROGRAM_ID),
            user_ecosystem_token_account: Some(Pubkey::new_unique()),
            ..Default::default()
        };

        let (ix, ix_accounts, _) =
            build_deposit_ecosystem_ix(&finder, payer, mint, collateral_account, &metadata, 1)
                .unwrap();

        assert_eq!(ix.accounts, ix_accounts.to_account_metas());
        assert_eq!(ix.accounts.len(), 12);

        let signer_flags: Vec<bool> = ix.accounts.iter().map(|m| m.is_signer).collect();
        let writable_flags: Vec<bool> = ix.accounts.iter().map(|m| m.is_writable).collect();
        assert_eq!(
            signer_flags,
            vec![true, false, false, false, false, false, false, false, false, false, false, false]
        );
        assert_eq!(
            writable_flags,
            vec![true, false, true, false, true, true, false, true, true, true, false, false]
        );
        assert_eq!(ix.accounts[7].pubkey, collateral_account);
    }
}

#[test]
fn initialize_is_discriminator_only() {
    let finder = AddressFinder::default();
    let payer = Pubkey::new_unique();

    let (ix, _, _) = build_initialize_ix(&finder, payer).unwrap();

    assert_eq!(ix.data, INITIALIZE_DISCRIMINATOR.to_vec());
    assert_eq!(ix.accounts[0].pubkey, finder.find_config_address().unwrap().0);
    assert!(ix.accounts[0].is_writable);
    assert!(ix.accounts[1].is_signer);
}
