use crate::{
    SdkError, SdkResult, COLLATERAL_VAULT_SEED, CONFIG_SEED, ECOSYSTEM_CONFIG_SEED,
    ECOSYSTEM_PROGRAM_ID, FEE_VAULT_AUTHORITY_SEED, FEE_VAULT_SEED, MERCHANT_BALANCE_SEED,
    MINT_AUTHORITY_SEED, TOKEN_2022_PROGRAM_ID, VAULT_SEED, WITHDRAWAL_REQUEST_SEED,
};
use solana_sdk::{
    pubkey::{Pubkey, MAX_SEEDS, MAX_SEED_LEN},
    system_program::ID as SYSTEM_PROGRAM_ID,
    sysvar::rent::ID as RENT_ID,
};
use spl_associated_token_account::{
    get_associated_token_address_with_program_id, ID as ASSOCIATED_TOKEN_PROGRAM_ID,
};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AddressFinder {
    pub program_id: Pubkey,

    pub associated_token_program_id: Pubkey,
    pub rent_id: Pubkey,
    pub system_program_id: Pubkey,
    pub token_program_id: Pubkey,
}

impl AddressFinder {
    pub fn new(
        program_id: Pubkey,
        associated_token_program_id: Pubkey,
        rent_id: Pubkey,
        system_program_id: Pubkey,
        token_program_id: Pubkey,
    ) -> Self {
        Self {
            program_id,
            associated_token_program_id,
            rent_id,
            system_program_id,
            token_program_id,
        }
    }

    /// Derive a program address from an ordered seed list.
    ///
    /// The seeds are passed to the program exactly as given: their order and
    /// byte encoding are part of the program's contract. Fails when the list
    /// cannot be hashed into a program address (too many seeds, or a seed
    /// longer than [`MAX_SEED_LEN`]).
    pub fn derive(&self, seeds: &[&[u8]]) -> SdkResult<(Pubkey, u8)> {
        // One slot is reserved for the bump seed.
        if seeds.len() >= MAX_SEEDS {
            return Err(SdkError::InvalidSeed(format!(
                "{} seeds given, at most {} allowed",
                seeds.len(),
                MAX_SEEDS - 1
            )));
        }
        if let Some((index, seed)) = seeds
            .iter()
            .enumerate()
            .find(|(_, seed)| seed.len() > MAX_SEED_LEN)
        {
            return Err(SdkError::InvalidSeed(format!(
                "seed {} is {} bytes, at most {} allowed",
                index,
                seed.len(),
                MAX_SEED_LEN
            )));
        }

        Pubkey::try_find_program_address(seeds, &self.program_id)
            .ok_or_else(|| SdkError::InvalidSeed("no viable bump seed".to_string()))
    }

    pub fn program_id(&self) -> &Pubkey {
        &self.program_id
    }

    pub fn find_config_address(&self) -> SdkResult<(Pubkey, u8)> {
        self.derive(&[CONFIG_SEED])
    }

    pub fn find_mint_authority_address(&self, mint: &Pubkey) -> SdkResult<(Pubkey, u8)> {
        self.derive(&[MINT_AUTHORITY_SEED, mint.as_ref()])
    }

    pub fn find_ecosystem_config_address(&self, mint: &Pubkey) -> SdkResult<(Pubkey, u8)> {
        self.derive(&[ECOSYSTEM_CONFIG_SEED, mint.as_ref()])
    }

    pub fn find_fee_vault_authority_address(&self, mint: &Pubkey) -> SdkResult<(Pubkey, u8)> {
        self.derive(&[FEE_VAULT_AUTHORITY_SEED, mint.as_ref()])
    }

    pub fn find_fee_vault_address(&self, mint: &Pubkey) -> SdkResult<(Pubkey, u8)> {
        self.derive(&[FEE_VAULT_SEED, mint.as_ref()])
    }

    pub fn find_collateral_vault_address(&self, mint: &Pubkey) -> SdkResult<(Pubkey, u8)> {
        self.derive(&[COLLATERAL_VAULT_SEED, mint.as_ref()])
    }

    /// Withdrawal requests are keyed by merchant and ecosystem config, not by mint.
    pub fn find_withdrawal_request_address(
        &self,
        merchant: &Pubkey,
        ecosystem_config: &Pubkey,
    ) -> SdkResult<(Pubkey, u8)> {
        self.derive(&[
            WITHDRAWAL_REQUEST_SEED,
            merchant.as_ref(),
            ecosystem_config.as_ref(),
        ])
    }

    pub fn find_merchant_balance_address(
        &self,
        merchant: &Pubkey,
        ecosystem_mint: &Pubkey,
    ) -> SdkResult<(Pubkey, u8)> {
        self.derive(&[
            MERCHANT_BALANCE_SEED,
            merchant.as_ref(),
            ecosystem_mint.as_ref(),
        ])
    }

    pub fn find_vault_address(&self) -> SdkResult<(Pubkey, u8)> {
        self.derive(&[VAULT_SEED])
    }

    pub fn find_associated_token_address(
        &self,
        owner: &Pubkey,
        mint: &Pubkey,
        token_program_id: &Pubkey,
    ) -> Pubkey {
        get_associated_token_address_with_program_id(owner, mint, token_program_id)
    }
}

impl Default for AddressFinder {
    fn default() -> Self {
        Self::new(
            ECOSYSTEM_PROGRAM_ID,
            ASSOCIATED_TOKEN_PROGRAM_ID,
            RENT_ID,
            SYSTEM_PROGRAM_ID,
            TOKEN_2022_PROGRAM_ID,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_derive_is_deterministic() {
        let finder = AddressFinder::default();

        let first = finder.derive(&[CONFIG_SEED]).unwrap();
        let second = finder.derive(&[CONFIG_SEED]).unwrap();
        assert_eq!(first, second);

        let fresh = AddressFinder::default().find_config_address().unwrap();
        assert_eq!(first, fresh);
    }

    #[test]
    fn test_derive_matches_solana_derivation() {
        let finder = AddressFinder::default();
        let mint = Pubkey::new_unique();

        let expected =
            Pubkey::find_program_address(&[FEE_VAULT_SEED, mint.as_ref()], &ECOSYSTEM_PROGRAM_ID);
        assert_eq!(finder.find_fee_vault_address(&mint).unwrap(), expected);
    }

    #[test]
    fn test_seed_order_matters() {
        let finder = AddressFinder::default();
        let merchant = Pubkey::new_unique();
        let mint = Pubkey::new_unique();

        let (forward, _) = finder
            .derive(&[MERCHANT_BALANCE_SEED, merchant.as_ref(), mint.as_ref()])
            .unwrap();
        let (reversed, _) = finder
            .derive(&[MERCHANT_BALANCE_SEED, mint.as_ref(), merchant.as_ref()])
            .unwrap();
        assert_ne!(forward, reversed);
    }

    #[test]
    fn test_program_id_changes_address() {
        let other = AddressFinder {
            program_id: Pubkey::new_unique(),
            ..AddressFinder::default()
        };
        assert_ne!(
            AddressFinder::default().find_config_address().unwrap(),
            other.find_config_address().unwrap()
        );
    }

    #[test]
    fn test_rejects_oversized_seed() {
        let finder = AddressFinder::default();
        let long_seed = [7u8; MAX_SEED_LEN + 1];

        let result = finder.derive(&[CONFIG_SEED, &long_seed]);
        assert!(matches!(result, Err(SdkError::InvalidSeed(_))));
    }

    #[test]
    fn test_rejects_too_many_seeds() {
        let finder = AddressFinder::default();
        let seeds: Vec<&[u8]> = vec![b"x".as_slice(); MAX_SEEDS];

        let result = finder.derive(&seeds);
        assert!(matches!(result, Err(SdkError::InvalidSeed(_))));

        let seeds: Vec<&[u8]> = vec![b"x".as_slice(); MAX_SEEDS - 1];
        assert!(finder.derive(&seeds).is_ok());
    }

    #[test]
    fn test_derived_addresses_are_off_curve() {
        let finder = AddressFinder::default();
        let mint = Pubkey::new_unique();

        let (ecosystem_config, _) = finder.find_ecosystem_config_address(&mint).unwrap();
        assert!(!ecosystem_config.is_on_curve());
    }
}
