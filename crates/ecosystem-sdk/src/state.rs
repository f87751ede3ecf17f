use crate::{SdkError, SdkResult};
use solana_sdk::pubkey::Pubkey;

/// Per-merchant balance held by the program for one ecosystem mint.
///
/// Layout after the 8-byte account discriminator: merchant (32),
/// balance (u64 LE), ecosystem mint (32).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MerchantBalance {
    pub merchant: Pubkey,
    pub balance: u64,
    pub ecosystem_mint: Pubkey,
}

impl MerchantBalance {
    pub const LEN: usize = 8 + 32 + 8 + 32;

    pub fn try_from_bytes(data: &[u8]) -> SdkResult<Self> {
        if data.len() < Self::LEN {
            return Err(SdkError::InvalidAccountData(format!(
                "merchant balance needs {} bytes, got {}",
                Self::LEN,
                data.len()
            )));
        }

        let merchant = read_pubkey(&data[8..40])?;
        let mut balance = [0u8; 8];
        balance.copy_from_slice(&data[40..48]);
        let ecosystem_mint = read_pubkey(&data[48..80])?;

        Ok(Self {
            merchant,
            balance: u64::from_le_bytes(balance),
            ecosystem_mint,
        })
    }
}

/// Mint recorded in the first 32 bytes of an SPL token account.
pub fn token_account_mint(data: &[u8]) -> SdkResult<Pubkey> {
    if data.len() < 32 {
        return Err(SdkError::InvalidAccountData(format!(
            "token account data is {} bytes, expected at least 32",
            data.len()
        )));
    }
    read_pubkey(&data[..32])
}

/// Token amount of an SPL token account: owner sits at 32..64, amount at 64..72.
pub fn token_account_amount(data: &[u8]) -> SdkResult<u64> {
    let bytes = data.get(64..72).ok_or_else(|| {
        SdkError::InvalidAccountData(format!(
            "token account data is {} bytes, expected at least 72",
            data.len()
        ))
    })?;
    let mut amount = [0u8; 8];
    amount.copy_from_slice(bytes);
    Ok(u64::from_le_bytes(amount))
}

fn read_pubkey(bytes: &[u8]) -> SdkResult<Pubkey> {
    Pubkey::try_from(bytes).map_err(|e| SdkError::InvalidAccountData(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_merchant_balance() {
        let merchant = Pubkey::new_unique();
        let mint = Pubkey::new_unique();
        let mut data = vec![0xAA; 8];
        data.extend_from_slice(merchant.as_ref());
        data.extend_from_slice(&42_000u64.to_le_bytes());
        data.extend_from_slice(mint.as_ref());

        let decoded = MerchantBalance::try_from_bytes(&data).unwrap();
        assert_eq!(decoded.merchant, merchant);
        assert_eq!(decoded.balance, 42_000);
        assert_eq!(decoded.ecosystem_mint, mint);
    }

    #[test]
    fn test_short_merchant_balance_is_rejected() {
        let data = vec![0u8; 72];
        assert!(matches!(
            MerchantBalance::try_from_bytes(&data),
            Err(SdkError::InvalidAccountData(_))
        ));
    }

    #[test]
    fn test_token_account_mint() {
        let mint = Pubkey::new_unique();
        let mut data = mint.to_bytes().to_vec();
        data.extend_from_slice(&[0u8; 133]);

        assert_eq!(token_account_mint(&data).unwrap(), mint);
        assert!(token_account_mint(&data[..31]).is_err());
    }

    #[test]
    fn test_token_account_amount() {
        let mut data = vec![0u8; 165];
        data[64..72].copy_from_slice(&1_500_000u64.to_le_bytes());

        assert_eq!(token_account_amount(&data).unwrap(), 1_500_000);
        assert!(token_account_amount(&data[..71]).is_err());
    }
}
