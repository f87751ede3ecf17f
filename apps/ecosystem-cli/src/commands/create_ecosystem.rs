use crate::error::CliResult;
use clap::Args;
use ecosystem_client::{CreateEcosystemParams, CreateEcosystemResult, EcosystemClient};
use ecosystem_sdk::{parse_amount, parse_unsigned, TRANSFER_HOOK_PROGRAM_ID};
use solana_sdk::{pubkey::Pubkey, signature::Keypair};

/// Ecosystem mint parameters. Numeric values are taken as text and range-checked.
#[derive(Args, Debug, Clone)]
pub struct CreateEcosystemArgs {
    /// Collateral token mint backing the ecosystem
    #[arg(long)]
    pub collateral_token_mint: Pubkey,

    /// Mint decimals
    #[arg(long, default_value = "5")]
    pub decimals: String,

    #[arg(long, default_value = "Test Ecosystem Token")]
    pub name: String,

    #[arg(long, default_value = "TEST")]
    pub symbol: String,

    /// Metadata URI (empty by default)
    #[arg(long)]
    pub uri: Option<String>,

    #[arg(long)]
    pub transfer_hook_program_id: Option<Pubkey>,

    /// Partner wallet (defaults to the payer)
    #[arg(long)]
    pub ecosystem_partner_wallet: Option<Pubkey>,

    #[arg(long, default_value = "1000000000000")]
    pub max_minting_cap: String,

    #[arg(long, default_value = "0")]
    pub withdrawal_fee_basis_points: String,

    #[arg(long, default_value = "0")]
    pub deposit_fee_basis_points: String,
}

impl CreateEcosystemArgs {
    pub fn to_params(&self) -> CliResult<CreateEcosystemParams> {
        Ok(CreateEcosystemParams {
            decimals: parse_unsigned("decimals", &self.decimals)?,
            name: self.name.clone(),
            symbol: self.symbol.clone(),
            uri: self.uri.clone().unwrap_or_default(),
            transfer_hook_program_id: self
                .transfer_hook_program_id
                .unwrap_or(TRANSFER_HOOK_PROGRAM_ID),
            ecosystem_partner_wallet: self.ecosystem_partner_wallet,
            max_minting_cap: parse_amount("max-minting-cap", &self.max_minting_cap)?,
            withdrawal_fee_basis_points: parse_unsigned(
                "withdrawal-fee-basis-points",
                &self.withdrawal_fee_basis_points,
            )?,
            deposit_fee_basis_points: parse_unsigned(
                "deposit-fee-basis-points",
                &self.deposit_fee_basis_points,
            )?,
            collateral_token_mint: self.collateral_token_mint,
        })
    }
}

pub async fn execute(
    client: &EcosystemClient,
    payer: &Keypair,
    args: &CreateEcosystemArgs,
) -> CliResult<CreateEcosystemResult> {
    let params = args.to_params()?;

    println!("🏗️  Creating ecosystem...");
    println!("   Name: {} ({})", params.name, params.symbol);
    println!("   Decimals: {}", params.decimals);
    println!("   Collateral mint: {}", params.collateral_token_mint);

    let result = client.create_ecosystem(payer, &params).await?;

    println!("✅ Ecosystem created: {}", result.signature);
    println!("   Mint: {}", result.mint);
    println!("   Ecosystem config: {}", result.ecosystem_config);
    println!("   Fee vault: {}", result.fee_vault);
    println!("   Collateral vault: {}", result.collateral_vault);

    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::CliError;
    use ecosystem_sdk::SdkError;

    fn args() -> CreateEcosystemArgs {
        CreateEcosystemArgs {
            collateral_token_mint: Pubkey::new_unique(),
            decimals: "5".to_string(),
            name: "Test Ecosystem Token".to_string(),
            symbol: "TEST".to_string(),
            uri: None,
            transfer_hook_program_id: None,
            ecosystem_partner_wallet: None,
            max_minting_cap: "1000000000000".to_string(),
            withdrawal_fee_basis_points: "0".to_string(),
            deposit_fee_basis_points: "0".to_string(),
        }
    }

    #[test]
    fn test_to_params_defaults() {
        let args = args();
        let params = args.to_params().unwrap();

        assert_eq!(params, CreateEcosystemParams::new(args.collateral_token_mint));
    }

    #[test]
    fn test_to_params_range_checks() {
        let decimals = CreateEcosystemArgs {
            decimals: "256".to_string(),
            ..args()
        };
        assert!(matches!(
            decimals.to_params(),
            Err(CliError::Argument(SdkError::ArgumentRange { name: "decimals", .. }))
        ));

        let fee = CreateEcosystemArgs {
            deposit_fee_basis_points: "-1".to_string(),
            ..args()
        };
        assert!(matches!(
            fee.to_params(),
            Err(CliError::Argument(SdkError::ArgumentRange { .. }))
        ));
    }
}
