use crate::error::CliResult;
use ecosystem_client::{DepositParams, DepositResult, EcosystemClient};
use ecosystem_sdk::parse_amount;
use solana_sdk::{pubkey::Pubkey, signature::Keypair};

pub async fn execute(
    client: &EcosystemClient,
    payer: &Keypair,
    ecosystem_mint: Pubkey,
    user_collateral_account: Pubkey,
    amount: &str,
) -> CliResult<DepositResult> {
    let params = DepositParams {
        ecosystem_mint,
        user_collateral_account,
        amount: parse_amount("amount", amount)?,
    };

    println!("💰 Depositing {} into ecosystem {}...", params.amount, ecosystem_mint);
    println!("   Collateral account: {}", user_collateral_account);

    let result = client.deposit(payer, &params).await?;

    println!("✅ Deposit confirmed: {}", result.signature);
    println!("   Ecosystem token account: {}", result.user_ecosystem_token_account);
    if let Some(balance) = result.ecosystem_token_balance {
        println!("   Ecosystem token balance: {}", balance);
    }

    Ok(result)
}
