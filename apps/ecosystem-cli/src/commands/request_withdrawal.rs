use crate::error::CliResult;
use ecosystem_client::EcosystemClient;
use solana_sdk::{pubkey::Pubkey, signature::Keypair};

pub async fn execute(
    client: &EcosystemClient,
    payer: &Keypair,
    ecosystem_mint: &Pubkey,
    merchant: Option<Pubkey>,
) -> CliResult<()> {
    println!("📤 Creating withdrawal request for ecosystem {}...", ecosystem_mint);

    let result = client
        .request_withdrawal(payer, ecosystem_mint, merchant)
        .await?;

    println!("✅ Withdrawal request created: {}", result.signature);
    println!("   Withdrawal request: {}", result.withdrawal_request);
    println!("   Merchant balance: {}", result.merchant_balance);
    Ok(())
}
