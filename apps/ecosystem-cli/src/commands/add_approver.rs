use crate::error::CliResult;
use ecosystem_client::EcosystemClient;
use solana_sdk::{pubkey::Pubkey, signature::Keypair};

pub async fn execute(client: &EcosystemClient, payer: &Keypair, approver: &Pubkey) -> CliResult<()> {
    println!("➕ Adding approver {}...", approver);

    let result = client.add_approver(payer, approver).await?;

    println!("✅ Approver added: {}", result.signature);
    Ok(())
}
