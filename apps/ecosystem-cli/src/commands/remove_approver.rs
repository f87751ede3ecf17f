use crate::error::CliResult;
use ecosystem_client::EcosystemClient;
use solana_sdk::{pubkey::Pubkey, signature::Keypair};

pub async fn execute(client: &EcosystemClient, payer: &Keypair, approver: &Pubkey) -> CliResult<()> {
    println!("➖ Removing approver {}...", approver);

    let result = client.remove_approver(payer, approver).await?;

    println!("✅ Approver removed: {}", result.signature);
    Ok(())
}
