use crate::error::CliResult;
use ecosystem_client::{CreateTokenAccountResult, EcosystemClient};
use solana_sdk::{pubkey::Pubkey, signature::Keypair};

pub async fn execute(
    client: &EcosystemClient,
    payer: &Keypair,
    mint: &Pubkey,
) -> CliResult<CreateTokenAccountResult> {
    println!("🪙 Creating token account for mint {}...", mint);

    let result = client.create_token_account(payer, mint).await?;

    println!("📍 Token account: {}", result.token_account);
    match result.signature {
        Some(signature) => println!("✅ Token account created: {}", signature),
        None => println!("ℹ️  Token account already exists"),
    }

    Ok(result)
}
