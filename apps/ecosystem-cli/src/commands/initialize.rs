use crate::error::CliResult;
use ecosystem_client::{EcosystemClient, InitializeResult};
use solana_sdk::signature::Keypair;

pub async fn execute(client: &EcosystemClient, payer: &Keypair) -> CliResult<InitializeResult> {
    println!("⚙️  Initializing config...");

    let result = client.initialize(payer).await?;

    println!("📍 Config: {}", result.config);
    match result.signature {
        Some(signature) => println!("✅ Config initialized: {}", signature),
        None => println!("ℹ️  Config already exists, nothing to do"),
    }

    Ok(result)
}
