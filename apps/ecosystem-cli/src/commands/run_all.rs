use super::{create_ecosystem, create_token_account, deposit, initialize};
use crate::{commands::create_ecosystem::CreateEcosystemArgs, error::CliResult};
use ecosystem_client::EcosystemClient;
use solana_sdk::{pubkey::Pubkey, signature::Keypair};

/// Initialize, create an ecosystem, open the payer's token account for it
/// and, when a collateral account is given, deposit into it.
///
/// Steps run strictly in order; each waits for the previous one to confirm.
pub async fn execute(
    client: &EcosystemClient,
    payer: &Keypair,
    ecosystem: &CreateEcosystemArgs,
    user_collateral_account: Option<Pubkey>,
    amount: &str,
) -> CliResult<()> {
    println!("🔄 Running all steps in sequence...\n");

    initialize::execute(client, payer).await?;

    let created = create_ecosystem::execute(client, payer, ecosystem).await?;

    create_token_account::execute(client, payer, &created.mint).await?;

    match user_collateral_account {
        Some(collateral) => {
            deposit::execute(client, payer, created.mint, collateral, amount).await?;
        }
        None => println!("\n⏭️  Skipping deposit (no --user-collateral-account)"),
    }

    Ok(())
}
