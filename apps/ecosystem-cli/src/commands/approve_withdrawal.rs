use crate::error::CliResult;
use ecosystem_client::{ApproveWithdrawalParams, EcosystemClient};
use solana_sdk::signature::Keypair;

pub async fn execute(
    client: &EcosystemClient,
    approver: &Keypair,
    params: &ApproveWithdrawalParams,
) -> CliResult<()> {
    println!("✍️  Approving withdrawal for merchant {}...", params.merchant);
    println!("   Merchant token account: {}", params.merchant_token_account);

    let result = client.approve_withdrawal(approver, params).await?;

    println!("✅ Withdrawal approved: {}", result.signature);
    Ok(())
}
