/*!
# Ecosystem Client

Operation drivers for the ecosystem program, built on the pure SDK and the
transaction submission engine.

## Purpose

Each driver validates its inputs, reads the ledger metadata its instruction
needs (token program ownership, the payer's token accounts, existing
configuration), builds the unsigned transaction, signs it exactly once and
hands it to [`ecosystem_tx::TxSubmitter`]. The drivers never retry on their
own: every retry, backoff and confirmation decision is made by the engine,
configured through the client's [`SubmitConfig`].

Failures from the engine are passed through unchanged inside
[`ClientError::Operation`], tagged with the operation name.

## Usage

```rust,no_run
use ecosystem_client::{ClientResult, Commitment, DepositParams, EcosystemClient};
use solana_sdk::{pubkey::Pubkey, signature::Keypair};

async fn example(payer: Keypair, mint: Pubkey, collateral: Pubkey) -> ClientResult<()> {
    let client = EcosystemClient::new_with_rpc_url(
        "https://api.devnet.solana.com".to_string(),
        Commitment::Confirmed,
    );

    client.initialize(&payer).await?;

    let result = client
        .deposit(
            &payer,
            &DepositParams {
                ecosystem_mint: mint,
                user_collateral_account: collateral,
                amount: 1_000_000,
            },
        )
        .await?;
    println!("Deposited in {}", result.signature);

    Ok(())
}
```
*/

pub mod client;
pub mod errors;
pub mod types;

// Re-export main types for convenience
pub use client::EcosystemClient;
pub use errors::{ClientError, ClientResult};
pub use types::{
    ApproveWithdrawalParams, BalanceReport, BalanceState, CreateEcosystemParams,
    CreateEcosystemResult, CreateTokenAccountResult, DepositParams, DepositResult,
    InitializeResult, OperationResult, WithdrawalRequestResult,
};

pub use ecosystem_tx::{Commitment, SubmitConfig};
