/*!
# Ecosystem Transaction Submission

Gets one signed transaction durably committed: broadcast with retry and
backoff, error classification, confirmation polling raced against a
timeout, and a final status reconciliation before any failure is reported.

The payload is signed once, against one validity anchor, and the resulting
bytes are resubmitted unchanged on every attempt.

## Quick Start

```rust,no_run
use ecosystem_tx::{
    Commitment, LedgerClient, RpcLedger, SignedTransaction, SubmitConfig, TxSubmitter,
};
use solana_client::nonblocking::rpc_client::RpcClient;
use solana_sdk::{signature::Keypair, transaction::Transaction};
use std::sync::Arc;

# async fn example(unsigned: Transaction, payer: Keypair) -> Result<(), Box<dyn std::error::Error>> {
let rpc_client = Arc::new(RpcClient::new("https://api.devnet.solana.com".to_string()));
let ledger = Arc::new(RpcLedger::new(rpc_client));

let anchor = ledger.latest_anchor(Commitment::Confirmed).await?;
let payload = SignedTransaction::sign(unsigned, &[&payer], anchor)?;

let submitter = TxSubmitter::new(ledger);
let signature = submitter.submit(&payload, &SubmitConfig::standard()).await?;
println!("Confirmed {}", signature);
# Ok(())
# }
```
*/

pub mod classify;
mod config;
mod confirm;
mod deadline;
mod error;
mod ledger;
mod retry;
mod rpc;
mod signed;
mod submit;

#[cfg(any(test, feature = "testing"))]
pub mod testing;

pub use classify::{classify, ErrorClass, RetryCause, TerminalKind};
pub use config::{ConfirmConfig, SubmitConfig};
pub use confirm::ConfirmationTracker;
pub use deadline::Deadline;
pub use error::{LedgerError, LedgerResult, TxError, TxResult};
pub use ledger::{
    BroadcastConfig, Commitment, LedgerClient, SignatureStatus, ValidityAnchor, WaitOutcome,
};
pub use retry::{BackoffPolicy, RetrySchedule};
pub use rpc::RpcLedger;
pub use signed::SignedTransaction;
pub use submit::{AttemptRecord, TxSubmitter};

// Re-export key Solana types for convenience
pub use solana_client::nonblocking::rpc_client::RpcClient;
pub use solana_sdk::{signature::Signature, transaction::TransactionError};
