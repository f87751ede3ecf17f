use ecosystem_client::{ClientError, EcosystemClient, SubmitConfig};
use ecosystem_tx::{
    testing::{ScriptedLedger, ScriptedWait},
    Commitment, LedgerError, SignatureStatus, TxError, WaitOutcome,
};
use solana_sdk::{
    instruction::InstructionError, pubkey::Pubkey, signature::Keypair,
    transaction::TransactionError,
};
use std::{sync::Arc, time::Duration};

#[tokio::test(start_paused = true)]
async fn driver_resubmits_identical_payload_until_accepted() {
    let ledger = Arc::new(ScriptedLedger::new());
    ledger.push_broadcast(Err(LedgerError::Rpc("connection reset by peer".to_string())));
    ledger.push_broadcast(Err(LedgerError::Rpc("503 Service Unavailable".to_string())));
    let client = EcosystemClient::new(ledger.clone());

    let started = tokio::time::Instant::now();
    let result = client
        .remove_approver(&Keypair::new(), &Pubkey::new_unique())
        .await
        .unwrap();

    let broadcasts = ledger.broadcasts();
    assert_eq!(broadcasts.len(), 3);
    assert!(broadcasts.windows(2).all(|pair| pair[0] == pair[1]));
    assert_eq!(ledger.anchor_calls(), 2, "one anchor to sign, one to confirm");
    assert!(started.elapsed() >= Duration::from_millis(6_000));

    let tx: solana_sdk::transaction::Transaction = bincode::deserialize(&broadcasts[0]).unwrap();
    assert_eq!(result.signature, tx.signatures[0]);
}

#[tokio::test]
async fn driver_surfaces_execution_error_without_retry() {
    let ledger = Arc::new(ScriptedLedger::new());
    let on_ledger = TransactionError::InstructionError(0, InstructionError::Custom(6001));
    ledger.push_wait(ScriptedWait::Respond(Ok(WaitOutcome::Failed(on_ledger.clone()))));
    let client = EcosystemClient::new(ledger.clone()).with_submit_config(SubmitConfig::fast());

    let error = client
        .add_approver(&Keypair::new(), &Pubkey::new_unique())
        .await
        .unwrap_err();

    match error.tx_error() {
        Some(TxError::ExecutionFailed { error, .. }) => assert_eq!(error, &on_ledger),
        other => panic!("unexpected error: {other:?}"),
    }
    assert!(matches!(error, ClientError::Operation { operation: "add_approver", .. }));
    assert_eq!(ledger.broadcast_calls(), 1);
}

#[tokio::test]
async fn driver_treats_already_processed_as_landed() {
    let ledger = Arc::new(ScriptedLedger::new());
    ledger.push_broadcast(Err(LedgerError::Rpc("Transaction already processed".to_string())));
    ledger.push_status(Ok(Some(SignatureStatus {
        commitment: Some(Commitment::Confirmed),
        err: None,
    })));
    let client = EcosystemClient::new(ledger.clone());

    let result = client
        .add_approver(&Keypair::new(), &Pubkey::new_unique())
        .await
        .unwrap();

    let broadcasts = ledger.broadcasts();
    assert_eq!(broadcasts.len(), 1);
    assert_eq!(ledger.status_calls(), 1);
    assert_eq!(ledger.wait_calls(), 0);

    let tx: solana_sdk::transaction::Transaction = bincode::deserialize(&broadcasts[0]).unwrap();
    assert_eq!(result.signature, tx.signatures[0]);
}
