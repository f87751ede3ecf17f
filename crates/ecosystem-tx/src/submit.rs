use crate::{
    classify::{classify, ErrorClass, TerminalKind},
    confirm::{check_status, StatusCheck},
    ConfirmationTracker, Deadline, LedgerClient, LedgerError, RetrySchedule, SignedTransaction,
    SubmitConfig, TxError, TxResult,
};
use backoff::backoff::Backoff;
use solana_sdk::signature::Signature;
use std::{sync::Arc, time::Duration};
use tracing::{debug, info, warn};

/// Transient state of one submit call.
#[derive(Debug, Default)]
pub struct AttemptRecord {
    pub attempt: u32,
    pub elapsed_backoff: Duration,
    pub last_error: Option<TxError>,
}

/// Broadcasts a signed payload until it is confirmed or definitively fails.
#[derive(Clone)]
pub struct TxSubmitter {
    ledger: Arc<dyn LedgerClient>,
}

impl TxSubmitter {
    pub fn new(ledger: Arc<dyn LedgerClient>) -> Self {
        Self { ledger }
    }

    pub fn ledger(&self) -> &Arc<dyn LedgerClient> {
        &self.ledger
    }

    /// Submit `payload` and wait for the configured commitment.
    ///
    /// The payload bytes are broadcast unchanged on every attempt. Terminal
    /// rejections and on-ledger execution errors end the call at once;
    /// everything else, including a confirmation timeout, is retried under
    /// `config.backoff` until `config.max_retries` attempts have been made.
    pub async fn submit(
        &self,
        payload: &SignedTransaction,
        config: &SubmitConfig,
    ) -> TxResult<Signature> {
        config.validate()?;

        let deadline = Deadline::after(config.deadline);
        let broadcast_config = config.broadcast_config();
        let tracker = ConfirmationTracker::new(self.ledger.as_ref(), &config.confirmation)
            .with_deadline(deadline);
        let mut schedule = RetrySchedule::new(config.backoff, config.max_retries);
        let mut record = AttemptRecord::default();

        loop {
            record.attempt = schedule.attempt();
            debug!(
                attempt = record.attempt,
                signature = %payload.signature(),
                bytes = payload.bytes().len(),
                "Broadcasting transaction"
            );

            let error = match deadline
                .run(self.ledger.broadcast(payload.bytes(), &broadcast_config))
                .await
            {
                None => return self.deadline_exceeded(payload, config, record).await,
                Some(Ok(signature)) => match tracker.await_confirmation(&signature).await {
                    Ok(()) => {
                        info!(
                            %signature,
                            attempts = record.attempt,
                            "Transaction submitted"
                        );
                        return Ok(signature);
                    }
                    Err(error @ TxError::ExecutionFailed { .. }) => return Err(error),
                    // the tracker already made the final status check
                    Err(TxError::DeadlineExceeded { last_error, .. }) => {
                        warn!(%signature, attempts = record.attempt, "Submission deadline exceeded");
                        return Err(TxError::DeadlineExceeded {
                            attempts: record.attempt,
                            last_error: last_error
                                .or_else(|| record.last_error.map(|error| error.to_string())),
                        });
                    }
                    Err(error) => error,
                },
                Some(Err(error)) => match classify(&error.to_string()) {
                    ErrorClass::Terminal(kind) => {
                        return self.reconcile_rejection(payload, config, kind, error).await
                    }
                    ErrorClass::Retryable(cause) => {
                        debug!(attempt = record.attempt, ?cause, "Broadcast failed");
                        TxError::Ledger(error)
                    }
                },
            };

            match schedule.next_backoff() {
                Some(delay) => {
                    warn!(
                        attempt = record.attempt,
                        ?delay,
                        error = %error,
                        "Submission attempt failed, retrying"
                    );
                    record.last_error = Some(error);
                    if !deadline.sleep(delay).await {
                        return self.deadline_exceeded(payload, config, record).await;
                    }
                    record.elapsed_backoff += delay;
                }
                None => {
                    warn!(attempts = record.attempt, error = %error, "Submission retries exhausted");
                    return Err(TxError::RetriesExhausted {
                        attempts: record.attempt,
                        last_error: Box::new(error),
                    });
                }
            }
        }
    }

    /// A terminal rejection may be the node refusing a duplicate of a
    /// transaction that already landed, so the payload's own signature is
    /// checked once before failing.
    async fn reconcile_rejection(
        &self,
        payload: &SignedTransaction,
        config: &SubmitConfig,
        kind: TerminalKind,
        error: LedgerError,
    ) -> TxResult<Signature> {
        let signature = payload.signature();

        match check_status(self.ledger.as_ref(), &signature, config.confirmation.commitment).await
        {
            Ok(StatusCheck::Committed) => {
                info!(%signature, %kind, "Rejected broadcast already landed");
                Ok(signature)
            }
            Ok(StatusCheck::Failed(error)) => Err(TxError::ExecutionFailed { signature, error }),
            Ok(StatusCheck::Pending) | Err(_) => {
                warn!(%signature, %kind, error = %error, "Transaction rejected");
                Err(TxError::Rejected {
                    kind,
                    message: error.to_string(),
                })
            }
        }
    }

    async fn deadline_exceeded(
        &self,
        payload: &SignedTransaction,
        config: &SubmitConfig,
        record: AttemptRecord,
    ) -> TxResult<Signature> {
        let signature = payload.signature();

        match check_status(self.ledger.as_ref(), &signature, config.confirmation.commitment).await
        {
            Ok(StatusCheck::Committed) => {
                info!(%signature, "Transaction landed before the deadline check");
                Ok(signature)
            }
            Ok(StatusCheck::Failed(error)) => Err(TxError::ExecutionFailed { signature, error }),
            Ok(StatusCheck::Pending) | Err(_) => {
                warn!(
                    %signature,
                    attempts = record.attempt,
                    elapsed_backoff = ?record.elapsed_backoff,
                    "Submission deadline exceeded"
                );
                Err(TxError::DeadlineExceeded {
                    attempts: record.attempt,
                    last_error: record.last_error.map(|error| error.to_string()),
                })
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        testing::{ScriptedLedger, ScriptedWait},
        BackoffPolicy, Commitment, ConfirmConfig, SignatureStatus, ValidityAnchor, WaitOutcome,
    };
    use solana_sdk::{
        hash::Hash,
        instruction::InstructionError,
        message::Message,
        pubkey::Pubkey,
        signature::Keypair,
        signer::Signer,
        system_instruction,
        transaction::{Transaction, TransactionError},
    };
    use tokio::time::Instant;
    use tokio_test::assert_ok;

    fn signed_payload() -> SignedTransaction {
        let payer = Keypair::new();
        let ix = system_instruction::transfer(&payer.pubkey(), &Pubkey::new_unique(), 42);
        let tx = Transaction::new_unsigned(Message::new(&[ix], Some(&payer.pubkey())));
        let anchor = ValidityAnchor {
            blockhash: Hash::new_unique(),
            last_valid_block_height: 300,
        };
        SignedTransaction::sign(tx, &[&payer], anchor).unwrap()
    }

    fn transient() -> LedgerError {
        LedgerError::Rpc("error sending request: connection reset by peer".into())
    }

    fn submitter(ledger: &Arc<ScriptedLedger>) -> TxSubmitter {
        TxSubmitter::new(ledger.clone())
    }

    #[tokio::test(start_paused = true)]
    async fn test_succeeds_on_third_attempt_after_backoff() {
        let ledger = Arc::new(ScriptedLedger::new());
        let payload = signed_payload();
        ledger.push_broadcast(Err(transient()));
        ledger.push_broadcast(Err(transient()));
        ledger.push_broadcast(Ok(payload.signature()));

        let start = Instant::now();
        let signature = submitter(&ledger)
            .submit(&payload, &SubmitConfig::standard())
            .await
            .unwrap();

        assert_eq!(signature, payload.signature());
        assert_eq!(ledger.broadcast_calls(), 3);
        // 2000ms after attempt 1, 4000ms after attempt 2
        let elapsed = start.elapsed();
        assert!(elapsed >= Duration::from_millis(6_000));
        assert!(elapsed < Duration::from_millis(6_100));
    }

    #[tokio::test(start_paused = true)]
    async fn test_retries_resend_identical_bytes() {
        let ledger = Arc::new(ScriptedLedger::new());
        let payload = signed_payload();
        for _ in 0..4 {
            ledger.push_broadcast(Err(transient()));
        }

        submitter(&ledger)
            .submit(&payload, &SubmitConfig::standard())
            .await
            .unwrap();

        let sent = ledger.broadcasts();
        assert_eq!(sent.len(), 5);
        assert!(sent.iter().all(|bytes| bytes.as_slice() == payload.bytes()));
    }

    #[tokio::test(start_paused = true)]
    async fn test_terminal_error_makes_one_attempt() {
        let ledger = Arc::new(ScriptedLedger::new());
        let payload = signed_payload();
        ledger.push_broadcast(Err(LedgerError::Rpc(
            "Transaction simulation failed: Error processing Instruction 0: insufficient funds"
                .into(),
        )));

        let error = submitter(&ledger)
            .submit(&payload, &SubmitConfig::standard())
            .await
            .unwrap_err();

        assert!(matches!(
            error,
            TxError::Rejected {
                kind: TerminalKind::InsufficientFunds,
                ..
            }
        ));
        assert_eq!(ledger.broadcast_calls(), 1);
        assert_eq!(ledger.wait_calls(), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_already_processed_reconciles_to_success() {
        let ledger = Arc::new(ScriptedLedger::new());
        let payload = signed_payload();
        ledger.push_broadcast(Err(LedgerError::Rpc("Transaction already processed".into())));
        ledger.push_status(Ok(Some(SignatureStatus {
            commitment: Some(Commitment::Finalized),
            err: None,
        })));

        let signature = submitter(&ledger)
            .submit(&payload, &SubmitConfig::standard())
            .await
            .unwrap();

        assert_eq!(signature, payload.signature());
        assert_eq!(ledger.broadcast_calls(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_exhaustion_reports_attempts_and_cause() {
        let ledger = Arc::new(ScriptedLedger::new());
        let payload = signed_payload();
        for _ in 0..3 {
            ledger.push_broadcast(Err(transient()));
        }
        let config = SubmitConfig::fast().with_max_retries(3);

        let start = Instant::now();
        let error = submitter(&ledger).submit(&payload, &config).await.unwrap_err();

        assert_eq!(
            error,
            TxError::RetriesExhausted {
                attempts: 3,
                last_error: Box::new(TxError::Ledger(transient())),
            }
        );
        // fast mode: 1000ms then 2000ms
        assert!(start.elapsed() < Duration::from_millis(3_100));
        assert_eq!(ledger.broadcast_calls(), 3);
    }

    #[tokio::test(start_paused = true)]
    async fn test_confirmation_timeout_rebroadcasts() {
        let ledger = Arc::new(ScriptedLedger::new());
        let payload = signed_payload();
        let config = SubmitConfig {
            confirmation: ConfirmConfig {
                max_attempts: 1,
                wait_timeout: Duration::from_secs(1),
                ..ConfirmConfig::standard()
            },
            ..SubmitConfig::standard()
        };
        ledger.push_wait(ScriptedWait::Hang);

        assert_ok!(submitter(&ledger).submit(&payload, &config).await);

        assert_eq!(ledger.broadcast_calls(), 2);
        assert!(ledger
            .broadcasts()
            .iter()
            .all(|bytes| bytes.as_slice() == payload.bytes()));
    }

    #[tokio::test(start_paused = true)]
    async fn test_execution_failure_is_not_retried() {
        let ledger = Arc::new(ScriptedLedger::new());
        let payload = signed_payload();
        let failure = TransactionError::InstructionError(1, InstructionError::Custom(6000));
        ledger.push_wait(ScriptedWait::Respond(Ok(WaitOutcome::Failed(failure.clone()))));

        let error = submitter(&ledger)
            .submit(&payload, &SubmitConfig::standard())
            .await
            .unwrap_err();

        assert_eq!(
            error,
            TxError::ExecutionFailed {
                signature: payload.signature(),
                error: failure,
            }
        );
        assert_eq!(ledger.broadcast_calls(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_deadline_bounds_whole_call() {
        let ledger = Arc::new(ScriptedLedger::new());
        let payload = signed_payload();
        for _ in 0..5 {
            ledger.push_broadcast(Err(transient()));
        }
        let config = SubmitConfig::standard().with_deadline(Duration::from_secs(5));

        let start = Instant::now();
        let error = submitter(&ledger).submit(&payload, &config).await.unwrap_err();

        assert!(matches!(error, TxError::DeadlineExceeded { attempts: 2, .. }));
        assert!(start.elapsed() <= Duration::from_millis(5_010));
        // final status check after expiry
        assert_eq!(ledger.status_calls(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_deadline_expiry_reconciles_landed_transaction() {
        let ledger = Arc::new(ScriptedLedger::new());
        let payload = signed_payload();
        ledger.push_broadcast(Err(transient()));
        ledger.push_status(Ok(Some(SignatureStatus {
            commitment: Some(Commitment::Confirmed),
            err: None,
        })));
        let config = SubmitConfig::standard().with_deadline(Duration::from_secs(1));

        let signature = submitter(&ledger).submit(&payload, &config).await.unwrap();
        assert_eq!(signature, payload.signature());
    }

    #[tokio::test(start_paused = true)]
    async fn test_deadline_during_confirmation_checks_status_once() {
        let ledger = Arc::new(ScriptedLedger::new());
        let payload = signed_payload();
        ledger.push_wait(ScriptedWait::Hang);
        let config = SubmitConfig::standard().with_deadline(Duration::from_secs(5));

        let error = submitter(&ledger).submit(&payload, &config).await.unwrap_err();

        assert!(matches!(error, TxError::DeadlineExceeded { attempts: 1, .. }));
        assert_eq!(ledger.broadcast_calls(), 1);
        // the confirmation attempt plus the check at the deadline
        assert_eq!(ledger.status_calls(), 2);
    }

    #[tokio::test]
    async fn test_zero_retries_rejected_before_broadcast() {
        let ledger = Arc::new(ScriptedLedger::new());
        let config = SubmitConfig {
            max_retries: 0,
            backoff: BackoffPolicy::FAST,
            ..SubmitConfig::standard()
        };

        let error = submitter(&ledger)
            .submit(&signed_payload(), &config)
            .await
            .unwrap_err();

        assert!(matches!(error, TxError::Config(_)));
        assert_eq!(ledger.broadcast_calls(), 0);
    }
}
