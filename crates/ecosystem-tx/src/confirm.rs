use crate::{
    BackoffPolicy, Commitment, ConfirmConfig, Deadline, LedgerClient, LedgerError, LedgerResult,
    RetrySchedule, TxError, TxResult, ValidityAnchor, WaitOutcome,
};
use backoff::backoff::Backoff;
use solana_sdk::signature::Signature;
use std::future::Future;
use tracing::{debug, info, warn};

/// Validity anchor fetch attempts when the node rate-limits.
const ANCHOR_FETCH_ATTEMPTS: u32 = 5;

#[derive(Debug, Clone, PartialEq)]
pub(crate) enum StatusCheck {
    Committed,
    Failed(solana_sdk::transaction::TransactionError),
    Pending,
}

/// One direct status query, interpreted against `commitment`.
pub(crate) async fn check_status(
    ledger: &dyn LedgerClient,
    signature: &Signature,
    commitment: Commitment,
) -> LedgerResult<StatusCheck> {
    Ok(match ledger.signature_status(signature).await? {
        Some(status) => match status.err {
            Some(err) => StatusCheck::Failed(err),
            None if status.satisfies(commitment) => StatusCheck::Committed,
            None => StatusCheck::Pending,
        },
        None => StatusCheck::Pending,
    })
}

/// Polls one signature until it reaches the configured commitment.
pub struct ConfirmationTracker<'a> {
    ledger: &'a dyn LedgerClient,
    config: &'a ConfirmConfig,
    deadline: Deadline,
}

impl<'a> ConfirmationTracker<'a> {
    pub fn new(ledger: &'a dyn LedgerClient, config: &'a ConfirmConfig) -> Self {
        Self {
            ledger,
            config,
            deadline: Deadline::none(),
        }
    }

    pub fn with_deadline(self, deadline: Deadline) -> Self {
        Self { deadline, ..self }
    }

    /// Resolve once `signature` reaches the configured commitment.
    ///
    /// On-ledger execution errors end tracking at once. Any other failure is
    /// retried until the attempts run out, after which one last status query
    /// decides between success and [`TxError::ConfirmationTimeout`].
    pub async fn await_confirmation(&self, signature: &Signature) -> TxResult<()> {
        let mut schedule = RetrySchedule::new(self.config.backoff, self.config.max_attempts);
        let mut last_error: Option<String> = None;

        loop {
            let attempt = schedule.attempt();
            debug!(%signature, attempt, "Confirmation attempt");

            let failure = match self.try_confirm(signature).await {
                Ok(()) => {
                    info!(%signature, attempt, commitment = %self.config.commitment, "Transaction confirmed");
                    return Ok(());
                }
                Err(TxError::DeadlineExceeded { .. }) => {
                    return self.reconcile_at_deadline(signature, attempt, last_error).await
                }
                Err(error @ TxError::ExecutionFailed { .. }) => return Err(error),
                Err(error) => error,
            };

            match schedule.next_backoff() {
                Some(delay) => {
                    warn!(
                        %signature,
                        attempt,
                        ?delay,
                        error = %failure,
                        "Confirmation attempt failed, retrying"
                    );
                    last_error = Some(failure.to_string());
                    if !self.deadline.sleep(delay).await {
                        return self.reconcile_at_deadline(signature, attempt, last_error).await;
                    }
                }
                None => return self.reconcile(signature, attempt, failure).await,
            }
        }
    }

    async fn try_confirm(&self, signature: &Signature) -> TxResult<()> {
        let commitment = self.config.commitment;

        match self
            .bounded(check_status(self.ledger, signature, commitment))
            .await??
        {
            StatusCheck::Committed => return Ok(()),
            StatusCheck::Failed(error) => {
                return Err(TxError::ExecutionFailed {
                    signature: *signature,
                    error,
                })
            }
            StatusCheck::Pending => {}
        }

        let anchor = self.fetch_anchor().await?;

        let wait = tokio::time::timeout(
            self.config.wait_timeout,
            self.ledger
                .wait_for_commitment(signature, &anchor, commitment),
        );
        match self.bounded(wait).await? {
            Ok(Ok(WaitOutcome::Committed)) => Ok(()),
            Ok(Ok(WaitOutcome::Failed(error))) => Err(TxError::ExecutionFailed {
                signature: *signature,
                error,
            }),
            Ok(Err(error)) => Err(error.into()),
            Err(_) => Err(LedgerError::WaitTimeout(self.config.wait_timeout).into()),
        }
    }

    /// Fresh anchor for the wait call only; retried while the node rate-limits.
    async fn fetch_anchor(&self) -> TxResult<ValidityAnchor> {
        let mut schedule = RetrySchedule::new(BackoffPolicy::RATE_LIMITED, ANCHOR_FETCH_ATTEMPTS);

        loop {
            match self
                .bounded(self.ledger.latest_anchor(self.config.commitment))
                .await?
            {
                Ok(anchor) => return Ok(anchor),
                Err(error) if error.is_rate_limited() => match schedule.next_backoff() {
                    Some(delay) => {
                        warn!(
                            attempt = schedule.attempt() - 1,
                            ?delay,
                            "Rate limited fetching blockhash, backing off"
                        );
                        self.bounded(tokio::time::sleep(delay)).await?;
                    }
                    None => return Err(error.into()),
                },
                Err(error) => return Err(error.into()),
            }
        }
    }

    /// Final direct status check after the last failed attempt.
    async fn reconcile(&self, signature: &Signature, attempts: u32, failure: TxError) -> TxResult<()> {
        let status = match self
            .deadline
            .run(check_status(self.ledger, signature, self.config.commitment))
            .await
        {
            Some(status) => status,
            None => {
                return self
                    .reconcile_at_deadline(signature, attempts, Some(failure.to_string()))
                    .await
            }
        };

        match status {
            Ok(StatusCheck::Committed) => {
                info!(%signature, attempts, "Transaction confirmed on final status check");
                Ok(())
            }
            Ok(StatusCheck::Failed(error)) => Err(TxError::ExecutionFailed {
                signature: *signature,
                error,
            }),
            Ok(StatusCheck::Pending) | Err(_) => {
                warn!(%signature, attempts, error = %failure, "Transaction not confirmed");
                Err(TxError::ConfirmationTimeout {
                    signature: *signature,
                    attempts,
                    last_error: failure.to_string(),
                })
            }
        }
    }

    /// One status query past the deadline, so a transaction that landed
    /// while tracking was cut short still reports success.
    async fn reconcile_at_deadline(
        &self,
        signature: &Signature,
        attempts: u32,
        last_error: Option<String>,
    ) -> TxResult<()> {
        match check_status(self.ledger, signature, self.config.commitment).await {
            Ok(StatusCheck::Committed) => {
                info!(%signature, attempts, "Transaction confirmed after the deadline");
                Ok(())
            }
            Ok(StatusCheck::Failed(error)) => Err(TxError::ExecutionFailed {
                signature: *signature,
                error,
            }),
            Ok(StatusCheck::Pending) | Err(_) => {
                warn!(%signature, attempts, "Confirmation deadline exceeded");
                Err(TxError::DeadlineExceeded {
                    attempts,
                    last_error,
                })
            }
        }
    }

    /// The attempt count is filled in by the caller on reconciliation.
    async fn bounded<F: Future>(&self, future: F) -> TxResult<F::Output> {
        self.deadline
            .run(future)
            .await
            .ok_or(TxError::DeadlineExceeded {
                attempts: 0,
                last_error: None,
            })
    }
}
