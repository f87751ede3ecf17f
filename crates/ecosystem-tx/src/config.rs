use crate::{BackoffPolicy, BroadcastConfig, Commitment, TxError, TxResult};
use std::time::Duration;

/// Confirmation tracking for one broadcast signature
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfirmConfig {
    /// Commitment the signature has to reach
    pub commitment: Commitment,

    /// Confirmation attempts before giving up
    pub max_attempts: u32,

    /// Per-attempt bound on the ledger's wait-for-commitment call
    pub wait_timeout: Duration,

    /// Delay between confirmation attempts
    pub backoff: BackoffPolicy,
}

impl ConfirmConfig {
    pub fn standard() -> Self {
        Self {
            commitment: Commitment::Confirmed,
            max_attempts: 8,
            wait_timeout: Duration::from_secs(45),
            backoff: BackoffPolicy::CONFIRMATION,
        }
    }

    pub fn fast() -> Self {
        Self {
            max_attempts: 3,
            ..Self::standard()
        }
    }
}

impl Default for ConfirmConfig {
    fn default() -> Self {
        Self::standard()
    }
}

/// Settings for one submit call.
///
/// Values are immutable once handed to the engine; derive variants with
/// struct update syntax or the `with_*` helpers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmitConfig {
    /// Broadcast attempts, including the first
    pub max_retries: u32,

    /// Delay between broadcast attempts
    pub backoff: BackoffPolicy,

    /// Whether to skip preflight simulation on the node
    pub skip_preflight: bool,

    /// Commitment used for preflight simulation
    pub preflight_commitment: Commitment,

    pub confirmation: ConfirmConfig,

    /// Bound on total wall-clock time across all broadcast and confirmation attempts
    pub deadline: Option<Duration>,
}

impl SubmitConfig {
    pub fn standard() -> Self {
        Self {
            max_retries: 5,
            backoff: BackoffPolicy::STANDARD,
            skip_preflight: false,
            preflight_commitment: Commitment::Confirmed,
            confirmation: ConfirmConfig::standard(),
            deadline: None,
        }
    }

    pub fn fast() -> Self {
        Self {
            backoff: BackoffPolicy::FAST,
            confirmation: ConfirmConfig::fast(),
            ..Self::standard()
        }
    }

    pub fn with_deadline(self, deadline: Duration) -> Self {
        Self {
            deadline: Some(deadline),
            ..self
        }
    }

    pub fn with_max_retries(self, max_retries: u32) -> Self {
        Self {
            max_retries,
            ..self
        }
    }

    pub fn with_commitment(self, commitment: Commitment) -> Self {
        Self {
            preflight_commitment: commitment,
            confirmation: ConfirmConfig {
                commitment,
                ..self.confirmation
            },
            ..self
        }
    }

    pub fn broadcast_config(&self) -> BroadcastConfig {
        BroadcastConfig {
            skip_preflight: self.skip_preflight,
            preflight_commitment: self.preflight_commitment,
        }
    }

    pub fn validate(&self) -> TxResult<()> {
        if self.max_retries == 0 {
            return Err(TxError::Config(
                "max_retries must allow at least one attempt".to_string(),
            ));
        }
        if self.confirmation.max_attempts == 0 {
            return Err(TxError::Config(
                "confirmation max_attempts must allow at least one attempt".to_string(),
            ));
        }
        if self.confirmation.wait_timeout.is_zero() {
            return Err(TxError::Config(
                "confirmation wait_timeout must be positive".to_string(),
            ));
        }
        if self.deadline.is_some_and(|deadline| deadline.is_zero()) {
            return Err(TxError::Config("deadline must be positive".to_string()));
        }
        Ok(())
    }
}

impl Default for SubmitConfig {
    fn default() -> Self {
        Self::standard()
    }
}
