use crate::{
    BroadcastConfig, Commitment, LedgerClient, LedgerError, LedgerResult, SignatureStatus,
    ValidityAnchor, WaitOutcome,
};
use async_trait::async_trait;
use solana_client::{
    nonblocking::rpc_client::RpcClient, rpc_config::RpcSendTransactionConfig,
    rpc_request::TokenAccountsFilter,
};
use solana_sdk::{
    account::Account, pubkey::Pubkey, signature::Signature, transaction::Transaction,
};
use std::{str::FromStr, sync::Arc, time::Duration};
use tracing::debug;

/// [`LedgerClient`] backed by a JSON-RPC node.
pub struct RpcLedger {
    rpc_client: Arc<RpcClient>,
    commitment: Commitment,
    poll_interval: Duration,
}

impl RpcLedger {
    pub fn new(rpc_client: Arc<RpcClient>) -> Self {
        Self::with_commitment(rpc_client, Commitment::Confirmed)
    }

    /// `commitment` applies to account reads.
    pub fn with_commitment(rpc_client: Arc<RpcClient>, commitment: Commitment) -> Self {
        Self {
            rpc_client,
            commitment,
            poll_interval: Duration::from_millis(500),
        }
    }

    pub fn with_poll_interval(self, poll_interval: Duration) -> Self {
        Self {
            poll_interval,
            ..self
        }
    }

    pub fn rpc_client(&self) -> &Arc<RpcClient> {
        &self.rpc_client
    }
}

#[async_trait]
impl LedgerClient for RpcLedger {
    async fn latest_anchor(&self, commitment: Commitment) -> LedgerResult<ValidityAnchor> {
        let (blockhash, last_valid_block_height) = self
            .rpc_client
            .get_latest_blockhash_with_commitment(commitment.to_config())
            .await?;

        Ok(ValidityAnchor {
            blockhash,
            last_valid_block_height,
        })
    }

    async fn broadcast(
        &self,
        payload: &[u8],
        config: &BroadcastConfig,
    ) -> LedgerResult<Signature> {
        // Deserializing and re-serializing a signed transaction is lossless,
        // so the node receives the payload bytes unchanged.
        let transaction: Transaction = bincode::deserialize(payload)
            .map_err(|e| LedgerError::InvalidPayload(e.to_string()))?;

        let signature = self
            .rpc_client
            .send_transaction_with_config(
                &transaction,
                RpcSendTransactionConfig {
                    skip_preflight: config.skip_preflight,
                    preflight_commitment: Some(config.preflight_commitment.level()),
                    ..Default::default()
                },
            )
            .await?;

        Ok(signature)
    }

    async fn signature_status(
        &self,
        signature: &Signature,
    ) -> LedgerResult<Option<SignatureStatus>> {
        let status = self
            .rpc_client
            .get_signature_statuses(&[*signature])
            .await?
            .value
            .into_iter()
            .next()
            .flatten();

        Ok(status.map(|status| {
            let commitment = [
                Commitment::Finalized,
                Commitment::Confirmed,
                Commitment::Processed,
            ]
            .into_iter()
            .find(|level| status.satisfies_commitment(level.to_config()));

            SignatureStatus {
                commitment,
                err: status.err,
            }
        }))
    }

    async fn wait_for_commitment(
        &self,
        signature: &Signature,
        anchor: &ValidityAnchor,
        commitment: Commitment,
    ) -> LedgerResult<WaitOutcome> {
        loop {
            if let Some(status) = self.signature_status(signature).await? {
                if let Some(err) = status.err {
                    return Ok(WaitOutcome::Failed(err));
                }
                if status.satisfies(commitment) {
                    return Ok(WaitOutcome::Committed);
                }
            }

            let block_height = self
                .rpc_client
                .get_block_height_with_commitment(commitment.to_config())
                .await?;
            if block_height > anchor.last_valid_block_height {
                return Err(LedgerError::AnchorExpired {
                    signature: *signature,
                });
            }

            debug!(
                %signature,
                block_height,
                last_valid_block_height = anchor.last_valid_block_height,
                "Waiting for commitment"
            );
            tokio::time::sleep(self.poll_interval).await;
        }
    }

    async fn account(&self, address: &Pubkey) -> LedgerResult<Option<Account>> {
        let response = self
            .rpc_client
            .get_account_with_commitment(address, self.commitment.to_config())
            .await?;
        Ok(response.value)
    }

    async fn token_accounts_by_owner(
        &self,
        owner: &Pubkey,
        mint: &Pubkey,
    ) -> LedgerResult<Vec<Pubkey>> {
        let keyed_accounts = self
            .rpc_client
            .get_token_accounts_by_owner(owner, TokenAccountsFilter::Mint(*mint))
            .await?;

        keyed_accounts
            .iter()
            .map(|keyed| {
                Pubkey::from_str(&keyed.pubkey).map_err(|e| {
                    LedgerError::InvalidResponse(format!(
                        "token account address {:?}: {}",
                        keyed.pubkey, e
                    ))
                })
            })
            .collect()
    }
}
