//! Scripted in-memory [`LedgerClient`] for exercising the pipeline without a node.
//!
//! Each operation pops its next scripted response; once a queue is empty the
//! ledger falls back to a benign default (broadcast succeeds with the
//! payload's own signature, status is unknown, waits commit, anchors are
//! fresh).

use crate::{
    BroadcastConfig, Commitment, LedgerClient, LedgerResult, SignatureStatus, ValidityAnchor,
    WaitOutcome,
};
use async_trait::async_trait;
use solana_sdk::{
    account::Account, hash::Hash, pubkey::Pubkey, signature::Signature, transaction::Transaction,
};
use std::{
    collections::{HashMap, VecDeque},
    sync::{Mutex, MutexGuard, PoisonError},
};

/// Scripted response to a wait-for-commitment call.
#[derive(Debug, Clone)]
pub enum ScriptedWait {
    Respond(LedgerResult<WaitOutcome>),
    /// Never resolves
    Hang,
}

#[derive(Debug, Default)]
struct CallCounts {
    broadcast: u64,
    status: u64,
    wait: u64,
    anchor: u64,
}

#[derive(Debug, Default)]
pub struct ScriptedLedger {
    broadcast_results: Mutex<VecDeque<LedgerResult<Signature>>>,
    status_results: Mutex<VecDeque<LedgerResult<Option<SignatureStatus>>>>,
    wait_results: Mutex<VecDeque<ScriptedWait>>,
    anchor_results: Mutex<VecDeque<LedgerResult<ValidityAnchor>>>,
    accounts: Mutex<HashMap<Pubkey, Account>>,
    token_accounts: Mutex<HashMap<(Pubkey, Pubkey), Vec<Pubkey>>>,
    broadcasts: Mutex<Vec<Vec<u8>>>,
    calls: Mutex<CallCounts>,
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

impl ScriptedLedger {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push_broadcast(&self, result: LedgerResult<Signature>) {
        lock(&self.broadcast_results).push_back(result);
    }

    pub fn push_status(&self, result: LedgerResult<Option<SignatureStatus>>) {
        lock(&self.status_results).push_back(result);
    }

    pub fn push_wait(&self, wait: ScriptedWait) {
        lock(&self.wait_results).push_back(wait);
    }

    pub fn push_anchor(&self, result: LedgerResult<ValidityAnchor>) {
        lock(&self.anchor_results).push_back(result);
    }

    pub fn insert_account(&self, address: Pubkey, account: Account) {
        lock(&self.accounts).insert(address, account);
    }

    pub fn insert_token_accounts(&self, owner: Pubkey, mint: Pubkey, token_accounts: Vec<Pubkey>) {
        lock(&self.token_accounts).insert((owner, mint), token_accounts);
    }

    /// Every payload broadcast so far, in order.
    pub fn broadcasts(&self) -> Vec<Vec<u8>> {
        lock(&self.broadcasts).clone()
    }

    pub fn broadcast_calls(&self) -> u64 {
        lock(&self.calls).broadcast
    }

    pub fn status_calls(&self) -> u64 {
        lock(&self.calls).status
    }

    pub fn wait_calls(&self) -> u64 {
        lock(&self.calls).wait
    }

    pub fn anchor_calls(&self) -> u64 {
        lock(&self.calls).anchor
    }
}

fn payload_signature(payload: &[u8]) -> Signature {
    bincode::deserialize::<Transaction>(payload)
        .ok()
        .and_then(|tx| tx.signatures.first().copied())
        .unwrap_or_default()
}

#[async_trait]
impl LedgerClient for ScriptedLedger {
    async fn latest_anchor(&self, _commitment: Commitment) -> LedgerResult<ValidityAnchor> {
        lock(&self.calls).anchor += 1;
        lock(&self.anchor_results).pop_front().unwrap_or_else(|| {
            Ok(ValidityAnchor {
                blockhash: Hash::new_unique(),
                last_valid_block_height: 1_000,
            })
        })
    }

    async fn broadcast(
        &self,
        payload: &[u8],
        _config: &BroadcastConfig,
    ) -> LedgerResult<Signature> {
        lock(&self.calls).broadcast += 1;
        lock(&self.broadcasts).push(payload.to_vec());
        lock(&self.broadcast_results)
            .pop_front()
            .unwrap_or_else(|| Ok(payload_signature(payload)))
    }

    async fn signature_status(
        &self,
        _signature: &Signature,
    ) -> LedgerResult<Option<SignatureStatus>> {
        lock(&self.calls).status += 1;
        lock(&self.status_results).pop_front().unwrap_or(Ok(None))
    }

    async fn wait_for_commitment(
        &self,
        _signature: &Signature,
        _anchor: &ValidityAnchor,
        _commitment: Commitment,
    ) -> LedgerResult<WaitOutcome> {
        lock(&self.calls).wait += 1;
        let next = lock(&self.wait_results).pop_front();
        match next {
            Some(ScriptedWait::Respond(result)) => result,
            Some(ScriptedWait::Hang) => futures::future::pending().await,
            None => Ok(WaitOutcome::Committed),
        }
    }

    async fn account(&self, address: &Pubkey) -> LedgerResult<Option<Account>> {
        Ok(lock(&self.accounts).get(address).cloned())
    }

    async fn token_accounts_by_owner(
        &self,
        owner: &Pubkey,
        mint: &Pubkey,
    ) -> LedgerResult<Vec<Pubkey>> {
        Ok(lock(&self.token_accounts)
            .get(&(*owner, *mint))
            .cloned()
            .unwrap_or_default())
    }
}
