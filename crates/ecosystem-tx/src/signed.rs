use crate::{TxError, TxResult, ValidityAnchor};
use solana_sdk::{signature::Signature, signer::signers::Signers, transaction::Transaction};

/// A transaction signed exactly once, frozen as wire bytes.
///
/// Every broadcast of this payload sends `bytes()` unchanged; there is no way
/// to re-sign or re-anchor it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignedTransaction {
    bytes: Vec<u8>,
    signature: Signature,
    anchor: ValidityAnchor,
}

impl SignedTransaction {
    pub fn sign<T>(mut transaction: Transaction, signers: &T, anchor: ValidityAnchor) -> TxResult<Self>
    where
        T: Signers + ?Sized,
    {
        transaction
            .try_sign(signers, anchor.blockhash)
            .map_err(|e| TxError::Signing(e.to_string()))?;

        let signature = transaction
            .signatures
            .first()
            .copied()
            .ok_or_else(|| TxError::Signing("transaction has no signatures".to_string()))?;

        let bytes =
            bincode::serialize(&transaction).map_err(|e| TxError::Serialization(e.to_string()))?;

        Ok(Self {
            bytes,
            signature,
            anchor,
        })
    }

    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Fee payer signature, which identifies the transaction on the ledger.
    pub fn signature(&self) -> Signature {
        self.signature
    }

    pub fn anchor(&self) -> &ValidityAnchor {
        &self.anchor
    }
}
