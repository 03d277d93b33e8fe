//! Transaction records as reported by the provider, and per-transaction
//! verification results.

use serde::{Deserialize, Serialize};

/// A single transaction output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransactionOutput {
    /// Output value in satoshis.
    pub value: u64,
}

/// A transaction touching the watched address.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransactionRecord {
    /// Transaction hash, opaque.
    pub hash: String,
    /// Outputs in provider order.
    pub outputs: Vec<TransactionOutput>,
}

impl TransactionRecord {
    /// Sum of all output values.
    ///
    /// Saturates at `u64::MAX`, which no real transaction can reach.
    #[must_use]
    pub fn total_output_satoshis(&self) -> u64 {
        self.outputs
            .iter()
            .fold(0u64, |total, output| total.saturating_add(output.value))
    }
}

/// Outcome of checking one transaction against the payment threshold.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VerificationResult {
    /// Hash of the checked transaction.
    pub transaction_hash: String,
    /// Sum of the transaction's outputs.
    pub total_output_satoshis: u64,
    /// Threshold the total was compared against.
    pub threshold_satoshis: u64,
    /// True when `total_output_satoshis >= threshold_satoshis`.
    pub met: bool,
}

impl VerificationResult {
    /// Compare a transaction against `threshold_satoshis`.
    #[must_use]
    pub fn evaluate(record: &TransactionRecord, threshold_satoshis: u64) -> Self {
        let total_output_satoshis = record.total_output_satoshis();
        Self {
            transaction_hash: record.hash.clone(),
            total_output_satoshis,
            threshold_satoshis,
            met: total_output_satoshis >= threshold_satoshis,
        }
    }
}

/// Returns true if any result met its threshold.
#[must_use]
pub fn any_met(results: &[VerificationResult]) -> bool {
    results.iter().any(|r| r.met)
}
