//! Payment verifier: threshold matching over a polled transaction list.

use crate::amount::MonetaryAmount;
use crate::error::Result;
use crate::explorer::ExplorerClient;
use crate::payment::record::{TransactionRecord, VerificationResult};
use tracing::{debug, info};

/// Compare every transaction against `threshold_satoshis`.
///
/// One result per record, in input order. Duplicates are kept.
#[must_use]
pub fn classify(threshold_satoshis: u64, records: &[TransactionRecord]) -> Vec<VerificationResult> {
    records
        .iter()
        .map(|record| VerificationResult::evaluate(record, threshold_satoshis))
        .collect()
}

/// Checks whether a watched address received a payment of at least a price.
///
/// Holds no per-query state, so one verifier can serve concurrent calls for
/// independent addresses.
#[derive(Debug, Clone)]
pub struct PaymentVerifier {
    explorer: ExplorerClient,
}

impl PaymentVerifier {
    /// Create a verifier backed by `explorer`.
    #[must_use]
    pub fn new(explorer: ExplorerClient) -> Self {
        Self { explorer }
    }

    /// The explorer client used for queries.
    #[must_use]
    pub fn explorer(&self) -> &ExplorerClient {
        &self.explorer
    }

    /// Verify incoming payments to `address` against `fiat_amount`.
    ///
    /// The amount is in whole currency units and is converted to satoshis at
    /// 10^8 per unit. The address is passed to the provider as-is.
    ///
    /// # Returns
    ///
    /// One [`VerificationResult`] per transaction the provider reports, in
    /// provider order. An address without transactions yields an empty vector.
    ///
    /// # Errors
    ///
    /// * `Error::InvalidInput` - the amount is negative or not finite; no
    ///   request is made
    /// * `Error::ProviderUnavailable` - transport failure or non-2xx status
    /// * `Error::MalformedResponse` - the body is not a transaction list
    ///
    /// No partial results are returned on error.
    pub async fn verify_incoming_payment(
        &self,
        fiat_amount: f64,
        address: &str,
    ) -> Result<Vec<VerificationResult>> {
        let amount = MonetaryAmount::new(fiat_amount)?;
        let threshold_satoshis = amount.to_satoshis();

        info!(
            "Checking {} for a payment of {} ({} satoshis)",
            address, amount, threshold_satoshis
        );

        let history = self.explorer.address_full(address).await?;

        info!(
            "{} transactions found for address {}",
            history.txs.len(),
            address
        );

        let results = classify(threshold_satoshis, &history.txs);
        for result in &results {
            debug!(
                "Transaction {} carries {} satoshis",
                result.transaction_hash, result.total_output_satoshis
            );
            if result.met {
                info!("Payment received in transaction {}", result.transaction_hash);
            } else {
                debug!(
                    "Transaction {} is below the {} satoshi threshold",
                    result.transaction_hash, threshold_satoshis
                );
            }
        }

        Ok(results)
    }

    /// Confirmed balance of `address` in satoshis.
    ///
    /// # Errors
    ///
    /// Returns a provider error if the lookup fails.
    pub async fn balance(&self, address: &str) -> Result<u64> {
        self.explorer.address_balance(address).await
    }
}
