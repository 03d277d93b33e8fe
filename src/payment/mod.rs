//! Incoming-payment verification for a watched address.
//!
//! # Flow
//!
//! ```text
//! verify_incoming_payment(amount, address)
//!        │
//!        ▼
//! ┌─────────────────────┐
//! │ Validate amount     │──── invalid ──▶ Err(InvalidInput)
//! └─────────┬───────────┘
//!           │ threshold = amount × 10^8 sat
//!           ▼
//! ┌─────────────────────┐
//! │ GET .../addrs/{a}/  │──── failure ──▶ Err(ProviderUnavailable
//! │     full            │                     | MalformedResponse)
//! └─────────┬───────────┘
//!           │ txs (provider order)
//!           ▼
//! ┌─────────────────────┐
//! │ Sum outputs per tx  │
//! │ met = total ≥ thr   │
//! └─────────┬───────────┘
//!           ▼
//!   Ok(Vec<VerificationResult>)
//! ```

mod record;
mod verifier;

pub use record::{any_met, TransactionOutput, TransactionRecord, VerificationResult};
pub use verifier::{classify, PaymentVerifier};
