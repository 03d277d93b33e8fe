//! # satwatch
//!
//! Bitcoin wallet generation and incoming-payment verification.
//!
//! ## Overview
//!
//! `satwatch` watches a Bitcoin address through a block explorer and reports,
//! for every transaction the explorer returns, whether the transaction's total
//! output value reaches a price expressed in whole currency units.
//!
//! Wallet generation (plain key pairs, HD wallets with a mnemonic recovery
//! phrase, reconnecting from a WIF private key) is a thin layer over the
//! `bitcoin` and `bip39` crates. No cryptography is implemented here.
//!
//! ## Example
//!
//! ```rust,ignore
//! use satwatch::{ExplorerClient, PaymentVerifier, ProviderConfig};
//!
//! let client = ExplorerClient::new(&ProviderConfig::default())?;
//! let verifier = PaymentVerifier::new(client);
//! for result in verifier.verify_incoming_payment(70.0, "mwKsJtSPu8oYMEV9cZ2mkkJsm7TThTtT1V").await? {
//!     println!("{} met={}", result.transaction_hash, result.met);
//! }
//! ```

pub mod amount;
pub mod config;
pub mod error;
pub mod explorer;
pub mod payment;
pub mod wallet;

pub use amount::{MonetaryAmount, SATOSHIS_PER_UNIT};
pub use config::{AppConfig, Network, ProviderConfig};
pub use error::{Error, Result};
pub use explorer::ExplorerClient;
pub use payment::{PaymentVerifier, TransactionRecord, VerificationResult};
pub use wallet::{HdWallet, Wallet};
