//! Key pair, address and HD wallet generation.
//!
//! Every primitive comes from the `bitcoin` (secp256k1, BIP32, WIF, address
//! encoding) and `bip39` crates. Addresses are legacy P2PKH.

use crate::config::Network;
use crate::error::{Error, Result};
use bip39::{Language, Mnemonic};
use bitcoin::bip32::{Xpriv, Xpub};
use bitcoin::secp256k1::{rand::thread_rng, Secp256k1, SecretKey, Signing};
use bitcoin::{Address, NetworkKind, PrivateKey};
use serde::Serialize;
use std::str::FromStr;
use tracing::debug;

/// Words in a generated recovery phrase.
const MNEMONIC_WORDS: usize = 12;

/// A single key pair and its address.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Wallet {
    /// Private key in WIF.
    pub private_key: String,
    /// P2PKH address of the key.
    pub address: String,
}

/// A hierarchical-deterministic wallet rooted at a BIP39 phrase.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HdWallet {
    /// Extended public key of the master node (`xpub`/`tpub`).
    pub pub_key: String,
    /// Master private key in WIF.
    pub priv_key: String,
    /// P2PKH address of the master key.
    pub address: String,
    /// English recovery phrase.
    pub pass_phrase: String,
}

/// Generate a fresh random key pair for `network`.
#[must_use]
pub fn generate_wallet(network: Network) -> Wallet {
    let secp = Secp256k1::new();
    let secret = SecretKey::new(&mut thread_rng());
    let private_key = PrivateKey::new(secret, network.bitcoin_network());
    debug!("Generated new {} key pair", network);
    wallet_from_key(&secp, &private_key, network)
}

/// Generate a fresh HD wallet with a new 12-word English phrase.
///
/// # Errors
///
/// Returns `Error::Wallet` if the phrase or master key cannot be created.
pub fn generate_hd_wallet(network: Network) -> Result<HdWallet> {
    let mnemonic = Mnemonic::generate_in(Language::English, MNEMONIC_WORDS)
        .map_err(|e| Error::Wallet(format!("Failed to generate mnemonic: {e}")))?;
    debug!("Generated new {} HD wallet", network);
    hd_wallet_from_mnemonic(&mnemonic, network)
}

/// Rebuild the HD wallet for an existing recovery phrase.
///
/// # Errors
///
/// Returns `Error::Wallet` if the phrase is not a valid English BIP39 phrase.
pub fn restore_hd_wallet(network: Network, phrase: &str) -> Result<HdWallet> {
    let mnemonic = Mnemonic::parse_in_normalized(Language::English, phrase.trim())
        .map_err(|e| Error::Wallet(format!("Invalid recovery phrase: {e}")))?;
    hd_wallet_from_mnemonic(&mnemonic, network)
}

/// Reconnect to an existing wallet from its private key.
///
/// Accepts WIF or a 64-character hex secret. A WIF key encoded for the other
/// network is rejected.
///
/// # Errors
///
/// Returns `Error::Wallet` if the key cannot be parsed or belongs to the
/// other network.
pub fn connect_wallet(network: Network, private_key: &str) -> Result<Wallet> {
    let private_key = private_key.trim();
    let expected = NetworkKind::from(network.bitcoin_network());

    let key = match PrivateKey::from_wif(private_key) {
        Ok(key) => {
            if key.network != expected {
                return Err(Error::Wallet(format!(
                    "private key is not a {network} network key"
                )));
            }
            key
        }
        Err(wif_err) => {
            let secret = SecretKey::from_str(private_key).map_err(|_| {
                Error::Wallet(format!("Invalid private key: {wif_err}"))
            })?;
            PrivateKey::new(secret, expected)
        }
    };

    let secp = Secp256k1::new();
    Ok(wallet_from_key(&secp, &key, network))
}

fn wallet_from_key<C: Signing>(secp: &Secp256k1<C>, key: &PrivateKey, network: Network) -> Wallet {
    let address = Address::p2pkh(key.public_key(secp).pubkey_hash(), network.bitcoin_network());
    Wallet {
        private_key: key.to_wif(),
        address: address.to_string(),
    }
}

fn hd_wallet_from_mnemonic(mnemonic: &Mnemonic, network: Network) -> Result<HdWallet> {
    let secp = Secp256k1::new();
    let seed = mnemonic.to_seed("");
    let master = Xpriv::new_master(network.bitcoin_network(), &seed)
        .map_err(|e| Error::Wallet(format!("Failed to derive master key: {e}")))?;
    let xpub = Xpub::from_priv(&secp, &master);
    let wallet = wallet_from_key(&secp, &master.to_priv(), network);

    Ok(HdWallet {
        pub_key: xpub.to_string(),
        priv_key: wallet.private_key,
        address: wallet.address,
        pass_phrase: mnemonic.to_string(),
    })
}
