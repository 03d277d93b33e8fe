//! Command-line interface definition.

use clap::{Args, Parser, Subcommand, ValueEnum};
use satwatch::config::{default_config_path, AppConfig, Network};
use std::path::PathBuf;

/// Watch a Bitcoin address for incoming payments and manage simple wallets.
#[derive(Parser, Debug)]
#[command(name = "satwatch")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Network to use.
    #[arg(long, value_enum, global = true, env = "SATWATCH_NETWORK")]
    pub network: Option<CliNetwork>,

    /// Base URL of the block explorer API.
    #[arg(long, global = true, env = "SATWATCH_API_URL")]
    pub api_url: Option<String>,

    /// Request timeout in seconds.
    #[arg(
        long,
        global = true,
        env = "SATWATCH_TIMEOUT_SECS",
        value_parser = clap::value_parser!(u64).range(1..)
    )]
    pub timeout_secs: Option<u64>,

    /// Block explorer API token.
    #[arg(long, global = true, env = "SATWATCH_TOKEN", hide_env_values = true)]
    pub token: Option<String>,

    /// Log level.
    #[arg(long, global = true, env = "RUST_LOG")]
    pub log_level: Option<String>,

    /// Print results as JSON.
    #[arg(long, global = true)]
    pub json: bool,

    /// Path to configuration file.
    #[arg(long, short, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

/// Top-level commands.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Check whether the address received a payment of at least AMOUNT.
    Verify {
        /// Price in whole currency units (1 unit = 100,000,000 satoshis).
        #[arg(long, short, allow_negative_numbers = true)]
        amount: f64,

        /// Address to check.
        #[arg(long)]
        address: String,
    },

    /// Print the balance of an address in satoshis.
    Balance {
        /// Address to look up.
        #[arg(long)]
        address: String,
    },

    /// Create or recover wallets.
    #[command(subcommand)]
    Wallet(WalletCommand),
}

/// Wallet commands.
#[derive(Subcommand, Debug)]
pub enum WalletCommand {
    /// Generate a new wallet.
    New(NewWalletArgs),

    /// Reconnect to a wallet from its private key.
    Connect {
        /// Private key (WIF or hex).
        #[arg(long, env = "SATWATCH_PRIVATE_KEY", hide_env_values = true)]
        private_key: String,
    },

    /// Recover an HD wallet from its recovery phrase.
    Restore {
        /// Recovery phrase, quoted.
        #[arg(long)]
        phrase: String,
    },
}

/// Arguments for `wallet new`.
#[derive(Args, Debug)]
pub struct NewWalletArgs {
    /// Generate a hierarchical-deterministic wallet with a recovery phrase.
    #[arg(long)]
    pub hd: bool,
}

/// Network CLI enum.
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum CliNetwork {
    /// Bitcoin testnet.
    Test,
    /// Bitcoin mainnet.
    Production,
}

impl From<CliNetwork> for Network {
    fn from(n: CliNetwork) -> Self {
        match n {
            CliNetwork::Test => Self::Test,
            CliNetwork::Production => Self::Production,
        }
    }
}

impl Cli {
    /// Build the effective configuration: defaults, then the config file,
    /// then command-line flags.
    ///
    /// # Errors
    ///
    /// Returns an error if a config file is specified but cannot be loaded.
    pub fn to_config(&self) -> color_eyre::Result<AppConfig> {
        let mut config = if let Some(ref path) = self.config {
            AppConfig::from_file(path)?
        } else {
            match default_config_path() {
                Some(path) if path.exists() => AppConfig::from_file(&path)?,
                _ => AppConfig::default(),
            }
        };

        if let Some(network) = self.network {
            config.provider.network = network.into();
        }
        if let Some(ref url) = self.api_url {
            config.provider.base_url.clone_from(url);
        }
        if let Some(secs) = self.timeout_secs {
            config.provider.timeout_secs = secs;
        }
        if let Some(ref token) = self.token {
            config.provider.token = Some(token.clone());
        }
        if let Some(ref level) = self.log_level {
            config.log_level.clone_from(level);
        }

        Ok(config)
    }
}
