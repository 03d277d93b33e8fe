//! satwatch CLI entry point.

mod cli;

use clap::Parser;
use cli::{Cli, Command, WalletCommand};
use satwatch::payment::any_met;
use satwatch::{wallet, ExplorerClient, PaymentVerifier};
use serde::Serialize;
use tracing::info;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

#[tokio::main]
async fn main() -> color_eyre::Result<()> {
    // Initialize error handling
    color_eyre::install()?;

    let cli = Cli::parse();
    let config = cli.to_config()?;

    // Logs go to stderr, results to stdout
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.log_level));

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .init();

    info!(
        "satwatch v{} on {} network",
        env!("CARGO_PKG_VERSION"),
        config.provider.network
    );

    let network = config.provider.network;

    match cli.command {
        Command::Verify { amount, address } => {
            let verifier = PaymentVerifier::new(ExplorerClient::new(&config.provider)?);
            let checked_at = chrono::Utc::now();
            let results = verifier.verify_incoming_payment(amount, &address).await?;
            let paid = any_met(&results);

            if cli.json {
                print_json(&serde_json::json!({
                    "address": address,
                    "amount": amount,
                    "checked_at": checked_at,
                    "paid": paid,
                    "results": results,
                }))?;
            } else {
                println!("{} transaction(s) for {address}", results.len());
                for result in &results {
                    println!(
                        "{}  {} / {} sat  {}",
                        result.transaction_hash,
                        result.total_output_satoshis,
                        result.threshold_satoshis,
                        if result.met { "PAID" } else { "insufficient" }
                    );
                }
            }

            if !paid {
                info!("No payment of {} found for {}", amount, address);
            }
        }
        Command::Balance { address } => {
            let verifier = PaymentVerifier::new(ExplorerClient::new(&config.provider)?);
            let balance = verifier.balance(&address).await?;
            if cli.json {
                print_json(&serde_json::json!({ "address": address, "balance": balance }))?;
            } else {
                println!("{balance}");
            }
        }
        Command::Wallet(WalletCommand::New(args)) => {
            if args.hd {
                output(cli.json, &wallet::generate_hd_wallet(network)?)?;
            } else {
                output(cli.json, &wallet::generate_wallet(network))?;
            }
        }
        Command::Wallet(WalletCommand::Connect { private_key }) => {
            output(cli.json, &wallet::connect_wallet(network, &private_key)?)?;
        }
        Command::Wallet(WalletCommand::Restore { phrase }) => {
            output(cli.json, &wallet::restore_hd_wallet(network, &phrase)?)?;
        }
    }

    Ok(())
}

fn print_json<T: Serialize>(value: &T) -> color_eyre::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

/// Print a wallet as JSON, or as `key: value` lines.
fn output<T: Serialize>(json: bool, value: &T) -> color_eyre::Result<()> {
    if json {
        return print_json(value);
    }
    if let serde_json::Value::Object(fields) = serde_json::to_value(value)? {
        for (key, value) in fields {
            match value {
                serde_json::Value::String(s) => println!("{key}: {s}"),
                other => println!("{key}: {other}"),
            }
        }
    }
    Ok(())
}
