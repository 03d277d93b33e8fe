//! Payment verification against the stand-in provider.

#![allow(clippy::expect_used, clippy::unwrap_used)]

use super::{TestProvider, TestTx};
use satwatch::payment::any_met;
use satwatch::{Error, ExplorerClient, Network, PaymentVerifier, ProviderConfig};
use std::time::{Duration, Instant};

const ADDRESS: &str = "mwKsJtSPu8oYMEV9cZ2mkkJsm7TThTtT1V";

#[tokio::test]
async fn test_seventy_units_not_met_by_fifty() {
    let mut provider = TestProvider::start().await;
    let mock = provider
        .serve_history(
            ADDRESS,
            &[TestTx::new("tx-a", &[3_000_000_000, 2_000_000_000])],
        )
        .await;

    let results = provider
        .verifier()
        .verify_incoming_payment(70.0, ADDRESS)
        .await
        .expect("verification");

    assert_eq!(results.len(), 1);
    assert_eq!(results[0].transaction_hash, "tx-a");
    assert_eq!(results[0].total_output_satoshis, 5_000_000_000);
    assert_eq!(results[0].threshold_satoshis, 7_000_000_000);
    assert!(!results[0].met);
    mock.assert_async().await;
}

#[tokio::test]
async fn test_exact_boundary_is_met() {
    let mut provider = TestProvider::start().await;
    let _mock = provider
        .serve_history(ADDRESS, &[TestTx::new("tx-a", &[100_000_000])])
        .await;

    let results = provider
        .verifier()
        .verify_incoming_payment(1.0, ADDRESS)
        .await
        .expect("verification");

    assert_eq!(results.len(), 1);
    assert!(results[0].met);
    assert!(any_met(&results));
}

#[tokio::test]
async fn test_mixed_transactions_keep_provider_order() {
    let mut provider = TestProvider::start().await;
    let _mock = provider
        .serve_history(
            ADDRESS,
            &[
                TestTx::new("tx-small", &[10_000, 20_000]),
                TestTx::new("tx-large", &[60_000_000, 50_000_000]),
            ],
        )
        .await;

    let results = provider
        .verifier()
        .verify_incoming_payment(1.0, ADDRESS)
        .await
        .expect("verification");

    assert_eq!(results.len(), 2);
    assert_eq!(results[0].transaction_hash, "tx-small");
    assert!(!results[0].met);
    assert_eq!(results[1].transaction_hash, "tx-large");
    assert_eq!(results[1].total_output_satoshis, 110_000_000);
    assert!(results[1].met);
}

#[tokio::test]
async fn test_empty_history_is_not_an_error() {
    let mut provider = TestProvider::start().await;
    let _mock = provider.serve_history(ADDRESS, &[]).await;

    let results = provider
        .verifier()
        .verify_incoming_payment(1.0, ADDRESS)
        .await
        .expect("verification");

    assert!(results.is_empty());
    assert!(!any_met(&results));
}

#[tokio::test]
async fn test_server_error_is_provider_unavailable() {
    let mut provider = TestProvider::start().await;
    let mock = provider
        .serve_raw(ADDRESS, 500, "Internal Server Error")
        .await;

    let err = provider
        .verifier()
        .verify_incoming_payment(1.0, ADDRESS)
        .await
        .expect_err("HTTP 500");

    assert!(matches!(err, Error::ProviderUnavailable(_)), "{err}");
    mock.assert_async().await;
}

#[tokio::test]
async fn test_rate_limit_is_provider_unavailable() {
    let mut provider = TestProvider::start().await;
    let _mock = provider
        .serve_raw(ADDRESS, 429, r#"{"error":"Limits reached."}"#)
        .await;

    let err = provider
        .verifier()
        .verify_incoming_payment(1.0, ADDRESS)
        .await
        .expect_err("HTTP 429");

    assert!(matches!(err, Error::ProviderUnavailable(_)));
}

#[tokio::test]
async fn test_unparsable_body_is_malformed() {
    let mut provider = TestProvider::start().await;
    let _mock = provider.serve_raw(ADDRESS, 200, "<html>oops</html>").await;

    let err = provider
        .verifier()
        .verify_incoming_payment(1.0, ADDRESS)
        .await
        .expect_err("not JSON");

    assert!(matches!(err, Error::MalformedResponse(_)));
}

#[tokio::test]
async fn test_wrong_shape_fails_whole_query() {
    // First transaction is fine, second lacks outputs: no partial results.
    let mut provider = TestProvider::start().await;
    let _mock = provider
        .serve_raw(
            ADDRESS,
            200,
            r#"{"txs":[{"hash":"ok","outputs":[{"value":1}]},{"hash":"bad"}]}"#,
        )
        .await;

    let err = provider
        .verifier()
        .verify_incoming_payment(0.0, ADDRESS)
        .await
        .expect_err("missing outputs");

    assert!(matches!(err, Error::MalformedResponse(_)));
}

#[tokio::test]
async fn test_negative_amount_makes_no_request() {
    let mut provider = TestProvider::start().await;
    let mock = provider.serve_history(ADDRESS, &[]).await;

    let err = provider
        .verifier()
        .verify_incoming_payment(-5.0, ADDRESS)
        .await
        .expect_err("negative");

    assert!(matches!(err, Error::InvalidInput(_)));
    assert!(!mock.matched_async().await);
}

#[tokio::test]
async fn test_production_network_uses_main_chain() {
    let address = "1BoatSLRHtKNngkdXEeobR76b53LETtpyT";
    let mut provider = TestProvider::start_for(Network::Production).await;
    let mock = provider
        .serve_history(address, &[TestTx::new("tx-main", &[250_000_000])])
        .await;

    let results = provider
        .verifier()
        .verify_incoming_payment(2.5, address)
        .await
        .expect("verification");

    assert!(results[0].met);
    mock.assert_async().await;
}

#[tokio::test]
async fn test_concurrent_verifications_are_independent() {
    let mut provider = TestProvider::start().await;
    let _paid = provider
        .serve_history("addr-paid", &[TestTx::new("tx-1", &[500_000_000])])
        .await;
    let _unpaid = provider
        .serve_history("addr-unpaid", &[TestTx::new("tx-2", &[1])])
        .await;

    let verifier = provider.verifier();
    let (paid, unpaid) = tokio::join!(
        verifier.verify_incoming_payment(5.0, "addr-paid"),
        verifier.verify_incoming_payment(5.0, "addr-unpaid"),
    );

    assert!(paid.expect("paid")[0].met);
    assert!(!unpaid.expect("unpaid")[0].met);
}

#[tokio::test]
async fn test_silent_provider_times_out() {
    // Accepts connections but never answers.
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let _hold = tokio::spawn(async move {
        let mut sockets = Vec::new();
        while let Ok((socket, _)) = listener.accept().await {
            sockets.push(socket);
        }
    });

    let config = ProviderConfig {
        base_url: format!("http://{addr}"),
        timeout_secs: 1,
        ..Default::default()
    };
    let verifier = PaymentVerifier::new(ExplorerClient::new(&config).expect("client"));

    let started = Instant::now();
    let err = verifier
        .verify_incoming_payment(1.0, ADDRESS)
        .await
        .expect_err("timeout");

    assert!(matches!(err, Error::ProviderUnavailable(_)));
    assert!(started.elapsed() < Duration::from_secs(10));
}

#[tokio::test]
async fn test_balance_lookup_returns_value() {
    let mut server = mockito::Server::new_async().await;
    let _mock = server
        .mock("GET", format!("/v1/btc/test3/addrs/{ADDRESS}/balance").as_str())
        .with_status(200)
        .with_body(r#"{"address":"x","total_received":0,"balance":4200,"unconfirmed_balance":0}"#)
        .create_async()
        .await;

    let config = ProviderConfig {
        base_url: server.url(),
        ..Default::default()
    };
    let verifier = PaymentVerifier::new(ExplorerClient::new(&config).expect("client"));

    assert_eq!(verifier.balance(ADDRESS).await.expect("balance"), 4200);
}
