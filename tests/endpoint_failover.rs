//! Endpoint failure tracking against live mock endpoints.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use erst_rpc::health::EndpointProber;
use erst_rpc::{CircuitState, ClientOption, EnvSnapshot, RpcClient, RpcPolicy};

mod common;

fn policy(threshold: u32, cooldown: Duration) -> RpcPolicy {
    RpcPolicy {
        timeout: Duration::from_secs(2),
        circuit_breaker_threshold: threshold,
        circuit_breaker_timeout: cooldown,
        ..Default::default()
    }
}

fn client_for(urls: Vec<String>, options: Vec<ClientOption>) -> RpcClient {
    let mut all = vec![ClientOption::AlternateUrls(urls)];
    all.extend(options);
    RpcClient::new(all, &EnvSnapshot::empty()).unwrap()
}

#[tokio::test]
async fn test_headers_and_token_reach_endpoint() {
    let addr = common::start_endpoint(|request| {
        let request = request.to_ascii_lowercase();
        if request.contains("x-test: header") && request.contains("authorization: bearer secret") {
            (200, "ok".into())
        } else {
            (400, "missing headers".into())
        }
    })
    .await;

    let client = client_for(
        vec![format!("http://{}", addr)],
        vec![
            ClientOption::Headers([("X-Test".to_string(), "header".to_string())].into()),
            ClientOption::Token("secret".into()),
        ],
    );

    let res = client.http_client().get(client.primary_url()).send().await.unwrap();
    assert_eq!(res.status(), 200);
}

#[tokio::test]
async fn test_probe_opens_failing_endpoint() {
    let bad = common::start_fixed_endpoint(503).await;
    let good = common::start_fixed_endpoint(200).await;
    let bad_url = format!("http://{}", bad);
    let good_url = format!("http://{}", good);

    let client = client_for(
        vec![bad_url.clone(), good_url.clone()],
        vec![ClientOption::Policy(policy(2, Duration::from_secs(60)))],
    );
    let prober = EndpointProber::new(&client);

    let outcomes = prober.probe_all().await;
    assert!(!outcomes[0].healthy);
    assert_eq!(outcomes[0].status, Some(503));
    assert!(outcomes[1].healthy);
    assert_eq!(client.endpoint_state(&bad_url), CircuitState::Closed);

    prober.probe_all().await;
    assert_eq!(client.endpoint_state(&bad_url), CircuitState::Open);
    assert!(!client.is_eligible(&bad_url));

    let selection = client.select_endpoint().unwrap();
    assert_eq!(selection.url, good_url);
    assert!(!selection.probe);
}

#[tokio::test]
async fn test_unreachable_endpoint_counts_as_failure() {
    let addr = common::closed_address().await;
    let url = format!("http://{}", addr);
    let client = client_for(
        vec![url.clone()],
        vec![ClientOption::Policy(policy(1, Duration::from_secs(60)))],
    );

    let outcome = EndpointProber::new(&client).probe(&url).await;
    assert!(!outcome.healthy);
    assert!(outcome.error.is_some());
    assert_eq!(outcome.state, CircuitState::Open);
}

#[tokio::test]
async fn test_recovery_through_half_open_probe() {
    let healthy = Arc::new(AtomicBool::new(false));
    let flag = healthy.clone();
    let addr = common::start_endpoint(move |_| {
        if flag.load(Ordering::SeqCst) {
            (200, "ok".into())
        } else {
            (500, "down".into())
        }
    })
    .await;
    let url = format!("http://{}", addr);

    let client = client_for(
        vec![url.clone()],
        vec![ClientOption::Policy(policy(1, Duration::from_millis(100)))],
    );
    let prober = EndpointProber::new(&client);

    prober.probe(&url).await;
    assert_eq!(client.endpoint_state(&url), CircuitState::Open);

    tokio::time::sleep(Duration::from_millis(150)).await;
    assert_eq!(client.endpoint_state(&url), CircuitState::HalfOpen);

    let selection = client.select_endpoint().unwrap();
    assert!(selection.probe);
    assert!(!client.is_eligible(&url));

    healthy.store(true, Ordering::SeqCst);
    let outcome = prober.probe(&url).await;
    assert!(outcome.healthy);
    assert_eq!(outcome.state, CircuitState::Closed);
    assert_eq!(client.tracker().consecutive_failures(&url), 0);
}

#[tokio::test]
async fn test_concurrent_outcomes_are_not_lost() {
    let urls = vec!["https://a.example".to_string(), "https://b.example".to_string()];
    let client = Arc::new(client_for(
        urls.clone(),
        vec![ClientOption::Policy(policy(10_000, Duration::from_secs(60)))],
    ));

    let mut tasks = Vec::new();
    for i in 0..16 {
        let client = client.clone();
        let url = urls[i % 2].clone();
        tasks.push(tokio::spawn(async move {
            for _ in 0..50 {
                client.record_failure(&url);
                tokio::task::yield_now().await;
            }
        }));
    }
    for task in tasks {
        task.await.unwrap();
    }

    assert_eq!(client.tracker().consecutive_failures(&urls[0]), 400);
    assert_eq!(client.tracker().consecutive_failures(&urls[1]), 400);
}
