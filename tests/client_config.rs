//! Configuration resolution and client construction through the public API.

use std::collections::HashMap;
use std::time::Duration;

use erst_rpc::client::network::{MAINNET_HORIZON_URL, TESTNET_HORIZON_URL};
use erst_rpc::config::env::{ENV_RPC_HEADERS, ENV_RPC_TOKEN, ENV_RPC_URLS};
use erst_rpc::config::{parse_headers, parse_urls};
use erst_rpc::{
    load_config, ClientOption, EnvSnapshot, Network, NetworkConfig, RpcClient, RpcOptions,
};

fn env_with_urls(urls: &str) -> EnvSnapshot {
    EnvSnapshot::empty().with(ENV_RPC_URLS, urls)
}

#[test]
fn test_header_parsing_examples() {
    let h = parse_headers(r#"{"A":"1","B":2}"#);
    assert_eq!(h.get("A").map(String::as_str), Some("1"));
    assert_eq!(h.get("B").map(String::as_str), Some("2"));

    let h = parse_headers("X=1,notvalid,Y=2");
    assert_eq!(h.len(), 2);
    assert_eq!(h["X"], "1");
    assert_eq!(h["Y"], "2");
    assert!(!h.contains_key("notvalid"));
}

#[test]
fn test_url_parsing_examples() {
    assert_eq!(
        parse_urls("https://a.com, https://b.com").unwrap(),
        vec!["https://a.com", "https://b.com"]
    );
    assert_eq!(parse_urls("https://a.com,not-a-url").unwrap(), vec!["https://a.com"]);
    assert!(parse_urls("not-a-url").unwrap_err().is_configuration());
}

#[test]
fn test_missing_endpoint_source() {
    let err = load_config(&RpcOptions::default(), &EnvSnapshot::empty()).unwrap_err();
    assert!(err.is_configuration());
}

#[test]
fn test_environment_only_configuration() {
    let env = env_with_urls("https://one.example, https://two.example")
        .with(ENV_RPC_HEADERS, "X-Client=erst, X-Trace:on")
        .with(ENV_RPC_TOKEN, "tok");

    let config = load_config(&RpcOptions::default(), &env).unwrap();
    assert_eq!(config.primary_url, "https://one.example");
    assert_eq!(config.alternate_urls, vec!["https://one.example", "https://two.example"]);
    assert_eq!(config.headers.len(), 2);
    assert_eq!(config.token.as_deref(), Some("tok"));
    assert_eq!(config.policy.timeout, Duration::from_millis(30_000));

    let client = RpcClient::from_configuration(config, &env).unwrap();
    assert_eq!(client.alternate_urls()[0], client.primary_url());
}

#[test]
fn test_default_construction() {
    let client = RpcClient::new(Vec::new(), &EnvSnapshot::empty()).unwrap();
    assert_eq!(client.network(), &Network::Mainnet);
    assert_eq!(client.primary_url(), MAINNET_HORIZON_URL);
    assert_eq!(client.alternate_urls(), [MAINNET_HORIZON_URL.to_string()]);
}

#[test]
fn test_alternate_urls_set_primary() {
    let client = RpcClient::new(
        [ClientOption::AlternateUrls(vec!["https://u1.org".into(), "https://u2.org".into()])],
        &EnvSnapshot::empty(),
    )
    .unwrap();
    assert_eq!(client.primary_url(), "https://u1.org");
    assert_eq!(client.alternate_urls(), ["https://u1.org".to_string(), "https://u2.org".to_string()]);

    let err = RpcClient::new(
        [ClientOption::AlternateUrls(vec!["https://u1.org".into(), "u2".into()])],
        &EnvSnapshot::empty(),
    )
    .unwrap_err();
    assert!(err.is_validation());
}

#[test]
fn test_later_options_override_earlier() {
    let client = RpcClient::new(
        [
            ClientOption::AlternateUrls(vec!["https://u1.org".into(), "https://u2.org".into()]),
            ClientOption::PrimaryUrl("https://only.org".into()),
        ],
        &EnvSnapshot::empty(),
    )
    .unwrap();
    assert_eq!(client.alternate_urls(), ["https://only.org".to_string()]);

    let client = RpcClient::new(
        [
            ClientOption::NetworkConfig(NetworkConfig::testnet()),
            ClientOption::Headers(HashMap::from([("X-A".to_string(), "1".to_string())])),
            ClientOption::CacheEnabled(false),
        ],
        &EnvSnapshot::empty(),
    )
    .unwrap();
    assert_eq!(client.primary_url(), TESTNET_HORIZON_URL);
    assert_eq!(client.headers()["X-A"], "1");
    assert!(!client.cache_enabled());
}

#[test]
fn test_options_file_end_to_end() {
    use std::io::Write;

    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(
        file,
        r#"
        network = "testnet"
        urls = ["https://a.example", "bogus", "https://b.example"]
        token = "file-token"
        circuit_breaker_threshold = 2
        circuit_breaker_timeout_ms = 1000

        [headers]
        X-Api-Key = "k"
        "#
    )
    .unwrap();

    let options = erst_rpc::config::load_options_file(file.path()).unwrap();
    let config = load_config(&options, &EnvSnapshot::empty()).unwrap();
    let client = RpcClient::from_configuration(config, &EnvSnapshot::empty()).unwrap();

    assert_eq!(client.network(), &Network::Testnet);
    assert_eq!(client.alternate_urls().len(), 2);
    assert_eq!(client.token(), Some("file-token"));
    assert_eq!(client.headers()["X-Api-Key"], "k");
    assert_eq!(client.tracker().threshold(), 2);
    assert_eq!(client.tracker().timeout(), Duration::from_secs(1));
}
