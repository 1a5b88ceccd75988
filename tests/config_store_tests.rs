use std::io::Write;
use tempfile::NamedTempFile;
use xchange::core::config::{ConfigError, ExchangeCredentials};
use xchange::core::settings::{BALANCE_FACTOR, MAX_TRADE_SIZE, MODULE_AUTOBUY, QUERY_DELAY};
use xchange::ConfigStore;

fn write_config(contents: &str) -> NamedTempFile {
    let mut file = tempfile::Builder::new()
        .suffix(".ini")
        .tempfile()
        .unwrap();
    file.write_all(contents.as_bytes()).unwrap();
    file.flush().unwrap();
    file
}

const CONFIG: &str = "\
[general]
blockedCoins = DOGE

[expert]
query-delay = 20

[trade]
max-trade-size = 0.05

[bittrex]
key = file-key
secret = file-secret
";

#[test]
fn test_load_from_file() {
    let file = write_config(CONFIG);
    let store = ConfigStore::load(file.path()).unwrap();

    assert_eq!(store.setting(&QUERY_DELAY), 20);
    assert!((store.setting(&MAX_TRADE_SIZE) - 0.05).abs() < f64::EPSILON);
    assert!((store.setting(&BALANCE_FACTOR) - 1.05).abs() < f64::EPSILON);
    assert!(!store.setting(&MODULE_AUTOBUY));
    assert!(store.is_blocked("DOGE"));

    let credentials = ExchangeCredentials::from_store(&store, "bittrex").unwrap();
    assert_eq!(credentials.api_key(), "file-key");
}

#[test]
fn test_missing_file_is_fatal() {
    let dir = tempfile::tempdir().unwrap();
    let result = ConfigStore::load(dir.path().join("missing.ini"));
    assert!(matches!(result, Err(ConfigError::Load(_))));
}

#[test]
fn test_refresh_rereads_file() {
    let file = write_config(CONFIG);
    let store = ConfigStore::load(file.path()).unwrap();
    assert_eq!(store.setting(&QUERY_DELAY), 20);

    std::fs::write(file.path(), "[expert]\nquery-delay = 45\n").unwrap();

    store.refresh().unwrap();
    assert_eq!(store.setting(&QUERY_DELAY), 45);
    assert!(!store.exists("bittrex.key"));
}

#[test]
fn test_missing_keys_use_defaults_at_any_depth() {
    let file = write_config(CONFIG);
    let store = ConfigStore::load(file.path()).unwrap();

    assert_eq!(store.get("expert.unknown", 5_u32), 5);
    assert_eq!(store.get("unknown.section", 6_u32), 6);
    assert_eq!(store.get("expert.query-delay.deeper", 7_u32), 7);
    assert_eq!(store.get("expert.unknown", 5_u32), 5);

    assert_eq!(
        store.fallback_keys(),
        vec![
            "expert.query-delay.deeper".to_string(),
            "expert.unknown".to_string(),
            "unknown.section".to_string(),
        ]
    );
}

#[test]
fn test_block_coin_marks_coin_blocked_once_reference_passes() {
    let file = write_config(CONFIG);
    let store = ConfigStore::load(file.path()).unwrap();

    let now = chrono::Utc::now().timestamp();
    store.block_coin_at("LTC", 0, now);
    assert_eq!(store.block_reference("LTC"), Some(now));
    assert!(!store.is_blocked_at("LTC", now));
    assert!(store.is_blocked_at("LTC", now + 1));
}
