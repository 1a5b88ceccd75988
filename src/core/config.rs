use ::config::{Config, File, FileFormat, Map, Value, ValueKind};
use parking_lot::{Mutex, RwLock};
use secrecy::{ExposeSecret, Secret};
use serde::de::DeserializeOwned;
use std::collections::{HashMap, HashSet};
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

/// The one settlement currency every tradeable is priced against.
pub const BASE_CURRENCY: &str = "BTC";

/// Comma-separated list of coins that must never be traded.
pub const BLOCKED_COINS: &str = "general.blockedCoins";

/// Default location of the settings file.
pub const DEFAULT_CONFIG_PATH: &str = "config.ini";

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Configuration not found or invalid: {0}")]
    Load(#[from] ::config::ConfigError),

    #[error("Missing configuration key: {0}")]
    MissingKey(String),

    #[error("Invalid configuration: {0}")]
    InvalidConfiguration(String),
}

enum Source {
    File(PathBuf),
    Inline(String),
}

/// Process-wide settings plus the small amount of mutable trading state.
///
/// The settings tree is loaded wholesale by [`ConfigStore::refresh`] and is
/// read-mostly afterwards. Only the runtime block list and the traded-coin
/// set change while the bot runs. Share it behind an `Arc`.
pub struct ConfigStore {
    source: Source,
    tree: RwLock<Map<String, Value>>,
    fallbacks: Mutex<HashSet<String>>,
    block_list: RwLock<HashMap<String, i64>>,
    traded_coins: RwLock<HashSet<String>>,
}

impl std::fmt::Debug for ConfigStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let source = match &self.source {
            Source::File(path) => path.display().to_string(),
            Source::Inline(_) => "<inline>".to_string(),
        };
        f.debug_struct("ConfigStore")
            .field("source", &source)
            .field("sections", &self.tree.read().len())
            .finish_non_exhaustive()
    }
}

impl ConfigStore {
    /// Create an empty store bound to an INI file. Call [`refresh`](Self::refresh)
    /// before reading from it.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self::with_source(Source::File(path.into()))
    }

    /// Create and load a store from an INI file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let store = Self::new(path.as_ref());
        store.refresh()?;
        Ok(store)
    }

    /// Create and load a store from INI text held in memory.
    pub fn from_ini_str(contents: &str) -> Result<Self, ConfigError> {
        let store = Self::with_source(Source::Inline(contents.to_string()));
        store.refresh()?;
        Ok(store)
    }

    fn with_source(source: Source) -> Self {
        Self {
            source,
            tree: RwLock::new(Map::new()),
            fallbacks: Mutex::new(HashSet::new()),
            block_list: RwLock::new(HashMap::new()),
            traded_coins: RwLock::new(HashSet::new()),
        }
    }

    /// (Re)load the settings tree from the bound source.
    ///
    /// A missing, unparsable or empty source is a configuration error; the
    /// previously loaded tree is kept in that case.
    pub fn refresh(&self) -> Result<(), ConfigError> {
        let builder = Config::builder();
        let builder = match &self.source {
            Source::File(path) => builder
                .add_source(File::new(&path.to_string_lossy(), FileFormat::Ini).required(true)),
            Source::Inline(contents) => {
                builder.add_source(File::from_str(contents, FileFormat::Ini))
            }
        };

        let tree: Map<String, Value> = builder.build()?.try_deserialize()?;

        if tree.is_empty() {
            return Err(ConfigError::InvalidConfiguration(
                "Configuration not found or invalid!".to_string(),
            ));
        }

        debug!(sections = tree.len(), "Configuration loaded");
        *self.tree.write() = tree;
        Ok(())
    }

    /// Look up a dotted key, converting the stored value to `T`.
    ///
    /// Returns `default` when any segment of the path is absent (noting the
    /// key once) or when the stored value cannot be converted.
    pub fn get<T: DeserializeOwned>(&self, key: &str, default: T) -> T {
        let Some(value) = self.lookup(key) else {
            return default;
        };

        match value.try_deserialize() {
            Ok(converted) => converted,
            Err(e) => {
                warn!(key, error = %e, "Unusable configuration value, using default");
                default
            }
        }
    }

    /// Look up a dotted key as a string.
    pub fn get_string(&self, key: &str) -> Option<String> {
        self.lookup(key)
            .filter(|value| !matches!(value.kind, ValueKind::Nil))
            .and_then(|value| value.into_string().ok())
    }

    /// True if the key holds a non-empty value.
    pub fn exists(&self, key: &str) -> bool {
        self.get_string(key).is_some_and(|value| !value.is_empty())
    }

    /// Keys that have fallen back to their default at least once.
    pub fn fallback_keys(&self) -> Vec<String> {
        let mut keys: Vec<String> = self.fallbacks.lock().iter().cloned().collect();
        keys.sort();
        keys
    }

    fn lookup(&self, key: &str) -> Option<Value> {
        let found = descend(&self.tree.read(), key).cloned();
        if found.is_none() && self.fallbacks.lock().insert(key.to_string()) {
            debug!(key, "Using default value");
        }
        found
    }

    pub fn is_currency(&self, coin: &str) -> bool {
        coin == BASE_CURRENCY
    }

    pub fn is_blocked(&self, coin: &str) -> bool {
        self.is_blocked_at(coin, now())
    }

    /// Block check against an explicit unix time in seconds.
    ///
    /// A runtime entry counts as blocking when its reference time is zero or
    /// already in the past.
    pub fn is_blocked_at(&self, coin: &str, now: i64) -> bool {
        if let Some(blocked) = self.get_string(BLOCKED_COINS) {
            if blocked.split(',').any(|entry| entry.trim() == coin) {
                info!(coin, "Skipping coin (Blocked from config)");
                return true;
            }
        }

        let runtime_blocked = self
            .block_list
            .read()
            .get(coin)
            .is_some_and(|&reference| reference == 0 || reference < now);
        if runtime_blocked {
            info!(coin, "Skipping coin (Blocked during runtime)");
        }
        runtime_blocked
    }

    pub fn block_coin(&self, coin: &str, expiration_seconds: i64) {
        self.block_coin_at(coin, expiration_seconds, now());
    }

    pub fn block_coin_at(&self, coin: &str, expiration_seconds: i64, now: i64) {
        self.block_list
            .write()
            .insert(coin.to_string(), now + expiration_seconds);
    }

    /// Reference time stored for a runtime-blocked coin.
    pub fn block_reference(&self, coin: &str) -> Option<i64> {
        self.block_list.read().get(coin).copied()
    }

    pub fn is_traded(&self, coin: &str) -> bool {
        self.traded_coins.read().contains(coin)
    }

    pub fn set_traded_coins<I, S>(&self, coins: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        *self.traded_coins.write() = coins.into_iter().map(Into::into).collect();
    }
}

fn now() -> i64 {
    chrono::Utc::now().timestamp()
}

fn descend<'a>(tree: &'a Map<String, Value>, key: &str) -> Option<&'a Value> {
    let mut segments = key.split('.');
    let mut current = segment(tree, segments.next()?)?;
    for name in segments {
        match &current.kind {
            ValueKind::Table(table) => current = segment(table, name)?,
            _ => return None,
        }
    }
    Some(current)
}

// Settings files mix camelCase and kebab-case keys; match either spelling.
fn segment<'a>(table: &'a Map<String, Value>, name: &str) -> Option<&'a Value> {
    table.get(name).or_else(|| {
        table
            .iter()
            .find(|(candidate, _)| candidate.eq_ignore_ascii_case(name))
            .map(|(_, value)| value)
    })
}

/// API credentials for one exchange account.
#[derive(Debug, Clone)]
pub struct ExchangeCredentials {
    api_key: Secret<String>,
    secret_key: Secret<String>,
}

impl ExchangeCredentials {
    #[must_use]
    pub fn new(api_key: String, secret_key: String) -> Self {
        Self {
            api_key: Secret::new(api_key),
            secret_key: Secret::new(secret_key),
        }
    }

    /// Read `{exchange}.key` and `{exchange}.secret` from the store.
    pub fn from_store(store: &ConfigStore, exchange: &str) -> Result<Self, ConfigError> {
        let key_path = format!("{}.key", exchange);
        let secret_path = format!("{}.secret", exchange);

        let api_key = store
            .get_string(&key_path)
            .ok_or(ConfigError::MissingKey(key_path))?;
        let secret_key = store
            .get_string(&secret_path)
            .ok_or(ConfigError::MissingKey(secret_path))?;

        Ok(Self::new(api_key, secret_key))
    }

    #[must_use]
    pub fn has_credentials(&self) -> bool {
        !self.api_key.expose_secret().is_empty() && !self.secret_key.expose_secret().is_empty()
    }

    /// Get API key (use carefully - exposes secret)
    pub fn api_key(&self) -> &str {
        self.api_key.expose_secret()
    }

    /// Get secret key (use carefully - exposes secret)
    pub fn secret_key(&self) -> &str {
        self.secret_key.expose_secret()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = "\
[general]
blockedCoins = DOGE, XRP
min-btc-xfer = 0.05

[expert]
balance-factor = 1.2
query-delay = 15

[bittrex]
key = my-key
secret = my-secret
empty =
";

    fn store() -> ConfigStore {
        ConfigStore::from_ini_str(SAMPLE).unwrap()
    }

    #[test]
    fn test_get_descends_sections() {
        let store = store();
        assert!((store.get("expert.balance-factor", 1.05_f64) - 1.2).abs() < f64::EPSILON);
        assert_eq!(store.get("expert.query-delay", 10_u64), 15);
        assert_eq!(store.get_string("bittrex.key").as_deref(), Some("my-key"));
    }

    #[test]
    fn test_missing_key_falls_back_once() {
        let store = store();
        assert_eq!(store.get("expert.max-pairs-per-run", 10_u32), 10);
        assert_eq!(store.get("expert.max-pairs-per-run", 10_u32), 10);
        assert_eq!(store.get("nosection.key", 7_u32), 7);
        assert_eq!(
            store.fallback_keys(),
            vec![
                "expert.max-pairs-per-run".to_string(),
                "nosection.key".to_string()
            ]
        );
    }

    #[test]
    fn test_descending_into_a_leaf_falls_back() {
        let store = store();
        assert_eq!(store.get("expert.query-delay.deeper", 3_u32), 3);
    }

    #[test]
    fn test_exists() {
        let store = store();
        assert!(store.exists("bittrex.secret"));
        assert!(!store.exists("bittrex.empty"));
        assert!(!store.exists("bittrex.passphrase"));
    }

    #[test]
    fn test_is_currency() {
        let store = store();
        assert!(store.is_currency("BTC"));
        assert!(!store.is_currency("ETH"));
    }

    #[test]
    fn test_static_block_list_is_trimmed() {
        let store = store();
        assert!(store.is_blocked("DOGE"));
        assert!(store.is_blocked("XRP"));
        assert!(!store.is_blocked("LTC"));
    }

    #[test]
    fn test_runtime_block_boundary() {
        let store = store();
        store.block_coin_at("LTC", 0, 1_000);
        assert_eq!(store.block_reference("LTC"), Some(1_000));

        // Reference equal to now is not yet in the past.
        assert!(!store.is_blocked_at("LTC", 1_000));
        assert!(store.is_blocked_at("LTC", 1_001));
    }

    #[test]
    fn test_runtime_block_with_future_reference() {
        let store = store();
        store.block_coin_at("ETH", 600, 1_000);
        assert!(!store.is_blocked_at("ETH", 1_300));
        assert!(store.is_blocked_at("ETH", 1_601));
    }

    #[test]
    fn test_zero_reference_always_blocks() {
        let store = store();
        store.block_coin_at("NEO", 0, 0);
        assert!(store.is_blocked_at("NEO", 0));
    }

    #[test]
    fn test_traded_coins_replaced_wholesale() {
        let store = store();
        store.set_traded_coins(["ABC", "XYZ"]);
        assert!(store.is_traded("ABC"));
        store.set_traded_coins(vec!["LTC".to_string()]);
        assert!(!store.is_traded("ABC"));
        assert!(store.is_traded("LTC"));
    }

    #[test]
    fn test_credentials_from_store() {
        let store = store();
        let credentials = ExchangeCredentials::from_store(&store, "bittrex").unwrap();
        assert_eq!(credentials.api_key(), "my-key");
        assert_eq!(credentials.secret_key(), "my-secret");
        assert!(credentials.has_credentials());

        let missing = ExchangeCredentials::from_store(&store, "poloniex").unwrap_err();
        assert!(missing.to_string().contains("poloniex.key"));
    }

    #[test]
    fn test_empty_source_is_invalid() {
        assert!(ConfigStore::from_ini_str("").is_err());
    }
}
