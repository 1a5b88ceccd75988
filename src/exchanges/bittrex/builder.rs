use crate::core::config::{ConfigStore, ExchangeCredentials};
use crate::core::errors::ExchangeError;
use crate::core::kernel::{ReqwestRest, RestClientBuilder, RestClientConfig};
use crate::exchanges::bittrex::{
    connector::BittrexConnector, signer::BittrexSigner, BASE_URL, CONFIG_SECTION,
};
use std::sync::Arc;

/// REST settings for the Bittrex API.
///
/// The API is reached with certificate verification disabled.
pub fn rest_config() -> RestClientConfig {
    RestClientConfig::new(BASE_URL.to_string(), CONFIG_SECTION.to_string())
        .with_accept_invalid_certs(true)
}

/// Create a Bittrex connector with credentials read from `bittrex.key` and
/// `bittrex.secret`.
pub fn build_connector(
    config: Arc<ConfigStore>,
) -> Result<BittrexConnector<ReqwestRest>, ExchangeError> {
    let credentials = ExchangeCredentials::from_store(&config, CONFIG_SECTION)?;
    build_connector_with_credentials(&credentials, config)
}

pub fn build_connector_with_credentials(
    credentials: &ExchangeCredentials,
    config: Arc<ConfigStore>,
) -> Result<BittrexConnector<ReqwestRest>, ExchangeError> {
    if !credentials.has_credentials() {
        return Err(ExchangeError::AuthError(
            "Bittrex API key and secret must not be empty".to_string(),
        ));
    }

    let signer = BittrexSigner::from_credentials(credentials);
    let rest = RestClientBuilder::new(rest_config())
        .with_signer(Arc::new(signer))
        .build();

    Ok(BittrexConnector::new(rest, config))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rest_config() {
        let config = rest_config();
        assert_eq!(config.base_url, "https://bittrex.com/api/v1.1");
        assert!(config.accept_invalid_certs);
        assert_eq!(config.timeout_seconds, 180);
    }

    #[test]
    fn test_missing_credentials_fail() {
        let store = ConfigStore::from_ini_str("[general]\ncancel-stray-orders = true\n").unwrap();
        let err = build_connector(Arc::new(store)).err().unwrap();
        assert!(matches!(err, ExchangeError::ConfigError(_)));
        assert!(err.to_string().contains("bittrex.key"));
    }

    #[test]
    fn test_builds_from_store() {
        let store = ConfigStore::from_ini_str("[bittrex]\nkey = abc\nsecret = def\n").unwrap();
        assert!(build_connector(Arc::new(store)).is_ok());
    }

    #[test]
    fn test_empty_credentials_fail() {
        let credentials = ExchangeCredentials::new(String::new(), String::new());
        let store = ConfigStore::from_ini_str("[bittrex]\nkey = abc\nsecret = def\n").unwrap();
        let err = build_connector_with_credentials(&credentials, Arc::new(store))
            .err()
            .unwrap();
        assert!(matches!(err, ExchangeError::AuthError(_)));
    }
}
