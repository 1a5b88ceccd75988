use crate::core::errors::ExchangeError;
use crate::core::kernel::signer::{canonical_query, with_query, Signer};
use async_trait::async_trait;
use reqwest::{Client, Method};
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::OnceCell;
use tracing::{instrument, trace};

/// REST client trait for making HTTP requests
///
/// One call is one attempt: retrying and interpreting the body are left to
/// the exchange layer. Implementations return the raw response text.
#[async_trait]
pub trait RestClient: Send + Sync {
    /// Make a GET request
    ///
    /// # Arguments
    /// * `endpoint` - The API endpoint path
    /// * `query_params` - Query parameters as key-value pairs
    /// * `authenticated` - Whether to sign the request
    ///
    /// # Returns
    /// The response body as text
    async fn get(
        &self,
        endpoint: &str,
        query_params: &[(&str, &str)],
        authenticated: bool,
    ) -> Result<String, ExchangeError>;
}

/// Configuration for the REST client
#[derive(Clone, Debug)]
pub struct RestClientConfig {
    /// Base URL for the API
    pub base_url: String,
    /// Exchange name for logging and tracing
    pub exchange_name: String,
    /// Connection establishment timeout in seconds
    pub connect_timeout_seconds: u64,
    /// Total request timeout in seconds
    pub timeout_seconds: u64,
    /// User agent string to include in requests
    pub user_agent: String,
    /// Skip TLS peer verification
    pub accept_invalid_certs: bool,
}

impl RestClientConfig {
    /// Create a new configuration
    ///
    /// # Arguments
    /// * `base_url` - Base URL for the API
    /// * `exchange_name` - Name of the exchange
    pub fn new(base_url: String, exchange_name: String) -> Self {
        Self {
            base_url,
            exchange_name,
            connect_timeout_seconds: 10,
            timeout_seconds: 180,
            user_agent: "Mozilla/4.0 (compatible; xchange Rust client)".to_string(),
            accept_invalid_certs: false,
        }
    }

    pub fn with_connect_timeout(mut self, connect_timeout_seconds: u64) -> Self {
        self.connect_timeout_seconds = connect_timeout_seconds;
        self
    }

    /// Set the request timeout
    pub fn with_timeout(mut self, timeout_seconds: u64) -> Self {
        self.timeout_seconds = timeout_seconds;
        self
    }

    /// Set the user agent string
    pub fn with_user_agent(mut self, user_agent: String) -> Self {
        self.user_agent = user_agent;
        self
    }

    pub fn with_accept_invalid_certs(mut self, accept_invalid_certs: bool) -> Self {
        self.accept_invalid_certs = accept_invalid_certs;
        self
    }
}

/// Builder for creating REST client instances
pub struct RestClientBuilder {
    config: RestClientConfig,
    signer: Option<Arc<dyn Signer>>,
}

impl RestClientBuilder {
    pub fn new(config: RestClientConfig) -> Self {
        Self {
            config,
            signer: None,
        }
    }

    /// Set the signer for authenticated requests
    pub fn with_signer(mut self, signer: Arc<dyn Signer>) -> Self {
        self.signer = Some(signer);
        self
    }

    /// Build the REST client
    ///
    /// The underlying HTTP client is not created until the first request.
    pub fn build(self) -> ReqwestRest {
        ReqwestRest {
            client: Arc::new(OnceCell::new()),
            config: self.config,
            signer: self.signer,
        }
    }
}

/// Implementation of `RestClient` using reqwest
///
/// Clones share one lazily created HTTP client, so every part of a connector
/// reuses the same connection pool. `reqwest::Client` is internally
/// synchronized; concurrent calls through clones are safe.
#[derive(Clone)]
pub struct ReqwestRest {
    client: Arc<OnceCell<Client>>,
    config: RestClientConfig,
    signer: Option<Arc<dyn Signer>>,
}

impl std::fmt::Debug for ReqwestRest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ReqwestRest")
            .field("config", &self.config)
            .field("has_signer", &self.signer.is_some())
            .field("connected", &self.client.initialized())
            .finish_non_exhaustive()
    }
}

impl ReqwestRest {
    pub fn config(&self) -> &RestClientConfig {
        &self.config
    }

    /// Whether the HTTP client has been created yet
    pub fn is_connected(&self) -> bool {
        self.client.initialized()
    }

    /// Build the full URL for an endpoint
    fn build_url(&self, endpoint: &str) -> String {
        format!("{}{}", self.config.base_url, endpoint)
    }

    async fn client(&self) -> Result<&Client, ExchangeError> {
        self.client
            .get_or_try_init(|| async {
                Client::builder()
                    .connect_timeout(Duration::from_secs(self.config.connect_timeout_seconds))
                    .timeout(Duration::from_secs(self.config.timeout_seconds))
                    .user_agent(&self.config.user_agent)
                    .danger_accept_invalid_certs(self.config.accept_invalid_certs)
                    .build()
                    .map_err(|e| {
                        ExchangeError::NetworkError(format!("Failed to build HTTP client: {}", e))
                    })
            })
            .await
    }

    fn prepare(
        &self,
        method: &Method,
        endpoint: &str,
        query_params: &[(&str, &str)],
        authenticated: bool,
    ) -> Result<(String, HashMap<String, String>), ExchangeError> {
        let url = self.build_url(endpoint);

        if authenticated {
            let signer = self.signer.as_ref().ok_or_else(|| {
                ExchangeError::AuthError(
                    "Authentication required but no signer provided".to_string(),
                )
            })?;
            let signed = signer.sign_request(method.as_str(), &url, query_params)?;
            Ok((signed.url, signed.headers))
        } else {
            Ok((
                with_query(&url, &canonical_query(query_params)),
                HashMap::new(),
            ))
        }
    }

    #[instrument(skip(self, query_params), fields(exchange = %self.config.exchange_name, method = %method, endpoint = %endpoint))]
    async fn make_request(
        &self,
        method: Method,
        endpoint: &str,
        query_params: &[(&str, &str)],
        authenticated: bool,
    ) -> Result<String, ExchangeError> {
        let (url, headers) = self.prepare(&method, endpoint, query_params, authenticated)?;

        let mut request = self.client().await?.request(method, &url);
        for (key, value) in &headers {
            request = request.header(key, value);
        }

        let response = request
            .send()
            .await
            .map_err(|e| ExchangeError::NetworkError(format!("Could not get reply: {}", e)))?;

        let status = response.status();
        let body = response.text().await.map_err(|e| {
            ExchangeError::NetworkError(format!("Failed to read response body: {}", e))
        })?;

        trace!("Response body: {}", body);

        // Gateway and overload pages carry no envelope; treat them like a
        // dropped connection. Other statuses still carry the API's reply.
        if status.is_server_error() {
            return Err(ExchangeError::NetworkError(format!(
                "Server returned {}",
                status
            )));
        }

        Ok(body)
    }
}

#[async_trait]
impl RestClient for ReqwestRest {
    async fn get(
        &self,
        endpoint: &str,
        query_params: &[(&str, &str)],
        authenticated: bool,
    ) -> Result<String, ExchangeError> {
        self.make_request(Method::GET, endpoint, query_params, authenticated)
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::kernel::signer::{SignatureResult, SignedRequest};

    struct StaticSigner;

    impl Signer for StaticSigner {
        fn sign_request(
            &self,
            _method: &str,
            url: &str,
            query_params: &[(&str, &str)],
        ) -> SignatureResult {
            let mut params = query_params.to_vec();
            params.push(("apikey", "k"));
            let mut headers = HashMap::new();
            headers.insert("apisign".to_string(), "sig".to_string());
            Ok(SignedRequest {
                url: with_query(url, &canonical_query(&params)),
                headers,
            })
        }
    }

    fn config() -> RestClientConfig {
        RestClientConfig::new("https://api.test/v1".to_string(), "test".to_string())
    }

    #[test]
    fn test_defaults_match_exchange_requirements() {
        let config = config();
        assert_eq!(config.connect_timeout_seconds, 10);
        assert_eq!(config.timeout_seconds, 180);
        assert!(!config.accept_invalid_certs);
    }

    #[test]
    fn test_client_is_created_lazily() {
        let rest = RestClientBuilder::new(config()).build();
        assert!(!rest.is_connected());
    }

    #[test]
    fn test_prepare_public_request() {
        let rest = RestClientBuilder::new(config()).build();
        let (url, headers) = rest
            .prepare(&Method::GET, "/public/getorderbook", &[("market", "BTC-XYZ")], false)
            .unwrap();
        assert_eq!(url, "https://api.test/v1/public/getorderbook?market=BTC-XYZ");
        assert!(headers.is_empty());
    }

    #[test]
    fn test_prepare_signed_request() {
        let rest = RestClientBuilder::new(config())
            .with_signer(Arc::new(StaticSigner))
            .build();
        let (url, headers) = rest
            .prepare(&Method::GET, "/account/getbalances", &[], true)
            .unwrap();
        assert_eq!(url, "https://api.test/v1/account/getbalances?apikey=k");
        assert_eq!(headers.get("apisign").map(String::as_str), Some("sig"));
    }

    #[test]
    fn test_signed_request_without_signer_fails() {
        let rest = RestClientBuilder::new(config()).build();
        let err = rest
            .prepare(&Method::GET, "/account/getbalances", &[], true)
            .unwrap_err();
        assert!(matches!(err, ExchangeError::AuthError(_)));
    }
}
