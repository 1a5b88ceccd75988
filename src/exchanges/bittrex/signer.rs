use crate::core::config::ExchangeCredentials;
use crate::core::errors::ExchangeError;
use crate::core::kernel::{canonical_query, with_query, NonceGenerator, SignatureResult, SignedRequest, Signer};
use hmac::{Hmac, Mac};
use secrecy::{ExposeSecret, Secret};
use sha2::Sha512;
use std::collections::HashMap;

type HmacSha512 = Hmac<Sha512>;

pub const SIGNATURE_HEADER: &str = "apisign";

/// Bittrex HMAC-SHA512 signer
///
/// Appends `apikey` and a fresh `nonce` to the method parameters and signs the
/// complete request URL. One signer exists per set of credentials so nonces
/// never repeat.
#[derive(Debug)]
pub struct BittrexSigner {
    api_key: Secret<String>,
    secret_key: Secret<String>,
    nonces: NonceGenerator,
}

impl BittrexSigner {
    pub fn new(api_key: String, secret_key: String) -> Self {
        Self {
            api_key: Secret::new(api_key),
            secret_key: Secret::new(secret_key),
            nonces: NonceGenerator::new(),
        }
    }

    pub fn from_credentials(credentials: &ExchangeCredentials) -> Self {
        Self::new(
            credentials.api_key().to_string(),
            credentials.secret_key().to_string(),
        )
    }

    /// Hex-encoded HMAC-SHA512 of `payload`.
    pub fn sign(&self, payload: &str) -> Result<String, ExchangeError> {
        let mut mac = HmacSha512::new_from_slice(self.secret_key.expose_secret().as_bytes())
            .map_err(|_| ExchangeError::AuthError("Invalid secret key".to_string()))?;
        mac.update(payload.as_bytes());
        Ok(hex::encode(mac.finalize().into_bytes()))
    }
}

impl Signer for BittrexSigner {
    fn sign_request(
        &self,
        _method: &str,
        url: &str,
        query_params: &[(&str, &str)],
    ) -> SignatureResult {
        let nonce = self.nonces.next().to_string();

        let mut params = query_params.to_vec();
        params.push(("apikey", self.api_key.expose_secret().as_str()));
        params.push(("nonce", nonce.as_str()));

        let url = with_query(url, &canonical_query(&params));
        let signature = self.sign(&url)?;

        let mut headers = HashMap::new();
        headers.insert(SIGNATURE_HEADER.to_string(), signature);

        Ok(SignedRequest { url, headers })
    }
}
