//! Kernel - exchange-agnostic transport layer
//!
//! The kernel holds everything a connector needs to talk to a remote API
//! without knowing which exchange it is talking to:
//!
//! ## Transport
//! - `RestClient`: one HTTP attempt, raw body back
//! - `ReqwestRest`: reqwest implementation with a lazily created, shared client
//!
//! ## Authentication
//! - `Signer`: pluggable request signing
//! - `NonceGenerator`: strictly increasing nonces per credential
//!
//! ## Replies
//! - `extract_result`: envelope validation with exchange-supplied field names
//!
//! ## Resilience
//! - `RetryPolicy`: fixed-interval retry with a retryable-error predicate
//!
//! # Usage
//! ```rust,no_run
//! use xchange::core::kernel::*;
//! use std::time::Duration;
//!
//! # async fn example() -> Result<(), xchange::core::errors::ExchangeError> {
//! let config = RestClientConfig::new(
//!     "https://bittrex.com/api/v1.1".to_string(),
//!     "bittrex".to_string(),
//! );
//! let rest = RestClientBuilder::new(config).build();
//! let policy = RetryPolicy::new(5, Duration::from_secs(1));
//!
//! let raw = policy
//!     .run("getmarkets", || rest.get("/public/getmarkets", &[], false))
//!     .await?;
//! let markets = extract_result(&raw, &EnvelopeFields::default())?;
//! # let _ = markets;
//! # Ok(())
//! # }
//! ```

pub mod envelope;
pub mod rest;
pub mod retry;
pub mod signer;

// Re-export key types for convenience
pub use envelope::{extract_result, EnvelopeFields};
pub use rest::{ReqwestRest, RestClient, RestClientBuilder, RestClientConfig};
pub use retry::RetryPolicy;
pub use signer::{canonical_query, with_query, NonceGenerator, SignatureResult, SignedRequest, Signer};
