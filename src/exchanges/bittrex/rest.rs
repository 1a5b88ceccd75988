use crate::core::errors::ExchangeError;
use crate::core::kernel::{extract_result, RestClient, RetryPolicy};
use crate::core::types::OrderSide;
use crate::exchanges::bittrex::types::{
    BittrexBalance, BittrexCurrency, BittrexDepositAddress, BittrexMarket, BittrexMarketSummary,
    BittrexOpenOrder, BittrexOrder, BittrexOrderBook, BittrexOrderUuid,
};
use crate::exchanges::bittrex::ENVELOPE;
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::time::Duration;
use tracing::instrument;

/// Transport failures are retried five times, one second apart.
pub const REQUEST_RETRY: RetryPolicy = RetryPolicy::new(5, Duration::from_secs(1));

/// Fresh deposit addresses take a while to generate and the API rejects the
/// lookup meanwhile, so any failure is retried.
pub const DEPOSIT_ADDRESS_RETRY: RetryPolicy =
    RetryPolicy::new(3, Duration::from_secs(30)).retry_if(any_error);

const fn any_error(_: &ExchangeError) -> bool {
    true
}

/// Thin typed wrapper around `RestClient` for the Bittrex v1.1 API
#[derive(Debug, Clone)]
pub struct BittrexRestClient<R: RestClient> {
    client: R,
    retry: RetryPolicy,
    deposit_retry: RetryPolicy,
}

impl<R: RestClient> BittrexRestClient<R> {
    pub fn new(client: R) -> Self {
        Self {
            client,
            retry: REQUEST_RETRY,
            deposit_retry: DEPOSIT_ADDRESS_RETRY,
        }
    }

    async fn query(
        &self,
        endpoint: &str,
        params: &[(&str, &str)],
        authenticated: bool,
    ) -> Result<Value, ExchangeError> {
        let raw = self
            .retry
            .run(endpoint, || self.client.get(endpoint, params, authenticated))
            .await?;
        extract_result(&raw, &ENVELOPE)
    }

    async fn query_typed<T: DeserializeOwned>(
        &self,
        endpoint: &str,
        params: &[(&str, &str)],
        authenticated: bool,
    ) -> Result<T, ExchangeError> {
        let result = self.query(endpoint, params, authenticated).await?;
        decode(endpoint, result)
    }

    pub async fn get_markets(&self) -> Result<Vec<BittrexMarket>, ExchangeError> {
        self.query_typed("/public/getmarkets", &[], false).await
    }

    pub async fn get_currencies(&self) -> Result<Vec<BittrexCurrency>, ExchangeError> {
        self.query_typed("/public/getcurrencies", &[], false).await
    }

    pub async fn get_market_summaries(&self) -> Result<Vec<BittrexMarketSummary>, ExchangeError> {
        self.query_typed("/public/getmarketsummaries", &[], false)
            .await
    }

    /// Order book at depth one, or `None` when the exchange has no book.
    pub async fn get_order_book(
        &self,
        market: &str,
    ) -> Result<Option<BittrexOrderBook>, ExchangeError> {
        let params = [("depth", "1"), ("type", "both"), ("market", market)];
        let result = self.query("/public/getorderbook", &params, false).await?;

        let empty = match &result {
            Value::Null => true,
            Value::Array(items) => items.is_empty(),
            Value::Object(fields) => fields.is_empty(),
            _ => false,
        };
        if empty {
            return Ok(None);
        }
        decode("/public/getorderbook", result).map(Some)
    }

    pub async fn get_balances(&self) -> Result<Vec<BittrexBalance>, ExchangeError> {
        self.query_typed("/account/getbalances", &[], true).await
    }

    /// Raw balance list as returned by the exchange.
    pub async fn get_balances_raw(&self) -> Result<Value, ExchangeError> {
        self.query("/account/getbalances", &[], true).await
    }

    pub async fn get_order_history(&self, market: &str) -> Result<Vec<BittrexOrder>, ExchangeError> {
        let params = [("market", market)];
        self.query_typed("/account/getorderhistory", &params, true)
            .await
    }

    pub async fn get_open_orders(&self) -> Result<Vec<BittrexOpenOrder>, ExchangeError> {
        self.query_typed("/market/getopenorders", &[], true).await
    }

    /// Place a limit order and return its uuid.
    #[instrument(skip(self), fields(exchange = "bittrex"))]
    pub async fn place_limit_order(
        &self,
        side: OrderSide,
        market: &str,
        quantity: &str,
        rate: &str,
    ) -> Result<String, ExchangeError> {
        let endpoint = match side {
            OrderSide::Buy => "/market/buylimit",
            OrderSide::Sell => "/market/selllimit",
        };
        let params = [("market", market), ("quantity", quantity), ("rate", rate)];
        let order: BittrexOrderUuid = self.query_typed(endpoint, &params, true).await?;
        Ok(order.uuid)
    }

    pub async fn cancel_order(&self, uuid: &str) -> Result<Value, ExchangeError> {
        let params = [("uuid", uuid)];
        self.query("/market/cancel", &params, true).await
    }

    /// Deposit address for `currency`, waiting for the exchange to generate
    /// one if needed.
    #[instrument(skip(self), fields(exchange = "bittrex"))]
    pub async fn get_deposit_address(&self, currency: &str) -> Result<String, ExchangeError> {
        let params = [("currency", currency)];
        let deposit: BittrexDepositAddress = self
            .deposit_retry
            .run("/account/getdepositaddress", || {
                self.query_typed("/account/getdepositaddress", &params, true)
            })
            .await?;
        Ok(deposit.address)
    }

    #[instrument(skip(self, address), fields(exchange = "bittrex"))]
    pub async fn withdraw(
        &self,
        currency: &str,
        quantity: &str,
        address: &str,
    ) -> Result<Value, ExchangeError> {
        let params = [
            ("currency", currency),
            ("quantity", quantity),
            ("address", address),
        ];
        self.query("/account/withdraw", &params, true).await
    }
}

fn decode<T: DeserializeOwned>(endpoint: &str, result: Value) -> Result<T, ExchangeError> {
    serde_json::from_value(result).map_err(|e| {
        ExchangeError::DeserializationError(format!("Failed to parse {} result: {}", endpoint, e))
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_retry_policies() {
        assert_eq!(REQUEST_RETRY.max_attempts(), 5);
        assert_eq!(REQUEST_RETRY.delay(), Duration::from_secs(1));
        assert_eq!(DEPOSIT_ADDRESS_RETRY.max_attempts(), 3);
        assert_eq!(DEPOSIT_ADDRESS_RETRY.delay(), Duration::from_secs(30));
    }

    #[test]
    fn test_decode_reports_endpoint() {
        let err =
            decode::<Vec<BittrexMarket>>("/public/getmarkets", Value::Bool(true)).unwrap_err();
        assert!(err.to_string().contains("/public/getmarkets"));
    }
}
