use crate::core::config::ConfigStore;
use crate::core::errors::ExchangeError;
use crate::core::kernel::RestClient;
use crate::core::traits::MarketDataSource;
use crate::core::types::{ExchangeMetadata, Orderbook, Tickers};
use crate::exchanges::bittrex::conversions::{
    build_exchange_metadata, convert_order_book, convert_tickers, market_name,
};
use crate::exchanges::bittrex::rest::BittrexRestClient;
use crate::exchanges::bittrex::NAME;
use async_trait::async_trait;
use parking_lot::RwLock;
use std::sync::Arc;
use tracing::{debug, info, instrument};

/// Market data operations for Bittrex
pub struct MarketData<R: RestClient> {
    rest: BittrexRestClient<R>,
    config: Arc<ConfigStore>,
    metadata: Arc<RwLock<ExchangeMetadata>>,
}

impl<R: RestClient> MarketData<R> {
    pub fn new(
        rest: BittrexRestClient<R>,
        config: Arc<ConfigStore>,
        metadata: Arc<RwLock<ExchangeMetadata>>,
    ) -> Self {
        Self {
            rest,
            config,
            metadata,
        }
    }
}

#[async_trait]
impl<R: RestClient> MarketDataSource for MarketData<R> {
    async fn get_tickers(&self, currency: &str) -> Result<Tickers, ExchangeError> {
        let summaries = self.rest.get_market_summaries().await?;
        Ok(convert_tickers(&summaries, currency))
    }

    #[instrument(skip(self), fields(exchange = NAME))]
    async fn fetch_orderbook(
        &self,
        tradeable: &str,
        currency: &str,
    ) -> Result<Option<Orderbook>, ExchangeError> {
        let book = self
            .rest
            .get_order_book(&market_name(tradeable, currency))
            .await?;

        let orderbook = book.and_then(|book| convert_order_book(&book, tradeable, currency));
        if orderbook.is_none() {
            debug!(tradeable, currency, "Orderbook has an empty side");
        }
        Ok(orderbook)
    }

    async fn refresh_exchange_data(&self) -> Result<(), ExchangeError> {
        let markets = self.rest.get_markets().await?;
        let currencies = self.rest.get_currencies().await?;

        let metadata = build_exchange_metadata(&markets, &currencies, &self.config);
        info!(
            exchange = NAME,
            pairs = metadata.pairs.len(),
            coins = metadata.transfer_fees.len(),
            "Refreshed exchange data"
        );

        *self.metadata.write() = metadata;
        Ok(())
    }

    async fn metadata(&self) -> ExchangeMetadata {
        self.metadata.read().clone()
    }
}
