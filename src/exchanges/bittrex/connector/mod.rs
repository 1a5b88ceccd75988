use crate::core::config::ConfigStore;
use crate::core::errors::ExchangeError;
use crate::core::kernel::RestClient;
use crate::core::traits::{
    fees, AccountInfo, ExchangeConnector, FeeModel, MarketDataSource, OrderPlacer,
};
use crate::core::types::{
    CancelOutcome, ExchangeMetadata, Orderbook, OrderSide, Tickers, WalletBalance,
};
use crate::exchanges::bittrex::rest::BittrexRestClient;
use crate::exchanges::bittrex::{BUY_FEE_FACTOR, ID, NAME, SELL_FEE_FACTOR, SMALLEST_ORDER_SIZE};
use async_trait::async_trait;
use parking_lot::RwLock;
use rust_decimal::Decimal;
use std::sync::Arc;

pub mod account;
pub mod market_data;
pub mod trading;

pub use account::Account;
pub use market_data::MarketData;
pub use trading::Trading;

/// Bittrex connector that composes all sub-trait implementations
///
/// The parts share one REST client, and with it one HTTP connection pool and
/// one nonce sequence. Wallet seeding reads the metadata written by the
/// market data part.
pub struct BittrexConnector<R: RestClient> {
    pub market: MarketData<R>,
    pub trading: Trading<R>,
    pub account: Account<R>,
}

impl<R: RestClient + Clone> BittrexConnector<R> {
    pub fn new(rest: R, config: Arc<ConfigStore>) -> Self {
        Self::with_rest_client(BittrexRestClient::new(rest), config)
    }

    pub fn with_rest_client(rest: BittrexRestClient<R>, config: Arc<ConfigStore>) -> Self {
        let metadata = Arc::new(RwLock::new(ExchangeMetadata::default()));
        Self {
            market: MarketData::new(rest.clone(), config, Arc::clone(&metadata)),
            trading: Trading::new(rest.clone()),
            account: Account::new(rest, metadata),
        }
    }
}

impl<R: RestClient> FeeModel for BittrexConnector<R> {
    fn add_fee_to_price(&self, price: Decimal) -> Decimal {
        price * BUY_FEE_FACTOR
    }

    fn deduct_fee_from_amount_buy(&self, amount: Decimal) -> Decimal {
        fees::default_deduct_fee_from_amount_buy(amount)
    }

    fn deduct_fee_from_amount_sell(&self, amount: Decimal) -> Decimal {
        amount * SELL_FEE_FACTOR
    }
}

// Implement traits for the connector by delegating to sub-components
#[async_trait]
impl<R: RestClient> MarketDataSource for BittrexConnector<R> {
    async fn get_tickers(&self, currency: &str) -> Result<Tickers, ExchangeError> {
        self.market.get_tickers(currency).await
    }

    async fn fetch_orderbook(
        &self,
        tradeable: &str,
        currency: &str,
    ) -> Result<Option<Orderbook>, ExchangeError> {
        self.market.fetch_orderbook(tradeable, currency).await
    }

    async fn refresh_exchange_data(&self) -> Result<(), ExchangeError> {
        self.market.refresh_exchange_data().await
    }

    async fn metadata(&self) -> ExchangeMetadata {
        self.market.metadata().await
    }
}

#[async_trait]
impl<R: RestClient> OrderPlacer for BittrexConnector<R> {
    async fn buy(
        &self,
        tradeable: &str,
        currency: &str,
        rate: Decimal,
        amount: Decimal,
    ) -> Result<String, ExchangeError> {
        self.trading.buy(tradeable, currency, rate, amount).await
    }

    async fn sell(
        &self,
        tradeable: &str,
        currency: &str,
        rate: Decimal,
        amount: Decimal,
    ) -> Result<String, ExchangeError> {
        self.trading.sell(tradeable, currency, rate, amount).await
    }

    async fn cancel_order(&self, order_id: &str) -> Result<CancelOutcome, ExchangeError> {
        self.trading.cancel_order(order_id).await
    }

    async fn cancel_all_orders(&self) -> Result<usize, ExchangeError> {
        self.trading.cancel_all_orders().await
    }

    async fn get_filled_order_price(
        &self,
        side: OrderSide,
        tradeable: &str,
        currency: &str,
        order_id: &str,
    ) -> Result<Option<Decimal>, ExchangeError> {
        self.trading
            .get_filled_order_price(side, tradeable, currency, order_id)
            .await
    }
}

#[async_trait]
impl<R: RestClient> AccountInfo for BittrexConnector<R> {
    async fn refresh_wallets(&self) -> Result<(), ExchangeError> {
        self.account.refresh_wallets().await
    }

    async fn wallets(&self) -> WalletBalance {
        self.account.wallets().await
    }

    async fn withdraw(&self, coin: &str, amount: Decimal, address: &str) -> bool {
        self.account.withdraw(coin, amount, address).await
    }

    async fn get_deposit_address(&self, coin: &str) -> Result<String, ExchangeError> {
        self.account.get_deposit_address(coin).await
    }

    async fn test_access(&self) -> Result<(), ExchangeError> {
        self.account.test_access().await
    }

    async fn dump_wallets(&self) -> Result<(), ExchangeError> {
        self.account.dump_wallets().await
    }
}

impl<R: RestClient> ExchangeConnector for BittrexConnector<R> {
    fn id(&self) -> u32 {
        ID
    }

    fn name(&self) -> &'static str {
        NAME
    }

    fn smallest_order_size(&self) -> Decimal {
        SMALLEST_ORDER_SIZE
    }
}
