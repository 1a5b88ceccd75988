use crate::core::{
    errors::ExchangeError,
    types::{CancelOutcome, ExchangeMetadata, Orderbook, OrderSide, Tickers, WalletBalance},
};
use async_trait::async_trait;
use rust_decimal::Decimal;

/// Shared fee helpers that exchanges compose into their [`FeeModel`].
pub mod fees {
    use rust_decimal::Decimal;

    /// Buy-side deduction used by exchanges that charge the buy fee in the
    /// quote currency: the bought quantity arrives in full.
    pub fn default_deduct_fee_from_amount_buy(amount: Decimal) -> Decimal {
        amount
    }

    /// Apply a taker fee given in percent, e.g. `0.25`.
    pub fn deduct_percentage(amount: Decimal, fee_percent: Decimal) -> Decimal {
        amount * (Decimal::ONE - fee_percent / Decimal::ONE_HUNDRED)
    }

    /// Mark a price up by a taker fee given in percent.
    pub fn add_percentage(price: Decimal, fee_percent: Decimal) -> Decimal {
        price * (Decimal::ONE + fee_percent / Decimal::ONE_HUNDRED)
    }
}

pub trait FeeModel {
    fn add_fee_to_price(&self, price: Decimal) -> Decimal;

    fn deduct_fee_from_amount_buy(&self, amount: Decimal) -> Decimal;

    fn deduct_fee_from_amount_sell(&self, amount: Decimal) -> Decimal;
}

#[async_trait]
pub trait MarketDataSource {
    /// Last traded price of every tradeable quoted in `currency`.
    async fn get_tickers(&self, currency: &str) -> Result<Tickers, ExchangeError>;

    /// Best ask and best bid, or `None` when either side of the book is empty.
    async fn fetch_orderbook(
        &self,
        tradeable: &str,
        currency: &str,
    ) -> Result<Option<Orderbook>, ExchangeError>;

    /// Rebuild the exchange metadata from the active markets and coin list.
    async fn refresh_exchange_data(&self) -> Result<(), ExchangeError>;

    /// Metadata from the last successful refresh.
    async fn metadata(&self) -> ExchangeMetadata;
}

#[async_trait]
pub trait OrderPlacer {
    /// Place a limit buy, returning the exchange order id.
    async fn buy(
        &self,
        tradeable: &str,
        currency: &str,
        rate: Decimal,
        amount: Decimal,
    ) -> Result<String, ExchangeError>;

    /// Place a limit sell, returning the exchange order id.
    async fn sell(
        &self,
        tradeable: &str,
        currency: &str,
        rate: Decimal,
        amount: Decimal,
    ) -> Result<String, ExchangeError>;

    async fn cancel_order(&self, order_id: &str) -> Result<CancelOutcome, ExchangeError>;

    /// Cancel every open order, each one independently. Returns how many were
    /// actually cancelled.
    async fn cancel_all_orders(&self) -> Result<usize, ExchangeError>;

    /// Price recorded in the order history for `order_id`, if present.
    async fn get_filled_order_price(
        &self,
        side: OrderSide,
        tradeable: &str,
        currency: &str,
        order_id: &str,
    ) -> Result<Option<Decimal>, ExchangeError>;
}

#[async_trait]
pub trait AccountInfo {
    /// Rebuild the wallet balances, including zero entries for every coin
    /// known from the metadata.
    async fn refresh_wallets(&self) -> Result<(), ExchangeError>;

    /// Balances from the last successful refresh.
    async fn wallets(&self) -> WalletBalance;

    /// Request a withdrawal. Failures are logged and reported as `false`.
    async fn withdraw(&self, coin: &str, amount: Decimal, address: &str) -> bool;

    async fn get_deposit_address(&self, coin: &str) -> Result<String, ExchangeError>;

    /// Minimal authenticated call to validate the credentials.
    async fn test_access(&self) -> Result<(), ExchangeError>;

    /// Log the raw account balances.
    async fn dump_wallets(&self) -> Result<(), ExchangeError>;
}

/// Everything the decision engine needs from one exchange.
pub trait ExchangeConnector:
    FeeModel + MarketDataSource + OrderPlacer + AccountInfo + Send + Sync
{
    fn id(&self) -> u32;

    fn name(&self) -> &'static str;

    fn smallest_order_size(&self) -> Decimal;

    /// Log prefix identifying the exchange, e.g. `[BITTREX] `.
    fn prefix(&self) -> String {
        format!("[{}] ", self.name())
    }
}
