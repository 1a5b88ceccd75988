use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum TypesError {
    #[error("Invalid symbol: {0}")]
    InvalidSymbol(String),
}

/// A tradeable coin quoted in a settlement currency.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TradingPair {
    pub tradeable: String,
    pub currency: String,
}

impl TradingPair {
    pub fn new(
        tradeable: impl Into<String>,
        currency: impl Into<String>,
    ) -> Result<Self, TypesError> {
        let tradeable = tradeable.into();
        let currency = currency.into();

        if tradeable.is_empty() || currency.is_empty() {
            return Err(TypesError::InvalidSymbol(
                "Tradeable and currency cannot be empty".to_string(),
            ));
        }

        Ok(Self {
            tradeable,
            currency,
        })
    }
}

impl fmt::Display for TradingPair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}_{}", self.tradeable, self.currency)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum OrderSide {
    Buy,
    Sell,
}

impl fmt::Display for OrderSide {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Buy => write!(f, "buy"),
            Self::Sell => write!(f, "sell"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderbookEntry {
    pub quantity: Decimal,
    pub rate: Decimal,
}

impl OrderbookEntry {
    pub const fn new(quantity: Decimal, rate: Decimal) -> Self {
        Self { quantity, rate }
    }
}

/// Top of the book for one pair: the best ask and the best bid only.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Orderbook {
    pub exchange: String,
    pub tradeable: String,
    pub currency: String,
    pub ask: OrderbookEntry,
    pub bid: OrderbookEntry,
}

/// Withdrawal cost of a coin, either a fixed amount or a percentage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransferFee {
    pub amount: Decimal,
    pub percentage: bool,
}

impl TransferFee {
    pub const fn fixed(amount: Decimal) -> Self {
        Self {
            amount,
            percentage: false,
        }
    }

    pub const fn percentage(amount: Decimal) -> Self {
        Self {
            amount,
            percentage: true,
        }
    }
}

impl fmt::Display for TransferFee {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.percentage {
            write!(f, "{}%", self.amount)
        } else {
            write!(f, "{}", self.amount)
        }
    }
}

/// Markets and coin information of one exchange, rebuilt on every refresh.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExchangeMetadata {
    pub pairs: Vec<TradingPair>,
    pub names: HashMap<String, String>,
    pub transfer_fees: HashMap<String, TransferFee>,
}

impl ExchangeMetadata {
    pub fn is_tradeable(&self, coin: &str) -> bool {
        self.pairs.iter().any(|pair| pair.tradeable == coin)
    }
}

/// Available amount per coin.
pub type WalletBalance = HashMap<String, Decimal>;

/// Last traded price per tradeable.
pub type Tickers = HashMap<String, Decimal>;

/// What happened when an order was cancelled.
///
/// A cancellation that the exchange rejects for any other reason is an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CancelOutcome {
    Cancelled,
    /// The order was no longer open (filled or cancelled earlier).
    AlreadyClosed,
}

impl CancelOutcome {
    pub const fn is_cancelled(self) -> bool {
        matches!(self, Self::Cancelled)
    }
}
