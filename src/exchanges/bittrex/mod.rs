pub mod builder;
pub mod connector;
pub mod conversions;
pub mod rest;
pub mod signer;
pub mod types;

use crate::core::kernel::EnvelopeFields;
use rust_decimal::Decimal;

// Re-export main types for easier importing
pub use builder::build_connector;
pub use connector::BittrexConnector;
pub use rest::BittrexRestClient;
pub use signer::BittrexSigner;
pub use types::{
    BittrexBalance, BittrexCurrency, BittrexDepositAddress, BittrexMarket, BittrexMarketSummary,
    BittrexOpenOrder, BittrexOrder, BittrexOrderBook, BittrexOrderBookEntry, BittrexOrderUuid,
};

pub const ID: u32 = 3;
pub const NAME: &str = "BITTREX";
pub const BASE_URL: &str = "https://bittrex.com/api/v1.1";

/// Section of the configuration holding `key` and `secret`.
pub const CONFIG_SECTION: &str = "bittrex";

pub const ENVELOPE: EnvelopeFields = EnvelopeFields::new("success", "result", "message");

/// Cancellation error meaning the order was already filled or cancelled.
pub const ORDER_NOT_OPEN: &str = "ORDER_NOT_OPEN";

/// Coin types whose withdrawal fees are understood.
pub const ALLOWED_COIN_TYPES: [&str; 2] = ["BITCOIN", PERCENTAGE_FEE_COIN_TYPE];
pub const PERCENTAGE_FEE_COIN_TYPE: &str = "BITCOIN_PERCENTAGE_FEE";

/// Price multiplier for the 0.25% taker fee on buys.
pub const BUY_FEE_FACTOR: Decimal = Decimal::from_parts(10025, 0, 0, false, 4);
/// Amount multiplier for the 0.25% taker fee on sells.
pub const SELL_FEE_FACTOR: Decimal = Decimal::from_parts(9975, 0, 0, false, 4);
pub const SMALLEST_ORDER_SIZE: Decimal = Decimal::from_parts(5, 0, 0, false, 4);
