use crate::core::config::ConfigStore;
use crate::core::errors::ExchangeError;
use crate::core::types::{
    ExchangeMetadata, Orderbook, OrderbookEntry, Tickers, TradingPair, TransferFee, WalletBalance,
};
use crate::exchanges::bittrex::types::{
    BittrexBalance, BittrexCurrency, BittrexMarket, BittrexMarketSummary, BittrexOrderBook,
    BittrexOrderBookEntry,
};
use crate::exchanges::bittrex::{
    ALLOWED_COIN_TYPES, NAME, ORDER_NOT_OPEN, PERCENTAGE_FEE_COIN_TYPE,
};
use rust_decimal::{Decimal, RoundingStrategy};
use std::collections::{HashMap, HashSet};

/// Bittrex market name for a pair, quote first: `BTC-XYZ`.
pub fn market_name(tradeable: &str, currency: &str) -> String {
    format!("{}-{}", currency, tradeable)
}

/// Split a market name into `(currency, tradeable)`.
pub fn split_market_name(market: &str) -> Option<(&str, &str)> {
    market.split_once('-')
}

/// Quantities and rates are always sent with eight decimals.
pub fn format_btc(value: Decimal) -> String {
    format!(
        "{:.8}",
        value.round_dp_with_strategy(8, RoundingStrategy::MidpointAwayFromZero)
    )
}

/// Order ids may come back wrapped in braces.
pub fn trim_order_id(order_id: &str) -> &str {
    order_id.trim_matches(|c| c == '{' || c == '}')
}

/// Whether a cancellation failed only because the order was no longer open.
pub fn is_order_not_open(error: &ExchangeError) -> bool {
    error
        .api_message()
        .is_some_and(|message| message.contains(ORDER_NOT_OPEN))
}

/// Last price of every market quoted in `currency`. Markets that never
/// traded have no last price and are left out.
pub fn convert_tickers(summaries: &[BittrexMarketSummary], currency: &str) -> Tickers {
    summaries
        .iter()
        .filter_map(|summary| {
            let (quote, tradeable) = split_market_name(&summary.market_name)?;
            if quote != currency {
                return None;
            }
            summary.last.map(|last| (tradeable.to_string(), last))
        })
        .collect()
}

fn convert_entry(entry: &BittrexOrderBookEntry) -> OrderbookEntry {
    OrderbookEntry::new(entry.quantity, entry.rate)
}

/// Top of the book, or `None` when either side is empty.
pub fn convert_order_book(
    book: &BittrexOrderBook,
    tradeable: &str,
    currency: &str,
) -> Option<Orderbook> {
    let best_ask = book.sell.first()?;
    let best_bid = book.buy.first()?;

    Some(Orderbook {
        exchange: NAME.to_string(),
        tradeable: tradeable.to_string(),
        currency: currency.to_string(),
        ask: convert_entry(best_ask),
        bid: convert_entry(best_bid),
    })
}

/// Build pairs, names and transfer fees from the market and currency lists.
///
/// Only active markets quoted in the base currency count. Coins are kept
/// when they have such a market and a supported coin type.
pub fn build_exchange_metadata(
    markets: &[BittrexMarket],
    currencies: &[BittrexCurrency],
    config: &ConfigStore,
) -> ExchangeMetadata {
    let mut pairs = Vec::new();
    let mut tradeables = HashSet::new();

    for market in markets {
        if !config.is_currency(&market.base_currency) || !market.is_active {
            continue;
        }
        let pair = TradingPair::new(market.market_currency.as_str(), market.base_currency.as_str());
        if let Ok(pair) = pair {
            tradeables.insert(market.market_currency.to_uppercase());
            pairs.push(pair);
        }
    }

    let mut names = HashMap::new();
    let mut transfer_fees = HashMap::new();

    for data in currencies {
        let coin = data.currency.to_uppercase();
        let coin_type = data.coin_type.to_uppercase();

        if !ALLOWED_COIN_TYPES.contains(&coin_type.as_str()) || !tradeables.contains(&coin) {
            continue;
        }

        let fee = if coin_type == PERCENTAGE_FEE_COIN_TYPE {
            TransferFee::percentage(data.tx_fee)
        } else {
            TransferFee::fixed(data.tx_fee)
        };
        names.insert(coin.clone(), data.currency_long.to_uppercase());
        transfer_fees.insert(coin, fee);
    }

    ExchangeMetadata {
        pairs,
        names,
        transfer_fees,
    }
}

/// Available balances, with a zero entry for every coin in the fee map.
pub fn build_wallets(
    transfer_fees: &HashMap<String, TransferFee>,
    balances: &[BittrexBalance],
) -> WalletBalance {
    let mut wallets: WalletBalance = transfer_fees
        .keys()
        .map(|coin| (coin.clone(), Decimal::ZERO))
        .collect();

    for balance in balances {
        wallets.insert(
            balance.currency.to_uppercase(),
            balance.available.unwrap_or(Decimal::ZERO),
        );
    }

    wallets
}
