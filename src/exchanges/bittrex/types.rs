use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer};

/// Entry of `public/getmarkets`.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct BittrexMarket {
    pub market_currency: String,
    pub base_currency: String,
    #[serde(default)]
    pub market_name: String,
    #[serde(default)]
    pub is_active: bool,
}

/// Entry of `public/getcurrencies`.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct BittrexCurrency {
    pub currency: String,
    #[serde(default)]
    pub currency_long: String,
    pub tx_fee: Decimal,
    #[serde(default)]
    pub coin_type: String,
    #[serde(default)]
    pub is_active: bool,
}

/// Entry of `public/getmarketsummaries`.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct BittrexMarketSummary {
    pub market_name: String,
    pub last: Option<Decimal>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct BittrexOrderBookEntry {
    pub quantity: Decimal,
    pub rate: Decimal,
}

/// Result of `public/getorderbook` with `type=both`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct BittrexOrderBook {
    #[serde(default, deserialize_with = "null_as_empty")]
    pub buy: Vec<BittrexOrderBookEntry>,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub sell: Vec<BittrexOrderBookEntry>,
}

fn null_as_empty<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Ok(Option::<Vec<T>>::deserialize(deserializer)?.unwrap_or_default())
}

/// Entry of `account/getbalances`.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct BittrexBalance {
    pub currency: String,
    #[serde(default)]
    pub balance: Option<Decimal>,
    #[serde(default)]
    pub available: Option<Decimal>,
    #[serde(default)]
    pub pending: Option<Decimal>,
}

/// Entry of `account/getorderhistory`.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct BittrexOrder {
    pub order_uuid: String,
    #[serde(default)]
    pub exchange: String,
    #[serde(default)]
    pub quantity_remaining: Decimal,
    #[serde(default)]
    pub price: Option<Decimal>,
}

/// Entry of `market/getopenorders`.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct BittrexOpenOrder {
    pub order_uuid: String,
    #[serde(default)]
    pub exchange: String,
}

/// Result of `market/buylimit` and `market/selllimit`.
#[derive(Debug, Clone, Deserialize)]
pub struct BittrexOrderUuid {
    pub uuid: String,
}

/// Result of `account/getdepositaddress`.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct BittrexDepositAddress {
    #[serde(default)]
    pub currency: String,
    pub address: String,
}
