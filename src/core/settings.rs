//! Catalogue of the keys the trading bot reads from its settings file.
//!
//! Each [`Setting`] pairs a dotted key with the value used when the file does
//! not define it. Resolve one with [`ConfigStore::setting`].

use crate::core::config::ConfigStore;
use serde::de::DeserializeOwned;

#[derive(Debug, Clone, Copy)]
pub struct Setting<T: 'static> {
    pub key: &'static str,
    pub default: T,
}

impl<T> Setting<T> {
    pub const fn new(key: &'static str, default: T) -> Self {
        Self { key, default }
    }
}

impl ConfigStore {
    pub fn setting<T: DeserializeOwned + Clone>(&self, setting: &Setting<T>) -> T {
        self.get(setting.key, setting.default.clone())
    }
}

// Database
pub const DB_USER: &str = "db.user";
pub const DB_PASS: &str = "db.pass";
pub const DB_HOST: &str = "db.host";
pub const DB_NAME: &str = "db.name";

// Mail
pub const MAIL_RECIPIENT: &str = "mail.address";
pub const MANDRILL_API_KEY: &str = "mail.mandrill-key";

// Expert
pub const BALANCE_FACTOR: Setting<f64> = Setting::new("expert.balance-factor", 1.05);
pub const REQUIRED_OPPORTUNITIES: Setting<u32> =
    Setting::new("expert.required-opportunities", 3);
pub const MAX_TX_FEE_ALLOWED: Setting<f64> = Setting::new("expert.max-tx-fee-allowed", 0.00001);
pub const RATE_EMA_PERIOD: Setting<u32> = Setting::new("expert.rate-ema-period", 12);
pub const OPPORTUNITY_COUNT_AGE: Setting<u64> = Setting::new("expert.opportunity-count-age", 120);
pub const OPPORTUNITY_SAVE_INTERVAL: Setting<u64> =
    Setting::new("expert.opportunity-save-interval", 60);
pub const MAX_LOG_AGE: Setting<u64> = Setting::new("expert.max-log-age", 300);
pub const QUERY_DELAY: Setting<u64> = Setting::new("expert.query-delay", 10);
pub const ORDER_CHECK_DELAY: Setting<u64> = Setting::new("expert.order-check-delay", 60);
pub const MAX_PAIRS_PER_RUN: Setting<u32> = Setting::new("expert.max-pairs-per-run", 10);
pub const SUSPICIOUS_PRICE_DIFFERENCE: Setting<u32> =
    Setting::new("expert.suspicious-price-difference", 33);

// Scheduling intervals, in hours
pub const INTERVAL_MANAGEMENT: Setting<u32> = Setting::new("expert.interval-management", 1);
pub const INTERVAL_TAKE_PROFIT: Setting<u32> = Setting::new("expert.interval-take-profit", 6);
pub const INTERVAL_STUCK_DETECTION: Setting<u32> =
    Setting::new("expert.interval-stuck-detection", 12);
pub const INTERVAL_UNUSED_COIN_DETECTION: Setting<u32> =
    Setting::new("expert.interval-unused-coin-detection", 24);
pub const INTERVAL_DB_CLEANUP: Setting<u32> = Setting::new("expert.interval-db-cleanup", 2);

// General
pub const CANCEL_STRAY_ORDERS: Setting<bool> = Setting::new("general.cancel-stray-orders", true);
pub const MIN_BTC_XFER: Setting<f64> = Setting::new("general.min-btc-xfer", 0.02);

// Trade module
pub const MAX_TRADE_SIZE: Setting<f64> = Setting::new("trade.max-trade-size", 0.01);
pub const MIN_PROFIT: Setting<f64> = Setting::new("trade.min-profit", 0.000_000_50);
pub const BUY_RATE_FACTOR: Setting<f64> = Setting::new("trade.buy-factor", 1.1);
pub const SELL_RATE_FACTOR: Setting<f64> = Setting::new("trade.sell-factor", 0.9);

// Take-profit module
pub const TAKE_PROFIT_ADDRESS: &str = "takeprofit.profit-address";
pub const TAKE_PROFIT_AMOUNT: Setting<Option<f64>> = Setting::new("takeprofit.profit-limit", None);

// Autobuy
pub const MAX_BUY: Setting<f64> = Setting::new("autobuy.max-buy", 0.005);

// Module toggles
pub const MODULE_TRADE: Setting<bool> = Setting::new("modules.trade", true);
pub const MODULE_LIQUIDATE: Setting<bool> = Setting::new("modules.coin-liquidation", false);
pub const MODULE_AUTOBUY: Setting<bool> = Setting::new("modules.coin-autobuy", false);
pub const MODULE_TAKE_PROFIT: Setting<bool> = Setting::new("modules.take-profit", false);
pub const MODULE_STUCK_DETECTION: Setting<bool> = Setting::new("modules.stuck-detection", true);
pub const MODULE_UNUSED_COINS_DETECTION: Setting<bool> =
    Setting::new("modules.unused-coins-detection", true);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_settings_resolve_with_defaults() {
        let store = ConfigStore::from_ini_str(
            "[expert]\nquery-delay = 30\n\n[modules]\ntake-profit = true\n",
        )
        .unwrap();

        assert_eq!(store.setting(&QUERY_DELAY), 30);
        assert!(store.setting(&MODULE_TAKE_PROFIT));
        assert_eq!(store.setting(&MAX_PAIRS_PER_RUN), 10);
        assert!(store.setting(&CANCEL_STRAY_ORDERS));
        assert_eq!(store.setting(&TAKE_PROFIT_AMOUNT), None);
    }
}
