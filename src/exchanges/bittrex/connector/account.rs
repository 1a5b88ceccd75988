use crate::core::errors::ExchangeError;
use crate::core::kernel::RestClient;
use crate::core::traits::AccountInfo;
use crate::core::types::{ExchangeMetadata, WalletBalance};
use crate::exchanges::bittrex::conversions::{build_wallets, format_btc};
use crate::exchanges::bittrex::rest::BittrexRestClient;
use crate::exchanges::bittrex::NAME;
use async_trait::async_trait;
use parking_lot::RwLock;
use rust_decimal::Decimal;
use std::sync::Arc;
use tracing::{error, info};

/// Account implementation for Bittrex
pub struct Account<R: RestClient> {
    rest: BittrexRestClient<R>,
    metadata: Arc<RwLock<ExchangeMetadata>>,
    wallets: RwLock<WalletBalance>,
}

impl<R: RestClient> Account<R> {
    pub fn new(rest: BittrexRestClient<R>, metadata: Arc<RwLock<ExchangeMetadata>>) -> Self {
        Self {
            rest,
            metadata,
            wallets: RwLock::new(WalletBalance::new()),
        }
    }
}

#[async_trait]
impl<R: RestClient> AccountInfo for Account<R> {
    async fn refresh_wallets(&self) -> Result<(), ExchangeError> {
        let balances = self.rest.get_balances().await?;
        let wallets = build_wallets(&self.metadata.read().transfer_fees, &balances);
        *self.wallets.write() = wallets;
        Ok(())
    }

    async fn wallets(&self) -> WalletBalance {
        self.wallets.read().clone()
    }

    async fn withdraw(&self, coin: &str, amount: Decimal, address: &str) -> bool {
        match self
            .rest
            .withdraw(coin, &format_btc(amount), address)
            .await
        {
            Ok(_) => {
                info!(exchange = NAME, coin, %amount, "Withdrawal requested");
                true
            }
            Err(e) => {
                error!(exchange = NAME, coin, %amount, error = %e, "Withdrawal error");
                false
            }
        }
    }

    async fn get_deposit_address(&self, coin: &str) -> Result<String, ExchangeError> {
        self.rest.get_deposit_address(coin).await
    }

    async fn test_access(&self) -> Result<(), ExchangeError> {
        self.rest.get_balances().await.map(|_| ())
    }

    async fn dump_wallets(&self) -> Result<(), ExchangeError> {
        let balances = self.rest.get_balances_raw().await?;
        let pretty = serde_json::to_string_pretty(&balances)?;
        info!(exchange = NAME, "Balances:\n{}", pretty);
        Ok(())
    }
}
