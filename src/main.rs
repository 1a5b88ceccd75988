use anyhow::Context;
use std::sync::Arc;
use tracing::{info, warn};
use xchange::core::config::DEFAULT_CONFIG_PATH;
use xchange::core::traits::{AccountInfo, MarketDataSource};
use xchange::{ConfigStore, ExchangeConnector, ExchangeFactory, ExchangeType};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt::init();

    let mut args = std::env::args().skip(1);
    let path = args.next().unwrap_or_else(|| DEFAULT_CONFIG_PATH.to_string());
    let exchange: ExchangeType = args
        .next()
        .as_deref()
        .unwrap_or("bittrex")
        .parse()?;

    let config = Arc::new(
        ConfigStore::load(&path).with_context(|| format!("Failed to load {}", path))?,
    );
    let connector = ExchangeFactory::create_connector(exchange, Arc::clone(&config))?;

    connector
        .test_access()
        .await
        .context("API access check failed")?;
    info!("{}API access OK", connector.prefix());

    connector.refresh_exchange_data().await?;
    connector.refresh_wallets().await?;

    let metadata = connector.metadata().await;
    let wallets = connector.wallets().await;
    info!(
        "{}{} pairs, {} coins with known transfer fees, {} wallets",
        connector.prefix(),
        metadata.pairs.len(),
        metadata.transfer_fees.len(),
        wallets.len()
    );

    for (coin, balance) in wallets.iter().filter(|(_, balance)| !balance.is_zero()) {
        if config.is_blocked(coin) {
            warn!("{}{} is blocked but holds {}", connector.prefix(), coin, balance);
        } else {
            info!("{}{}: {}", connector.prefix(), coin, balance);
        }
    }

    Ok(())
}
