use crate::core::errors::ExchangeError;
use crate::core::kernel::RestClient;
use crate::core::traits::OrderPlacer;
use crate::core::types::{CancelOutcome, OrderSide};
use crate::exchanges::bittrex::conversions::{
    format_btc, is_order_not_open, market_name, trim_order_id,
};
use crate::exchanges::bittrex::rest::BittrexRestClient;
use crate::exchanges::bittrex::NAME;
use async_trait::async_trait;
use rust_decimal::Decimal;
use tracing::{info, warn};

/// Trading implementation for Bittrex
///
/// Holds no order state: cancellation and fill lookups query the exchange
/// every time.
pub struct Trading<R: RestClient> {
    rest: BittrexRestClient<R>,
}

impl<R: RestClient> Trading<R> {
    pub fn new(rest: BittrexRestClient<R>) -> Self {
        Self { rest }
    }

    async fn place(
        &self,
        side: OrderSide,
        tradeable: &str,
        currency: &str,
        rate: Decimal,
        amount: Decimal,
    ) -> Result<String, ExchangeError> {
        let order_id = self
            .rest
            .place_limit_order(
                side,
                &market_name(tradeable, currency),
                &format_btc(amount),
                &format_btc(rate),
            )
            .await?;

        info!(
            exchange = NAME,
            %side,
            tradeable,
            currency,
            %rate,
            %amount,
            order_id = %order_id,
            "Placed limit order"
        );
        Ok(order_id)
    }
}

#[async_trait]
impl<R: RestClient> OrderPlacer for Trading<R> {
    async fn buy(
        &self,
        tradeable: &str,
        currency: &str,
        rate: Decimal,
        amount: Decimal,
    ) -> Result<String, ExchangeError> {
        self.place(OrderSide::Buy, tradeable, currency, rate, amount)
            .await
    }

    async fn sell(
        &self,
        tradeable: &str,
        currency: &str,
        rate: Decimal,
        amount: Decimal,
    ) -> Result<String, ExchangeError> {
        self.place(OrderSide::Sell, tradeable, currency, rate, amount)
            .await
    }

    async fn cancel_order(&self, order_id: &str) -> Result<CancelOutcome, ExchangeError> {
        info!(exchange = NAME, order_id, "Cancelling order");

        match self.rest.cancel_order(order_id).await {
            Ok(_) => Ok(CancelOutcome::Cancelled),
            Err(e) if is_order_not_open(&e) => {
                info!(exchange = NAME, order_id, "Order was no longer open");
                Ok(CancelOutcome::AlreadyClosed)
            }
            Err(e) => Err(e),
        }
    }

    async fn cancel_all_orders(&self) -> Result<usize, ExchangeError> {
        let orders = self.rest.get_open_orders().await?;

        let mut cancelled = 0;
        for order in &orders {
            match self.cancel_order(&order.order_uuid).await {
                Ok(outcome) if outcome.is_cancelled() => cancelled += 1,
                Ok(_) => {}
                Err(e) => {
                    warn!(
                        exchange = NAME,
                        order_id = %order.order_uuid,
                        error = %e,
                        "Failed to cancel order"
                    );
                }
            }
        }

        Ok(cancelled)
    }

    async fn get_filled_order_price(
        &self,
        _side: OrderSide,
        tradeable: &str,
        currency: &str,
        order_id: &str,
    ) -> Result<Option<Decimal>, ExchangeError> {
        let history = self
            .rest
            .get_order_history(&market_name(tradeable, currency))
            .await?;
        let order_id = trim_order_id(order_id);

        let Some(order) = history.iter().find(|order| order.order_uuid == order_id) else {
            return Ok(None);
        };

        if !order.quantity_remaining.is_zero() {
            warn!(
                exchange = NAME,
                order_id,
                remaining = %order.quantity_remaining,
                "Order assumed to be filled but quantity still remaining"
            );
        }
        Ok(order.price)
    }
}
