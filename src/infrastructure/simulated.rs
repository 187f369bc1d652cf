use crate::domain::order::{OrderId, OrderSummary};
use crate::domain::ports::CheckoutBackend;
use crate::error::Result;
use async_trait::async_trait;
use rand::Rng;
use std::time::Duration;

/// Prefix of the display order numbers.
pub const ORDER_PREFIX: &str = "MNT";

/// Stands in for a payment backend: waits out a fixed delay and always accepts
/// the order.
///
/// Order numbers are drawn at random from `0..10000` with no collision check.
#[derive(Debug, Clone)]
pub struct SimulatedCheckoutBackend {
    delay: Duration,
}

impl SimulatedCheckoutBackend {
    pub fn new(delay: Duration) -> Self {
        Self { delay }
    }
}

impl Default for SimulatedCheckoutBackend {
    fn default() -> Self {
        Self::new(Duration::from_secs(1))
    }
}

#[async_trait]
impl CheckoutBackend for SimulatedCheckoutBackend {
    async fn submit_order(&self, _order: &OrderSummary) -> Result<OrderId> {
        tokio::time::sleep(self.delay).await;
        let number = rand::thread_rng().gen_range(0..10_000);
        Ok(OrderId::new(format!("{ORDER_PREFIX}-{number}")))
    }
}
