use super::cart::CartEngine;
use crate::domain::checkout::{CheckoutState, CheckoutStep};
use crate::domain::order::{OrderConfirmation, OrderId, OrderSummary};
use crate::domain::ports::{CheckoutBackend, CheckoutBackendRef};
use crate::error::{Result, StorefrontError};
use std::time::Duration;
use tracing::{info, warn};

/// Timing and retry settings for the checkout flow.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CheckoutConfig {
    /// Simulated confirmation round trip before moving to the next step.
    pub step_delay: Duration,
    /// Submission attempts made when the backend reports a network error.
    pub max_attempts: u32,
}

impl Default for CheckoutConfig {
    fn default() -> Self {
        Self {
            step_delay: Duration::from_secs(1),
            max_attempts: 3,
        }
    }
}

#[derive(Debug, PartialEq, Clone)]
pub enum AdvanceOutcome {
    /// Moved forward to this step.
    Moved(CheckoutStep),
    /// The order was placed and the cart cleared.
    Completed(OrderConfirmation),
    /// The sequencer is finished or busy; nothing happened.
    Ignored,
}

/// Marks the sequencer busy for the lifetime of one `advance` call.
///
/// Dropping the guard always clears the flag, so an abandoned advance leaves the
/// sequencer on its previous step and ready for another attempt.
struct Processing<'a> {
    state: &'a mut CheckoutState,
}

impl<'a> Processing<'a> {
    fn start(state: &'a mut CheckoutState) -> Self {
        state.is_processing = true;
        Self { state }
    }
}

impl Drop for Processing<'_> {
    fn drop(&mut self) {
        self.state.is_processing = false;
    }
}

/// Drives the Information → Shipping → Payment → Confirmed flow.
///
/// Completion is terminal: it happens at most once per sequencer and is the
/// only place the cart gets cleared.
pub struct CheckoutSequencer {
    state: CheckoutState,
    backend: CheckoutBackendRef,
    config: CheckoutConfig,
}

impl CheckoutSequencer {
    /// Enters checkout. An empty cart is refused so the caller can redirect
    /// back to the catalog.
    pub fn begin(
        cart: &CartEngine,
        backend: CheckoutBackendRef,
        config: CheckoutConfig,
    ) -> Result<Self> {
        if cart.is_empty() {
            return Err(StorefrontError::EmptyCart);
        }
        info!(items = cart.total_items(), "checkout started");
        Ok(Self {
            state: CheckoutState::default(),
            backend,
            config,
        })
    }

    pub fn state(&self) -> CheckoutState {
        self.state
    }

    pub fn current_step(&self) -> CheckoutStep {
        self.state.current_step
    }

    pub fn is_processing(&self) -> bool {
        self.state.is_processing
    }

    pub fn is_completed(&self) -> bool {
        self.state.is_completed
    }

    /// Moves one step forward after the simulated round trip. From Payment this
    /// submits the order, marks the checkout completed and clears the cart.
    ///
    /// On a backend error the sequencer stays on Payment and the cart is left
    /// untouched.
    pub async fn advance(&mut self, cart: &mut CartEngine) -> Result<AdvanceOutcome> {
        if self.state.is_completed || self.state.is_processing {
            return Ok(AdvanceOutcome::Ignored);
        }

        let processing = Processing::start(&mut self.state);
        let step = processing.state.current_step;

        match step {
            CheckoutStep::Information | CheckoutStep::Shipping => {
                tokio::time::sleep(self.config.step_delay).await;
                let Some(next) = step.next() else {
                    return Ok(AdvanceOutcome::Ignored);
                };
                processing.state.current_step = next;
                info!(from = %step, to = %next, "checkout step advanced");
                Ok(AdvanceOutcome::Moved(next))
            }
            CheckoutStep::Payment => {
                if cart.is_empty() {
                    warn!("cart emptied before payment, refusing to place order");
                    return Err(StorefrontError::EmptyCart);
                }
                let summary = OrderSummary::from_cart(cart.cart());
                let order_id = submit_with_retry(self.backend.as_ref(), &self.config, &summary).await?;

                processing.state.is_completed = true;
                processing.state.current_step = CheckoutStep::Confirmed;
                cart.clear_cart();
                info!(order = %order_id, total = %summary.total, "order placed");

                Ok(AdvanceOutcome::Completed(OrderConfirmation { order_id, summary }))
            }
            CheckoutStep::Confirmed => Ok(AdvanceOutcome::Ignored),
        }
    }

    /// Steps back from Shipping or Payment. Returns whether the step changed.
    pub fn back(&mut self) -> bool {
        if self.state.is_processing || self.state.is_completed {
            return false;
        }
        match self.state.current_step.previous() {
            Some(previous) => {
                self.state.current_step = previous;
                true
            }
            None => false,
        }
    }
}

async fn submit_with_retry(
    backend: &dyn CheckoutBackend,
    config: &CheckoutConfig,
    summary: &OrderSummary,
) -> Result<OrderId> {
    let max_attempts = config.max_attempts.max(1);
    let mut attempt = 1;
    loop {
        match backend.submit_order(summary).await {
            Ok(order_id) => return Ok(order_id),
            Err(e) if e.is_transient() && attempt < max_attempts => {
                warn!(attempt, error = %e, "order submission failed, retrying");
                attempt += 1;
            }
            Err(e) => return Err(e),
        }
    }
}
