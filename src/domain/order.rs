use super::cart::Cart;
use super::money::Money;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Display identifier of a placed order. Not guaranteed unique.
#[derive(Debug, Serialize, Deserialize, PartialEq, Eq, Clone, Hash)]
#[serde(transparent)]
pub struct OrderId(String);

impl OrderId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for OrderId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

#[derive(Debug, Serialize, Deserialize, PartialEq, Clone)]
pub struct OrderLine {
    pub product_id: String,
    pub name: String,
    pub size: Option<String>,
    pub color: Option<String>,
    pub quantity: u32,
    pub unit_price: Money,
    pub line_total: Money,
}

/// What the customer is about to pay for, as shown next to the checkout steps.
#[derive(Debug, Serialize, Deserialize, PartialEq, Clone)]
pub struct OrderSummary {
    pub lines: Vec<OrderLine>,
    pub subtotal: Money,
    pub shipping: Money,
    pub total: Money,
}

impl OrderSummary {
    /// Shipping is always free.
    pub fn from_cart(cart: &Cart) -> Self {
        let lines = cart
            .lines()
            .iter()
            .map(|line| OrderLine {
                product_id: line.product.id.clone(),
                name: line.product.name.clone(),
                size: line.selected_size.clone(),
                color: line.selected_color.clone(),
                quantity: line.quantity,
                unit_price: line.product.price,
                line_total: line.line_total(),
            })
            .collect();
        let subtotal = cart.total_price();
        let shipping = Money::ZERO;
        Self {
            lines,
            subtotal,
            shipping,
            total: subtotal + shipping,
        }
    }

    pub fn item_count(&self) -> u64 {
        self.lines.iter().map(|line| u64::from(line.quantity)).sum()
    }
}

/// Emitted once when the checkout completes.
#[derive(Debug, Serialize, Deserialize, PartialEq, Clone)]
pub struct OrderConfirmation {
    pub order_id: OrderId,
    pub summary: OrderSummary,
}
