use crate::domain::cart::Cart;
use crate::error::Result;
use serde::Serialize;
use std::io::Write;

/// Label of the closing row that carries the cart totals.
pub const TOTAL_ROW: &str = "TOTAL";

#[derive(Debug, Serialize)]
struct CartRow<'a> {
    product: &'a str,
    name: &'a str,
    size: Option<&'a str>,
    color: Option<&'a str>,
    quantity: u64,
    unit_price: Option<String>,
    line_total: String,
}

/// Writes the cart as CSV: one row per line item followed by a `TOTAL` row.
pub struct CartWriter<W: Write> {
    writer: csv::Writer<W>,
}

impl<W: Write> CartWriter<W> {
    pub fn new(sink: W) -> Self {
        Self {
            writer: csv::Writer::from_writer(sink),
        }
    }

    pub fn write_cart(&mut self, cart: &Cart) -> Result<()> {
        for line in cart.lines() {
            self.writer.serialize(CartRow {
                product: &line.product.id,
                name: &line.product.name,
                size: line.selected_size.as_deref(),
                color: line.selected_color.as_deref(),
                quantity: u64::from(line.quantity),
                unit_price: Some(line.product.price.to_fixed()),
                line_total: line.line_total().to_fixed(),
            })?;
        }
        self.writer.serialize(CartRow {
            product: TOTAL_ROW,
            name: "",
            size: None,
            color: None,
            quantity: cart.total_items(),
            unit_price: None,
            line_total: cart.total_price().to_fixed(),
        })?;
        self.writer.flush()?;
        Ok(())
    }
}
