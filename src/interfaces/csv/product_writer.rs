use crate::domain::catalog::{CARD_LOW_STOCK, Product};
use crate::error::Result;
use serde::Serialize;
use std::io::Write;

#[derive(Debug, Serialize)]
struct ProductRow<'a> {
    id: &'a str,
    name: &'a str,
    category: &'a str,
    price: String,
    original_price: Option<String>,
    discount_percent: Option<u32>,
    rating: String,
    stock: u32,
    low_stock: bool,
}

/// Writes a product listing as CSV, in the order given.
pub struct ProductWriter<W: Write> {
    writer: csv::Writer<W>,
}

impl<W: Write> ProductWriter<W> {
    pub fn new(sink: W) -> Self {
        Self {
            writer: csv::Writer::from_writer(sink),
        }
    }

    pub fn write_products(&mut self, products: &[Product]) -> Result<()> {
        for product in products {
            self.writer.serialize(ProductRow {
                id: &product.id,
                name: &product.name,
                category: &product.category,
                price: product.price.to_fixed(),
                original_price: product.original_price.map(|p| p.to_fixed()),
                discount_percent: product.discount_percent(),
                rating: product.rating.normalize().to_string(),
                stock: product.stock,
                low_stock: product.is_low_stock(CARD_LOW_STOCK),
            })?;
        }
        self.writer.flush()?;
        Ok(())
    }
}
