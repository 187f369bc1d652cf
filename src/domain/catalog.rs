use super::money::Money;
use crate::error::{Result, StorefrontError};
use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeSet, HashSet};

/// Stock level at or below which the product listing shows a "Low Stock" badge.
pub const CARD_LOW_STOCK: u32 = 5;
/// Stock level at or below which the product page shows "Only N left".
pub const DETAIL_LOW_STOCK: u32 = 10;
/// Number of products shown in the home page teaser.
pub const FEATURED_COUNT: usize = 4;

/// Highest unit price a catalog may list. A full cart line at this price
/// still fits in a `Decimal`.
pub const MAX_PRICE: Decimal = dec!(1000000000);

const MAX_RATING: Decimal = dec!(5);

/// A catalog product. Immutable once loaded by the repository.
#[derive(Debug, Serialize, Deserialize, PartialEq, Clone)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: String,
    pub name: String,
    pub description: String,
    pub price: Money,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub original_price: Option<Money>,
    pub rating: Decimal,
    pub reviews: u32,
    pub images: Vec<String>,
    /// Slug of the owning category.
    pub category: String,
    #[serde(default)]
    pub tags: BTreeSet<String>,
    pub stock: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub features: Option<Vec<String>>,
}

impl Product {
    /// Checks the record-level invariants of a product.
    pub fn validate(&self) -> Result<()> {
        if self.id.trim().is_empty() {
            return Err(StorefrontError::ValidationError(
                "Product id must not be empty".to_string(),
            ));
        }
        let highest = self.original_price.unwrap_or(self.price).max(self.price);
        if highest.value() > MAX_PRICE {
            return Err(StorefrontError::ValidationError(format!(
                "Product {}: price {} exceeds the maximum of {}",
                self.id, highest, MAX_PRICE
            )));
        }
        if let Some(original) = self.original_price
            && original <= self.price
        {
            return Err(StorefrontError::ValidationError(format!(
                "Product {}: original price {} must exceed price {}",
                self.id, original, self.price
            )));
        }
        if self.rating < Decimal::ZERO || self.rating > MAX_RATING {
            return Err(StorefrontError::ValidationError(format!(
                "Product {}: rating {} is outside 0..=5",
                self.id, self.rating
            )));
        }
        if self.images.is_empty() {
            return Err(StorefrontError::ValidationError(format!(
                "Product {}: at least one image is required",
                self.id
            )));
        }
        Ok(())
    }

    pub fn is_on_sale(&self) -> bool {
        self.original_price
            .is_some_and(|original| original > self.price)
    }

    /// Whole-percent discount against the original price, if the product is on sale.
    pub fn discount_percent(&self) -> Option<u32> {
        let original = self.original_price.filter(|_| self.is_on_sale())?.value();
        let saved = original.checked_sub(self.price.value())?;
        saved
            .checked_mul(Decimal::ONE_HUNDRED)?
            .checked_div(original)?
            .round()
            .to_u32()
    }

    pub fn is_low_stock(&self, threshold: u32) -> bool {
        self.stock <= threshold
    }

    /// Primary image, used for thumbnails.
    pub fn thumbnail(&self) -> Option<&str> {
        self.images.first().map(String::as_str)
    }
}

#[derive(Debug, Serialize, Deserialize, PartialEq, Clone)]
pub struct Category {
    pub id: String,
    pub name: String,
    pub slug: String,
    pub image: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl Category {
    pub fn validate(&self) -> Result<()> {
        let url_safe = !self.slug.is_empty()
            && self
                .slug
                .chars()
                .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-');
        if url_safe {
            Ok(())
        } else {
            Err(StorefrontError::ValidationError(format!(
                "Category {}: slug '{}' is not URL-safe",
                self.id, self.slug
            )))
        }
    }
}

/// The full static catalog: products in catalog order plus their categories.
#[derive(Debug, Serialize, Deserialize, PartialEq, Clone, Default)]
pub struct Catalog {
    pub products: Vec<Product>,
    #[serde(default)]
    pub categories: Vec<Category>,
}

impl Catalog {
    /// Validates every record plus the cross-record uniqueness rules.
    pub fn validate(&self) -> Result<()> {
        let mut ids = HashSet::new();
        for product in &self.products {
            product.validate()?;
            if !ids.insert(product.id.as_str()) {
                return Err(StorefrontError::ValidationError(format!(
                    "Duplicate product id {}",
                    product.id
                )));
            }
        }

        let mut slugs = HashSet::new();
        for category in &self.categories {
            category.validate()?;
            if !slugs.insert(category.slug.as_str()) {
                return Err(StorefrontError::ValidationError(format!(
                    "Duplicate category slug {}",
                    category.slug
                )));
            }
        }
        Ok(())
    }
}

/// Home page teaser: the first few products in catalog order.
pub fn featured(products: &[Product]) -> &[Product] {
    &products[..products.len().min(FEATURED_COUNT)]
}
