use super::cart::Cart;
use super::catalog::{Category, Product};
use super::order::{OrderId, OrderSummary};
use crate::error::Result;
use async_trait::async_trait;
use std::sync::Arc;

/// Read-only access to the static catalog.
#[async_trait]
pub trait ProductRepository: Send + Sync {
    /// All products in catalog order.
    async fn list_all(&self) -> Result<Vec<Product>>;
    async fn find_by_id(&self, id: &str) -> Result<Option<Product>>;
    async fn list_categories(&self) -> Result<Vec<Category>>;

    async fn find_category(&self, slug: &str) -> Result<Option<Category>> {
        let categories = self.list_categories().await?;
        Ok(categories.into_iter().find(|c| c.slug == slug))
    }

    async fn list_by_category(&self, slug: &str) -> Result<Vec<Product>> {
        let products = self.list_all().await?;
        Ok(products.into_iter().filter(|p| p.category == slug).collect())
    }
}

/// Persistence hooks for the session cart.
#[async_trait]
pub trait CartStore: Send + Sync {
    async fn load(&self) -> Result<Option<Cart>>;
    async fn save(&self, cart: &Cart) -> Result<()>;
}

/// The order submission round trip performed when checkout completes.
#[async_trait]
pub trait CheckoutBackend: Send + Sync {
    async fn submit_order(&self, order: &OrderSummary) -> Result<OrderId>;
}

pub type ProductRepositoryBox = Box<dyn ProductRepository>;
pub type CartStoreBox = Box<dyn CartStore>;
/// Shared, since every checkout attempt builds a fresh sequencer over the same backend.
pub type CheckoutBackendRef = Arc<dyn CheckoutBackend>;
