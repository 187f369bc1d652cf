use crate::domain::cart::Cart;
use crate::domain::catalog::{Catalog, Category, Product};
use crate::domain::ports::{CartStore, ProductRepository};
use crate::error::Result;
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

/// A read-only product repository over a catalog loaded at startup.
///
/// Keeps products in catalog order and indexes them by id for lookups.
#[derive(Debug, Default, Clone)]
pub struct InMemoryProductRepository {
    products: Arc<Vec<Product>>,
    categories: Arc<Vec<Category>>,
    by_id: Arc<HashMap<String, usize>>,
}

impl InMemoryProductRepository {
    /// Creates a repository from an already validated catalog.
    pub fn new(catalog: Catalog) -> Self {
        let by_id = catalog
            .products
            .iter()
            .enumerate()
            .map(|(index, product)| (product.id.clone(), index))
            .collect();
        Self {
            products: Arc::new(catalog.products),
            categories: Arc::new(catalog.categories),
            by_id: Arc::new(by_id),
        }
    }
}

#[async_trait]
impl ProductRepository for InMemoryProductRepository {
    async fn list_all(&self) -> Result<Vec<Product>> {
        Ok(self.products.as_ref().clone())
    }

    async fn find_by_id(&self, id: &str) -> Result<Option<Product>> {
        Ok(self
            .by_id
            .get(id)
            .and_then(|&index| self.products.get(index))
            .cloned())
    }

    async fn list_categories(&self) -> Result<Vec<Category>> {
        Ok(self.categories.as_ref().clone())
    }
}

/// A thread-safe in-memory cart store. The cart lives as long as the process.
#[derive(Default, Clone)]
pub struct InMemoryCartStore {
    cart: Arc<RwLock<Option<Cart>>>,
}

impl InMemoryCartStore {
    /// Creates a new, empty in-memory cart store.
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl CartStore for InMemoryCartStore {
    async fn load(&self) -> Result<Option<Cart>> {
        let cart = self.cart.read().await;
        Ok(cart.clone())
    }

    async fn save(&self, cart: &Cart) -> Result<()> {
        let mut stored = self.cart.write().await;
        *stored = Some(cart.clone());
        Ok(())
    }
}
