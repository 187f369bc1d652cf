use rust_decimal_macros::dec;
use std::sync::Arc;
use std::time::Duration;
use storefront::domain::cart::{AddOptions, Cart};
use storefront::domain::order::OrderSummary;
use storefront::domain::ports::{CartStoreBox, CheckoutBackendRef, ProductRepositoryBox};
use storefront::infrastructure::in_memory::{InMemoryCartStore, InMemoryProductRepository};
use storefront::infrastructure::simulated::SimulatedCheckoutBackend;
use storefront::interfaces::json::catalog_reader::CatalogReader;

mod common;

#[tokio::test]
async fn test_ports_as_trait_objects() {
    let catalog = CatalogReader::from_path(common::CATALOG).unwrap();
    let products: ProductRepositoryBox = Box::new(InMemoryProductRepository::new(catalog));
    let cart_store: CartStoreBox = Box::new(InMemoryCartStore::new());
    let backend: CheckoutBackendRef = Arc::new(SimulatedCheckoutBackend::new(Duration::ZERO));

    // Verify Send + Sync by spawning tasks
    let product_handle = tokio::spawn(async move {
        let product = products.find_by_id("3").await.unwrap().unwrap();
        let mut cart = Cart::new();
        cart.add(&product, AddOptions::default());
        cart_store.save(&cart).await.unwrap();
        cart_store.load().await.unwrap().unwrap()
    });

    let backend_handle = tokio::spawn(async move {
        let summary = OrderSummary::from_cart(&Cart::new());
        backend.submit_order(&summary).await.unwrap()
    });

    let saved = product_handle.await.unwrap();
    assert_eq!(saved.total_price().value(), dec!(59.50));

    let order_id = backend_handle.await.unwrap();
    assert!(order_id.as_str().starts_with("MNT-"));
}

#[tokio::test]
async fn test_fixture_repository_queries() {
    let catalog = CatalogReader::from_path(common::CATALOG).unwrap();
    let products: ProductRepositoryBox = Box::new(InMemoryProductRepository::new(catalog));

    assert_eq!(products.list_all().await.unwrap().len(), 10);
    assert_eq!(products.list_categories().await.unwrap().len(), 4);
    assert!(products.find_by_id("999").await.unwrap().is_none());

    let home = products.find_category("home-living").await.unwrap().unwrap();
    assert_eq!(home.name, "Home & Living");
    let sports = products.list_by_category("sports").await.unwrap();
    let ids: Vec<&str> = sports.iter().map(|p| p.id.as_str()).collect();
    assert_eq!(ids, ["5", "9", "10"]);
}
