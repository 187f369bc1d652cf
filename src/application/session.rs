use super::cart::CartEngine;
use super::checkout::{AdvanceOutcome, CheckoutConfig, CheckoutSequencer};
use crate::domain::action::{ActionType, SessionAction};
use crate::domain::cart::{AddOptions, Cart};
use crate::domain::catalog::Product;
use crate::domain::filter::{self, FilterSpec};
use crate::domain::order::OrderConfirmation;
use crate::domain::ports::{CartStoreBox, CheckoutBackendRef, ProductRepositoryBox};
use crate::error::{Result, StorefrontError};
use tracing::{info, warn};

/// One shopper's session: the catalog, their cart and an optional checkout.
///
/// `StorefrontSession` is the explicit store handed to every consumer. It owns
/// the [`CartEngine`], persists the cart through the [`CartStore`] port after
/// each change, and builds a [`CheckoutSequencer`] when the shopper proceeds to
/// checkout.
///
/// [`CartStore`]: crate::domain::ports::CartStore
pub struct StorefrontSession {
    products: ProductRepositoryBox,
    cart_store: CartStoreBox,
    backend: CheckoutBackendRef,
    config: CheckoutConfig,
    cart: CartEngine,
    checkout: Option<CheckoutSequencer>,
    confirmations: Vec<OrderConfirmation>,
}

impl StorefrontSession {
    /// Opens a session, resuming the saved cart if the store has one.
    pub async fn open(
        products: ProductRepositoryBox,
        cart_store: CartStoreBox,
        backend: CheckoutBackendRef,
        config: CheckoutConfig,
    ) -> Result<Self> {
        let cart = match cart_store.load().await? {
            Some(saved) => {
                let saved_lines = saved.lines().len();
                let cart = Cart::restore(saved);
                if cart.lines().len() != saved_lines {
                    warn!(
                        saved = saved_lines,
                        kept = cart.lines().len(),
                        "saved cart had invalid or duplicate lines"
                    );
                }
                info!(items = cart.total_items(), "resumed saved cart");
                CartEngine::with_cart(cart)
            }
            None => CartEngine::new(),
        };
        Ok(Self {
            products,
            cart_store,
            backend,
            config,
            cart,
            checkout: None,
            confirmations: Vec::new(),
        })
    }

    pub fn cart(&self) -> &CartEngine {
        &self.cart
    }

    pub fn checkout(&self) -> Option<&CheckoutSequencer> {
        self.checkout.as_ref()
    }

    /// Orders placed during this session, oldest first.
    pub fn confirmations(&self) -> &[OrderConfirmation] {
        &self.confirmations
    }

    /// The product listing for a filter spec.
    pub async fn browse(&self, spec: &FilterSpec) -> Result<Vec<Product>> {
        let products = self.products.list_all().await?;
        Ok(filter::apply(&products, spec))
    }

    pub async fn add_to_cart(&mut self, product_id: &str, options: AddOptions) -> Result<bool> {
        let Some(product) = self.products.find_by_id(product_id).await? else {
            return Err(StorefrontError::ProductNotFound(product_id.to_string()));
        };
        let changed = self.cart.add_to_cart(&product, options);
        self.persist_if(changed).await?;
        Ok(changed)
    }

    pub async fn update_quantity(
        &mut self,
        product_id: &str,
        size: Option<&str>,
        color: Option<&str>,
        quantity: i64,
    ) -> Result<bool> {
        let changed = self
            .cart
            .update_quantity(product_id, size, color, quantity);
        self.persist_if(changed).await?;
        Ok(changed)
    }

    pub async fn remove_from_cart(
        &mut self,
        product_id: &str,
        size: Option<&str>,
        color: Option<&str>,
    ) -> Result<bool> {
        let changed = self.cart.remove_from_cart(product_id, size, color);
        self.persist_if(changed).await?;
        Ok(changed)
    }

    pub async fn clear_cart(&mut self) -> Result<()> {
        self.cart.clear_cart();
        self.persist_if(true).await
    }

    pub fn toggle_cart(&mut self) {
        self.cart.toggle_cart();
    }

    pub fn open_cart(&mut self) {
        self.cart.open_cart();
    }

    pub fn close_cart(&mut self) {
        self.cart.close_cart();
    }

    /// Closes the drawer and enters checkout. With an empty cart the shopper is
    /// sent back to the catalog instead (`EmptyCart`).
    pub fn begin_checkout(&mut self) -> Result<()> {
        self.cart.close_cart();
        let sequencer = CheckoutSequencer::begin(&self.cart, self.backend.clone(), self.config)?;
        self.checkout = Some(sequencer);
        Ok(())
    }

    pub async fn advance_checkout(&mut self) -> Result<AdvanceOutcome> {
        let Some(sequencer) = self.checkout.as_mut() else {
            return Err(StorefrontError::ValidationError(
                "Checkout has not been started".to_string(),
            ));
        };
        let outcome = sequencer.advance(&mut self.cart).await?;
        if let AdvanceOutcome::Completed(confirmation) = &outcome {
            self.confirmations.push(confirmation.clone());
            self.persist_if(true).await?;
        }
        Ok(outcome)
    }

    pub fn checkout_back(&mut self) -> bool {
        self.checkout
            .as_mut()
            .is_some_and(CheckoutSequencer::back)
    }

    /// Applies one scripted action.
    pub async fn process_action(&mut self, action: SessionAction) -> Result<()> {
        let SessionAction {
            action: kind,
            product,
            size,
            color,
            quantity,
        } = action;

        match kind {
            ActionType::Add => {
                let product_id = require_product(product)?;
                let options = AddOptions {
                    size,
                    color,
                    quantity: quantity.unwrap_or(1),
                };
                self.add_to_cart(&product_id, options).await?;
            }
            ActionType::Update => {
                let product_id = require_product(product)?;
                let quantity = quantity.ok_or_else(|| {
                    StorefrontError::ValidationError("Update requires a quantity".to_string())
                })?;
                self.update_quantity(&product_id, size.as_deref(), color.as_deref(), quantity)
                    .await?;
            }
            ActionType::Remove => {
                let product_id = require_product(product)?;
                self.remove_from_cart(&product_id, size.as_deref(), color.as_deref())
                    .await?;
            }
            ActionType::Clear => self.clear_cart().await?,
            ActionType::Open => self.open_cart(),
            ActionType::Close => self.close_cart(),
            ActionType::Toggle => self.toggle_cart(),
            ActionType::Checkout => {
                if let Err(e) = self.begin_checkout() {
                    warn!(error = %e, "checkout unavailable, returning to catalog");
                }
            }
            ActionType::Advance => {
                self.advance_checkout().await?;
            }
            ActionType::Back => {
                self.checkout_back();
            }
        }
        Ok(())
    }

    /// Consumes the session and returns the final cart.
    pub fn into_cart(self) -> Cart {
        self.cart.cart().clone()
    }

    async fn persist_if(&self, changed: bool) -> Result<()> {
        if changed {
            self.cart_store.save(self.cart.cart()).await?;
        }
        Ok(())
    }
}

fn require_product(product: Option<String>) -> Result<String> {
    product.ok_or_else(|| StorefrontError::ValidationError("Action requires a product".to_string()))
}
