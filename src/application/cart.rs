use crate::domain::cart::{AddOptions, Cart, CartLineItem, LineKey};
use crate::domain::catalog::Product;
use crate::domain::money::Money;
use tracing::debug;

/// The session's cart store.
///
/// `CartEngine` owns the authoritative [`Cart`] and the drawer visibility flag.
/// Every mutation is synchronous; totals are read straight from the lines, so
/// no reader can observe a cart whose totals lag behind its contents.
///
/// Mutators return `true` when the cart changed, which callers use to decide
/// whether to persist it.
#[derive(Debug, Default, Clone)]
pub struct CartEngine {
    cart: Cart,
    is_cart_open: bool,
}

impl CartEngine {
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts from a previously saved cart.
    pub fn with_cart(cart: Cart) -> Self {
        Self {
            cart,
            is_cart_open: false,
        }
    }

    pub fn cart(&self) -> &Cart {
        &self.cart
    }

    pub fn lines(&self) -> &[CartLineItem] {
        self.cart.lines()
    }

    pub fn is_empty(&self) -> bool {
        self.cart.is_empty()
    }

    /// Adds a product variant. Stock is not checked.
    pub fn add_to_cart(&mut self, product: &Product, options: AddOptions) -> bool {
        let requested = options.quantity;
        let changed = self.cart.add(product, options);
        debug!(
            product = %product.id,
            requested,
            changed,
            total_items = self.total_items(),
            "add to cart"
        );
        changed
    }

    pub fn update_quantity(
        &mut self,
        product_id: &str,
        size: Option<&str>,
        color: Option<&str>,
        new_quantity: i64,
    ) -> bool {
        let changed = self
            .cart
            .set_quantity(LineKey::new(product_id, size, color), new_quantity);
        debug!(
            product = product_id,
            new_quantity,
            changed,
            total_items = self.total_items(),
            "update quantity"
        );
        changed
    }

    pub fn remove_from_cart(
        &mut self,
        product_id: &str,
        size: Option<&str>,
        color: Option<&str>,
    ) -> bool {
        let changed = self.cart.remove(LineKey::new(product_id, size, color));
        debug!(product = product_id, changed, "remove from cart");
        changed
    }

    pub fn clear_cart(&mut self) {
        self.cart.clear();
        debug!("cart cleared");
    }

    pub fn total_items(&self) -> u64 {
        self.cart.total_items()
    }

    pub fn total_price(&self) -> Money {
        self.cart.total_price()
    }

    pub fn is_cart_open(&self) -> bool {
        self.is_cart_open
    }

    pub fn open_cart(&mut self) {
        self.is_cart_open = true;
    }

    pub fn close_cart(&mut self) {
        self.is_cart_open = false;
    }

    pub fn toggle_cart(&mut self) {
        self.is_cart_open = !self.is_cart_open;
    }
}
