use super::catalog::Product;
use super::money::Money;
use serde::{Deserialize, Serialize};

/// Variant selection and requested amount for an add-to-cart action.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AddOptions {
    pub size: Option<String>,
    pub color: Option<String>,
    pub quantity: i64,
}

impl Default for AddOptions {
    fn default() -> Self {
        Self {
            size: None,
            color: None,
            quantity: 1,
        }
    }
}

/// Identity of a cart line: the same product in a different size or color is a
/// different line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct LineKey<'a> {
    pub product_id: &'a str,
    pub size: Option<&'a str>,
    pub color: Option<&'a str>,
}

impl<'a> LineKey<'a> {
    pub fn new(product_id: &'a str, size: Option<&'a str>, color: Option<&'a str>) -> Self {
        Self {
            product_id,
            size,
            color,
        }
    }
}

/// A product snapshot taken at add time plus the selected variant and quantity.
///
/// `quantity` is never zero: a line driven to zero is removed from the cart.
#[derive(Debug, Serialize, Deserialize, PartialEq, Clone)]
#[serde(rename_all = "camelCase")]
pub struct CartLineItem {
    pub product: Product,
    pub quantity: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub selected_size: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub selected_color: Option<String>,
}

impl CartLineItem {
    pub fn key(&self) -> LineKey<'_> {
        LineKey::new(
            &self.product.id,
            self.selected_size.as_deref(),
            self.selected_color.as_deref(),
        )
    }

    /// Unit price times quantity.
    pub fn line_total(&self) -> Money {
        self.product.price.times(self.quantity)
    }
}

/// Clamps a requested quantity into the stored range. `None` means "remove".
fn normalize_quantity(requested: i64) -> Option<u32> {
    if requested <= 0 {
        None
    } else {
        Some(u32::try_from(requested).unwrap_or(u32::MAX))
    }
}

/// The shopping cart: line items in insertion order of their first add.
///
/// Totals are always computed from the lines; the cart stores nothing else.
#[derive(Debug, Serialize, Deserialize, PartialEq, Clone, Default)]
pub struct Cart {
    lines: Vec<CartLineItem>,
}

impl Cart {
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuilds a cart read back from storage by replaying every saved line
    /// through [`Cart::add`]. Zero-quantity lines and lines whose product fails
    /// validation are dropped; lines sharing a key are merged.
    pub fn restore(saved: Cart) -> Self {
        let mut cart = Self::new();
        for line in saved.lines {
            if line.product.validate().is_err() {
                continue;
            }
            let options = AddOptions {
                size: line.selected_size,
                color: line.selected_color,
                quantity: i64::from(line.quantity),
            };
            cart.add(&line.product, options);
        }
        cart
    }

    pub fn lines(&self) -> &[CartLineItem] {
        &self.lines
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    pub fn line(&self, key: LineKey<'_>) -> Option<&CartLineItem> {
        self.lines.iter().find(|line| line.key() == key)
    }

    fn position(&self, key: LineKey<'_>) -> Option<usize> {
        self.lines.iter().position(|line| line.key() == key)
    }

    /// Adds `options.quantity` units of a product variant, merging into an
    /// existing line with the same key. Returns `false` when nothing changed.
    pub fn add(&mut self, product: &Product, options: AddOptions) -> bool {
        let Some(quantity) = normalize_quantity(options.quantity) else {
            return false;
        };

        let key = LineKey::new(
            &product.id,
            options.size.as_deref(),
            options.color.as_deref(),
        );
        match self.position(key) {
            Some(index) => {
                let line = &mut self.lines[index];
                line.quantity = line.quantity.saturating_add(quantity);
            }
            None => self.lines.push(CartLineItem {
                product: product.clone(),
                quantity,
                selected_size: options.size,
                selected_color: options.color,
            }),
        }
        true
    }

    /// Sets a line's quantity; zero or less removes the line.
    pub fn set_quantity(&mut self, key: LineKey<'_>, quantity: i64) -> bool {
        let Some(index) = self.position(key) else {
            return false;
        };
        match normalize_quantity(quantity) {
            Some(quantity) => self.lines[index].quantity = quantity,
            None => {
                self.lines.remove(index);
            }
        }
        true
    }

    pub fn remove(&mut self, key: LineKey<'_>) -> bool {
        match self.position(key) {
            Some(index) => {
                self.lines.remove(index);
                true
            }
            None => false,
        }
    }

    pub fn clear(&mut self) {
        self.lines.clear();
    }

    /// Sum of all line quantities.
    pub fn total_items(&self) -> u64 {
        self.lines.iter().map(|line| u64::from(line.quantity)).sum()
    }

    /// Sum of price times quantity over all lines.
    pub fn total_price(&self) -> Money {
        self.lines.iter().map(CartLineItem::line_total).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::catalog::fixtures::product;
    use rust_decimal_macros::dec;

    fn sized(size: &str, quantity: i64) -> AddOptions {
        AddOptions {
            size: Some(size.to_string()),
            quantity,
            ..AddOptions::default()
        }
    }

    fn assert_totals_consistent(cart: &Cart) {
        let items: u64 = cart.lines().iter().map(|l| u64::from(l.quantity)).sum();
        let price = cart
            .lines()
            .iter()
            .fold(dec!(0), |acc, l| acc + l.product.price.value() * rust_decimal::Decimal::from(l.quantity));
        assert_eq!(cart.total_items(), items);
        assert_eq!(cart.total_price().value(), price);
    }

    fn saved_line(id: &str, size: Option<&str>, quantity: u32) -> CartLineItem {
        CartLineItem {
            product: product(id, "fashion", dec!(10)),
            quantity,
            selected_size: size.map(str::to_string),
            selected_color: None,
        }
    }

    #[test]
    fn test_restore_repairs_saved_lines() {
        let mut broken = product("x", "fashion", dec!(10));
        broken.images.clear();
        let saved = Cart {
            lines: vec![
                saved_line("a", Some("M"), 2),
                saved_line("b", None, 0),
                saved_line("a", Some("M"), 3),
                CartLineItem {
                    product: broken,
                    ..saved_line("x", None, 1)
                },
                saved_line("a", Some("L"), 1),
            ],
        };

        let cart = Cart::restore(saved);
        assert_eq!(cart.lines().len(), 2);
        assert_eq!(cart.line(LineKey::new("a", Some("M"), None)).unwrap().quantity, 5);
        assert_eq!(cart.line(LineKey::new("a", Some("L"), None)).unwrap().quantity, 1);
        assert!(cart.lines().iter().all(|line| line.quantity >= 1));
        assert_totals_consistent(&cart);
    }

    #[test]
    fn test_same_variant_merges() {
        let a = product("a", "fashion", dec!(10));
        let mut cart = Cart::new();
        cart.add(&a, AddOptions::default());
        cart.add(&a, AddOptions::default());
        cart.add(&a, AddOptions { quantity: 3, ..AddOptions::default() });

        assert_eq!(cart.lines().len(), 1);
        assert_eq!(cart.lines()[0].quantity, 5);
        assert_totals_consistent(&cart);
    }

    #[test]
    fn test_different_variants_are_separate_lines() {
        let a = product("a", "fashion", dec!(10));
        let mut cart = Cart::new();
        cart.add(&a, sized("M", 1));
        cart.add(&a, sized("L", 1));
        cart.add(&a, AddOptions::default());

        assert_eq!(cart.lines().len(), 3);
        assert_eq!(cart.lines()[0].selected_size.as_deref(), Some("M"));
        assert_eq!(cart.lines()[2].selected_size, None);
    }

    #[test]
    fn test_non_positive_add_is_noop() {
        let a = product("a", "fashion", dec!(10));
        let mut cart = Cart::new();
        assert!(!cart.add(&a, sized("M", 0)));
        assert!(!cart.add(&a, sized("M", -2)));
        assert!(cart.is_empty());
    }

    #[test]
    fn test_totals_scenario() {
        let a = product("a", "fashion", dec!(10));
        let b = product("b", "sports", dec!(25));
        let mut cart = Cart::new();
        cart.add(&a, AddOptions { quantity: 2, ..AddOptions::default() });
        cart.add(&b, AddOptions::default());

        assert_eq!(cart.total_items(), 3);
        assert_eq!(cart.total_price().value(), dec!(45.00));
    }

    #[test]
    fn test_set_quantity_zero_removes_and_remove_is_idempotent() {
        let a = product("a", "fashion", dec!(10));
        let mut cart = Cart::new();
        cart.add(&a, sized("M", 2));

        let key = LineKey::new("a", Some("M"), None);
        assert!(cart.set_quantity(key, 0));
        assert!(cart.is_empty());
        assert!(!cart.remove(key));
        assert_eq!(cart.total_price(), Money::ZERO);
    }

    #[test]
    fn test_set_quantity_on_missing_line_is_noop() {
        let a = product("a", "fashion", dec!(10));
        let mut cart = Cart::new();
        cart.add(&a, AddOptions::default());

        assert!(!cart.set_quantity(LineKey::new("a", Some("XL"), None), 4));
        assert_eq!(cart.total_items(), 1);
    }

    #[test]
    fn test_line_order_follows_first_add() {
        let a = product("a", "fashion", dec!(10));
        let b = product("b", "fashion", dec!(20));
        let mut cart = Cart::new();
        cart.add(&a, AddOptions::default());
        cart.add(&b, AddOptions::default());
        cart.add(&a, AddOptions::default());

        let ids: Vec<&str> = cart.lines().iter().map(|l| l.product.id.as_str()).collect();
        assert_eq!(ids, ["a", "b"]);
    }

    #[test]
    fn test_totals_after_every_mutation() {
        let a = product("a", "fashion", dec!(9.99));
        let b = product("b", "sports", dec!(0.5));
        let mut cart = Cart::new();

        cart.add(&a, sized("S", 3));
        assert_totals_consistent(&cart);
        cart.add(&b, AddOptions::default());
        assert_totals_consistent(&cart);
        cart.set_quantity(LineKey::new("a", Some("S"), None), 1);
        assert_totals_consistent(&cart);
        cart.remove(LineKey::new("b", None, None));
        assert_totals_consistent(&cart);
        cart.clear();
        assert_totals_consistent(&cart);
        assert_eq!(cart.total_items(), 0);
    }
}
