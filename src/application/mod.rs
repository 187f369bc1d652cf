//! Application layer containing the storefront's stateful logic.
//!
//! `CartEngine` owns the cart, `CheckoutSequencer` drives the checkout steps,
//! and `StorefrontSession` ties both to the catalog and the persistence ports.

pub mod cart;
pub mod checkout;
pub mod session;
