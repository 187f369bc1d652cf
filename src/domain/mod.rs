//! Domain layer: catalog, cart and checkout entities, the filter/sort
//! pipeline, and the ports the application layer depends on.

pub mod action;
pub mod cart;
pub mod catalog;
pub mod checkout;
pub mod filter;
pub mod money;
pub mod order;
pub mod ports;
