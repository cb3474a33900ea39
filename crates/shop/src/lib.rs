//! Shop catalog domain module.
//!
//! A `Shop` is its own aggregate; orders hold a `ShopId` reference and are
//! cross-checked against a shop snapshot at initiation time. Pure domain
//! logic (no IO, no HTTP, no storage).

pub mod shop;

pub use shop::{Product, Shop};
