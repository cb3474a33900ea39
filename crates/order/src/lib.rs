//! Order domain module.
//!
//! Business rules for placing an order against a shop's catalog and driving
//! it through its lifecycle, implemented purely as in-process domain logic
//! (no IO, no HTTP, no storage). Persistence and event delivery are the
//! caller's responsibility.

pub mod event;
pub mod order;
pub mod service;

pub use event::{OrderCancelledEvent, OrderCreatedEvent, OrderEvent, OrderPaidEvent};
pub use order::{DeliveryAddress, Order, OrderConfig, OrderItem, OrderItemId, OrderStatus};
pub use service::OrderDomainService;
