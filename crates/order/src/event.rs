//! Domain events emitted by the order lifecycle.
//!
//! Events are plain immutable records wrapping the order plus a creation
//! timestamp. Serialization and delivery are the publishing collaborator's
//! job; [`OrderEvent::into_envelope`] shapes the handoff unit for it.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use ordersys_core::{DomainError, DomainResult};
use ordersys_events::{DomainEvent, EventEnvelope};

use crate::order::Order;

/// Event: order validated and initiated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderCreatedEvent {
    pub order: Order,
    pub created_at: DateTime<Utc>,
}

/// Event: order paid.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderPaidEvent {
    pub order: Order,
    pub created_at: DateTime<Utc>,
}

/// Event: order cancellation initiated on the payment-compensation path.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderCancelledEvent {
    pub order: Order,
    pub created_at: DateTime<Utc>,
}

/// Tagged union of the order lifecycle events, for collaborators that
/// consume them uniformly.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum OrderEvent {
    OrderCreated(OrderCreatedEvent),
    OrderPaid(OrderPaidEvent),
    OrderCancelled(OrderCancelledEvent),
}

impl OrderEvent {
    /// The order the event refers to.
    pub fn order(&self) -> &Order {
        match self {
            OrderEvent::OrderCreated(e) => &e.order,
            OrderEvent::OrderPaid(e) => &e.order,
            OrderEvent::OrderCancelled(e) => &e.order,
        }
    }

    /// Wrap the event for the event-publishing collaborator.
    ///
    /// Events exist only for initialized orders, so a missing order id is a
    /// caller bug surfaced as a domain error rather than a panic.
    pub fn into_envelope(
        self,
        event_id: Uuid,
        sequence_number: u64,
    ) -> DomainResult<EventEnvelope<OrderEvent>> {
        let Some(order_id) = self.order().id() else {
            return Err(DomainError::invariant(
                "event refers to an uninitialized order",
            ));
        };
        Ok(EventEnvelope::new(
            event_id,
            order_id.into(),
            "order",
            sequence_number,
            self,
        ))
    }
}

impl From<OrderCreatedEvent> for OrderEvent {
    fn from(event: OrderCreatedEvent) -> Self {
        OrderEvent::OrderCreated(event)
    }
}

impl From<OrderPaidEvent> for OrderEvent {
    fn from(event: OrderPaidEvent) -> Self {
        OrderEvent::OrderPaid(event)
    }
}

impl From<OrderCancelledEvent> for OrderEvent {
    fn from(event: OrderCancelledEvent) -> Self {
        OrderEvent::OrderCancelled(event)
    }
}

impl DomainEvent for OrderEvent {
    fn event_type(&self) -> &'static str {
        match self {
            OrderEvent::OrderCreated(_) => "orders.order.created",
            OrderEvent::OrderPaid(_) => "orders.order.paid",
            OrderEvent::OrderCancelled(_) => "orders.order.cancelled",
        }
    }

    fn version(&self) -> u32 {
        1
    }

    fn occurred_at(&self) -> DateTime<Utc> {
        match self {
            OrderEvent::OrderCreated(e) => e.created_at,
            OrderEvent::OrderPaid(e) => e.created_at,
            OrderEvent::OrderCancelled(e) => e.created_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::order::{DeliveryAddress, OrderConfig, OrderItem};
    use ordersys_core::{CustomerId, Money, ProductId, ShopId};
    use ordersys_shop::Product;

    fn test_order(initialized: bool) -> Order {
        let price = Money::from_minor(500);
        let product = Product::new(ProductId::new(), "test product", price);
        let mut order = Order::new(OrderConfig {
            id: None,
            customer_id: CustomerId::new(),
            shop_id: ShopId::new(),
            delivery_address: DeliveryAddress {
                street: "1 Baker Street".into(),
                postal_code: "10117".into(),
                city: "Berlin".into(),
            },
            price,
            items: vec![OrderItem::new(product, 1, price, price)],
            tracking_id: None,
            status: None,
            failure_messages: Vec::new(),
        });
        if initialized {
            order.initialize();
        }
        order
    }

    #[test]
    fn event_types_discriminate_the_lifecycle() {
        let order = test_order(true);
        let created_at = Utc::now();

        let created: OrderEvent = OrderCreatedEvent {
            order: order.clone(),
            created_at,
        }
        .into();
        let paid: OrderEvent = OrderPaidEvent {
            order: order.clone(),
            created_at,
        }
        .into();
        let cancelled: OrderEvent = OrderCancelledEvent {
            order,
            created_at,
        }
        .into();

        assert_eq!(created.event_type(), "orders.order.created");
        assert_eq!(paid.event_type(), "orders.order.paid");
        assert_eq!(cancelled.event_type(), "orders.order.cancelled");
        assert_eq!(created.occurred_at(), created_at);
    }

    #[test]
    fn into_envelope_carries_the_order_stream_metadata() {
        let order = test_order(true);
        let order_id = order.id().unwrap();
        let event: OrderEvent = OrderCreatedEvent {
            order,
            created_at: Utc::now(),
        }
        .into();

        let event_id = Uuid::now_v7();
        let envelope = event.into_envelope(event_id, 1).unwrap();

        assert_eq!(envelope.event_id(), event_id);
        assert_eq!(envelope.aggregate_id(), Uuid::from(order_id));
        assert_eq!(envelope.aggregate_type(), "order");
        assert_eq!(envelope.sequence_number(), 1);
        assert_eq!(envelope.payload().event_type(), "orders.order.created");
    }

    #[test]
    fn into_envelope_rejects_an_uninitialized_order() {
        let event: OrderEvent = OrderCreatedEvent {
            order: test_order(false),
            created_at: Utc::now(),
        }
        .into();

        let err = event.into_envelope(Uuid::now_v7(), 1).unwrap_err();
        assert!(matches!(err, DomainError::InvariantViolation(_)));
    }

    #[test]
    fn created_event_serializes_for_the_publisher() {
        let event = OrderCreatedEvent {
            order: test_order(true),
            created_at: Utc::now(),
        };

        let json = serde_json::to_value(&event).unwrap();
        assert_eq!(json["order"]["status"], "pending");
        assert_eq!(json["order"]["price"], 500);
        assert!(json["created_at"].is_string());
    }
}
