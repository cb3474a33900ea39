//! Order domain service: multi-step business operations spanning the order
//! aggregate and the shop it was placed with.

use chrono::Utc;

use ordersys_core::{DomainError, DomainResult, Entity};
use ordersys_shop::Shop;

use crate::event::{OrderCancelledEvent, OrderCreatedEvent, OrderPaidEvent};
use crate::order::Order;

/// Orchestrates the order aggregate across the broader workflow.
///
/// Operations mutate the passed order and shape the domain event the caller
/// must hand to the publishing collaborator. No I/O happens here; the caller
/// owns persistence, event delivery, and exclusive access to the order for
/// the duration of one operation.
#[derive(Debug, Default, Clone, Copy)]
pub struct OrderDomainService;

impl OrderDomainService {
    pub fn new() -> Self {
        Self
    }

    /// Cross-check the order against the shop it was placed with, validate
    /// its creation-time invariants, and initiate it.
    pub fn validate_and_initiate_order(
        &self,
        order: &mut Order,
        shop: &Shop,
    ) -> DomainResult<OrderCreatedEvent> {
        validate_shop(shop)?;
        validate_products(order, shop)?;
        order.validate()?;
        order.initialize();
        tracing::info!(order_id = ?order.id(), "order initiated");

        Ok(OrderCreatedEvent {
            order: order.clone(),
            created_at: Utc::now(),
        })
    }

    /// `Pending` → `Paid`.
    pub fn pay_order(&self, order: &mut Order) -> DomainResult<OrderPaidEvent> {
        order.pay()?;
        tracing::info!(order_id = ?order.id(), "order paid");

        Ok(OrderPaidEvent {
            order: order.clone(),
            created_at: Utc::now(),
        })
    }

    /// `Paid` → `Approved`. Approval is terminal and silent at this layer;
    /// collaborators observe it through the persisted order status.
    pub fn approve_order(&self, order: &mut Order) -> DomainResult<()> {
        order.approve()?;
        tracing::info!(order_id = ?order.id(), "order approved");
        Ok(())
    }

    /// `Paid` → `Cancelling`, notifying collaborators that the payment must
    /// be compensated.
    pub fn cancel_order_payment(
        &self,
        order: &mut Order,
        failure_messages: Vec<String>,
    ) -> DomainResult<OrderCancelledEvent> {
        order.init_cancel(failure_messages)?;
        tracing::info!(order_id = ?order.id(), "order payment is cancelling");

        Ok(OrderCancelledEvent {
            order: order.clone(),
            created_at: Utc::now(),
        })
    }

    /// `Pending` or `Cancelling` → `Cancelled`. Terminal; no event.
    pub fn cancel_order(
        &self,
        order: &mut Order,
        failure_messages: Vec<String>,
    ) -> DomainResult<()> {
        order.cancel(failure_messages)?;
        tracing::info!(order_id = ?order.id(), "order cancelled");
        Ok(())
    }
}

fn validate_shop(shop: &Shop) -> DomainResult<()> {
    if !shop.is_active() {
        return Err(DomainError::validation(format!(
            "shop {} is currently not active",
            shop.id()
        )));
    }
    Ok(())
}

/// Every product referenced by an order item must exist in the shop's
/// catalog, and the item's declared unit price must match the catalog price.
fn validate_products(order: &Order, shop: &Shop) -> DomainResult<()> {
    for item in order.items() {
        let product_id = item.product().id();
        let Some(catalog_product) = shop.product(product_id) else {
            return Err(DomainError::not_found(format!(
                "product {product_id} is not in the catalog of shop {}",
                shop.id()
            )));
        };
        if catalog_product.price() != item.price() {
            return Err(DomainError::validation(format!(
                "order item price {} does not match catalog price {} for product {product_id}",
                item.price(),
                catalog_product.price()
            )));
        }
    }
    Ok(())
}
