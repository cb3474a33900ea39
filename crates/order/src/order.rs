use serde::{Deserialize, Serialize};

use ordersys_core::{
    CustomerId, DomainError, DomainResult, Entity, Money, OrderId, ShopId, TrackingId, ValueObject,
};
use ordersys_shop::Product;

/// Order item identifier, sequential and 1-based, scoped to its parent order.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OrderItemId(u64);

impl OrderItemId {
    pub fn new(value: u64) -> Self {
        Self(value)
    }

    pub fn value(&self) -> u64 {
        self.0
    }
}

impl core::fmt::Display for OrderItemId {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        core::fmt::Display::fmt(&self.0, f)
    }
}

/// Order status lifecycle.
///
/// ```text
/// Pending --pay--> Paid --approve--> Approved
/// Pending --cancel--> Cancelled
/// Paid --init_cancel--> Cancelling --cancel--> Cancelled
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OrderStatus {
    Pending,
    Paid,
    Approved,
    Cancelling,
    Cancelled,
}

impl OrderStatus {
    /// Transition legality table for the order state machine.
    fn can_become(self, next: OrderStatus) -> bool {
        matches!(
            (self, next),
            (OrderStatus::Pending, OrderStatus::Paid)
                | (OrderStatus::Paid, OrderStatus::Approved)
                | (OrderStatus::Paid, OrderStatus::Cancelling)
                | (OrderStatus::Pending, OrderStatus::Cancelled)
                | (OrderStatus::Cancelling, OrderStatus::Cancelled)
        )
    }
}

/// Delivery address for an order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeliveryAddress {
    pub street: String,
    pub postal_code: String,
    pub city: String,
}

impl ValueObject for DeliveryAddress {}

/// Order line item, owned by its parent order.
///
/// Identity (the `OrderItemId` plus the parent order id) is assigned once,
/// when the order is initialized.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderItem {
    order_id: Option<OrderId>,
    id: Option<OrderItemId>,
    product: Product,
    quantity: u32,
    /// Unit price as declared on the order.
    price: Money,
    sub_total: Money,
}

impl OrderItem {
    pub fn new(product: Product, quantity: u32, price: Money, sub_total: Money) -> Self {
        Self {
            order_id: None,
            id: None,
            product,
            quantity,
            price,
            sub_total,
        }
    }

    pub fn id(&self) -> Option<OrderItemId> {
        self.id
    }

    pub fn order_id(&self) -> Option<OrderId> {
        self.order_id
    }

    pub fn product(&self) -> &Product {
        &self.product
    }

    pub fn quantity(&self) -> u32 {
        self.quantity
    }

    pub fn price(&self) -> Money {
        self.price
    }

    pub fn sub_total(&self) -> Money {
        self.sub_total
    }

    /// The line subtotal must equal unit price times quantity.
    fn is_price_valid(&self) -> bool {
        self.sub_total == self.price.multiply(self.quantity)
    }

    fn initialize(&mut self, order_id: OrderId, id: OrderItemId) {
        self.order_id = Some(order_id);
        self.id = Some(id);
    }
}

/// Everything needed to assemble an order.
///
/// Fresh orders leave `id`, `tracking_id` and `status` unset; reconstruction
/// from storage may pre-set them.
#[derive(Debug, Clone)]
pub struct OrderConfig {
    pub id: Option<OrderId>,
    pub customer_id: CustomerId,
    pub shop_id: ShopId,
    pub delivery_address: DeliveryAddress,
    pub price: Money,
    pub items: Vec<OrderItem>,
    pub tracking_id: Option<TrackingId>,
    pub status: Option<OrderStatus>,
    pub failure_messages: Vec<String>,
}

/// Aggregate root: Order.
///
/// Owns identity, the item collection, status, and every creation-time
/// invariant. An order is constructed empty of identity; `initialize`
/// assigns ids and the initial status, and every later status change goes
/// through the transition operations below.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Order {
    id: Option<OrderId>,
    customer_id: CustomerId,
    shop_id: ShopId,
    delivery_address: DeliveryAddress,
    price: Money,
    items: Vec<OrderItem>,
    tracking_id: Option<TrackingId>,
    status: Option<OrderStatus>,
    failure_messages: Vec<String>,
}

impl Order {
    pub fn new(config: OrderConfig) -> Self {
        Self {
            id: config.id,
            customer_id: config.customer_id,
            shop_id: config.shop_id,
            delivery_address: config.delivery_address,
            price: config.price,
            items: config.items,
            tracking_id: config.tracking_id,
            status: config.status,
            failure_messages: config.failure_messages,
        }
    }

    pub fn id(&self) -> Option<OrderId> {
        self.id
    }

    pub fn customer_id(&self) -> CustomerId {
        self.customer_id
    }

    pub fn shop_id(&self) -> ShopId {
        self.shop_id
    }

    pub fn delivery_address(&self) -> &DeliveryAddress {
        &self.delivery_address
    }

    pub fn price(&self) -> Money {
        self.price
    }

    pub fn items(&self) -> &[OrderItem] {
        &self.items
    }

    pub fn tracking_id(&self) -> Option<TrackingId> {
        self.tracking_id
    }

    pub fn status(&self) -> Option<OrderStatus> {
        self.status
    }

    pub fn failure_messages(&self) -> &[String] {
        &self.failure_messages
    }

    /// Assign a fresh `OrderId` and `TrackingId`, move to `Pending`, and
    /// stamp each item with its 1-based sequential `OrderItemId` and the
    /// parent order id.
    ///
    /// Preconditions (no id or status set yet) are enforced by [`validate`],
    /// which the domain service runs first.
    ///
    /// [`validate`]: Order::validate
    pub fn initialize(&mut self) {
        let id = OrderId::new();
        self.id = Some(id);
        self.tracking_id = Some(TrackingId::new());
        self.status = Some(OrderStatus::Pending);
        for (index, item) in self.items.iter_mut().enumerate() {
            item.initialize(id, OrderItemId::new(index as u64 + 1));
        }
    }

    /// Run the creation-time checks, in order: initial state, total price,
    /// then per-item prices against the declared total. Order matters:
    /// downstream messages reference the declared price, so the total is
    /// checked before the item-level pass.
    pub fn validate(&self) -> DomainResult<()> {
        self.validate_initial_state()?;
        self.validate_total_price()?;
        self.validate_items_price()
    }

    fn validate_initial_state(&self) -> DomainResult<()> {
        if self.status.is_some() || self.id.is_some() {
            return Err(DomainError::invariant(
                "order has already been initialized",
            ));
        }
        Ok(())
    }

    fn validate_total_price(&self) -> DomainResult<()> {
        if !self.price.is_greater_than_zero() {
            return Err(DomainError::validation(
                "total price must be greater than zero",
            ));
        }
        Ok(())
    }

    fn validate_items_price(&self) -> DomainResult<()> {
        let mut items_total = Money::ZERO;
        for item in &self.items {
            self.validate_item_price(item)?;
            items_total = items_total + item.sub_total();
        }
        if self.price != items_total {
            return Err(DomainError::validation(format!(
                "total price {} is not equal to order items total {}",
                self.price, items_total
            )));
        }
        Ok(())
    }

    fn validate_item_price(&self, item: &OrderItem) -> DomainResult<()> {
        if !item.is_price_valid() {
            return Err(DomainError::validation(format!(
                "order item price {} is not valid for product {}",
                item.price(),
                item.product().id()
            )));
        }
        Ok(())
    }

    /// `Pending` → `Paid`.
    pub fn pay(&mut self) -> DomainResult<()> {
        self.transition_to(OrderStatus::Paid, "pay")
    }

    /// `Paid` → `Approved`. Terminal on the success path.
    pub fn approve(&mut self) -> DomainResult<()> {
        self.transition_to(OrderStatus::Approved, "approve")
    }

    /// `Paid` → `Cancelling`, recording why the payment is being rolled back.
    pub fn init_cancel(&mut self, failure_messages: Vec<String>) -> DomainResult<()> {
        self.transition_to(OrderStatus::Cancelling, "init cancel")?;
        self.append_failure_messages(failure_messages);
        Ok(())
    }

    /// `Pending` or `Cancelling` → `Cancelled`. Terminal on the failure path.
    pub fn cancel(&mut self, failure_messages: Vec<String>) -> DomainResult<()> {
        self.transition_to(OrderStatus::Cancelled, "cancel")?;
        self.append_failure_messages(failure_messages);
        Ok(())
    }

    /// Move to `next` if the state machine allows it; an illegal transition
    /// (including any transition on an uninitialized order) is a conflict
    /// and leaves the status unchanged.
    fn transition_to(&mut self, next: OrderStatus, operation: &str) -> DomainResult<()> {
        match self.status {
            Some(current) if current.can_become(next) => {
                self.status = Some(next);
                Ok(())
            }
            _ => Err(DomainError::conflict(format!(
                "order is not in a valid state for the {operation} operation"
            ))),
        }
    }

    /// Failure messages are a possibly-empty list, never absent; empty
    /// strings are dropped on every append.
    fn append_failure_messages(&mut self, messages: Vec<String>) {
        self.failure_messages
            .extend(messages.into_iter().filter(|message| !message.is_empty()));
    }
}
