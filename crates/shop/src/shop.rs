use serde::{Deserialize, Serialize};

use ordersys_core::{AggregateRoot, Entity, Money, ProductId, ShopId};

/// Read-only catalog fact: a product as the shop currently sells it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    id: ProductId,
    name: String,
    price: Money,
}

impl Product {
    pub fn new(id: ProductId, name: impl Into<String>, price: Money) -> Self {
        Self {
            id,
            name: name.into(),
            price,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn price(&self) -> Money {
        self.price
    }
}

impl Entity for Product {
    type Id = ProductId;

    fn id(&self) -> &ProductId {
        &self.id
    }
}

/// Aggregate root: Shop.
///
/// Snapshot of the catalog an order is validated against. An order may only
/// be initiated against an active shop.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Shop {
    id: ShopId,
    products: Vec<Product>,
    active: bool,
}

impl Shop {
    pub fn new(id: ShopId, products: Vec<Product>, active: bool) -> Self {
        Self {
            id,
            products,
            active,
        }
    }

    pub fn products(&self) -> &[Product] {
        &self.products
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    /// Catalog lookup by product id.
    pub fn product(&self, id: &ProductId) -> Option<&Product> {
        self.products.iter().find(|product| product.id() == id)
    }
}

impl Entity for Shop {
    type Id = ShopId;

    fn id(&self) -> &ShopId {
        &self.id
    }
}

impl AggregateRoot for Shop {}
