use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use graphcrm_core::{CustomerId, DomainError, DomainResult, OrderId, ProductId};
use graphcrm_products::Product;

/// Entity: Order.
///
/// Holds a required customer reference and the product set fixed at
/// creation time. `total_amount` is derived: it must equal the sum of the
/// prices of the associated products at the time it was last computed.
/// `order_date` is set once at creation and never changes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Order {
    id: OrderId,
    customer_id: CustomerId,
    product_ids: Vec<ProductId>,
    /// Derived total in smallest currency unit (e.g., cents).
    total_amount: u64,
    order_date: DateTime<Utc>,
}

impl Order {
    /// Build a new order with a zero total.
    ///
    /// The total is recomputed and persisted as a separate step once the
    /// product associations are in place.
    pub fn new(
        id: OrderId,
        customer_id: CustomerId,
        product_ids: Vec<ProductId>,
        order_date: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            customer_id,
            product_ids,
            total_amount: 0,
            order_date,
        }
    }

    /// Rebuild from already-persisted values.
    pub fn from_parts(
        id: OrderId,
        customer_id: CustomerId,
        product_ids: Vec<ProductId>,
        total_amount: u64,
        order_date: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            customer_id,
            product_ids,
            total_amount,
            order_date,
        }
    }

    /// Sum of product prices, in smallest currency unit.
    ///
    /// Individual prices are unbounded within `u64`, so the sum is checked;
    /// an overflowing product set is a validation failure, never a wrapped
    /// total.
    pub fn total_of(products: &[Product]) -> DomainResult<u64> {
        products
            .iter()
            .try_fold(0u64, |acc, p| acc.checked_add(p.price()))
            .ok_or_else(|| DomainError::validation("Order total exceeds the supported range."))
    }

    /// Overwrite the derived total after (re)computation.
    pub fn set_total(&mut self, total_amount: u64) {
        self.total_amount = total_amount;
    }

    pub fn id(&self) -> OrderId {
        self.id
    }

    pub fn customer_id(&self) -> CustomerId {
        self.customer_id
    }

    pub fn product_ids(&self) -> &[ProductId] {
        &self.product_ids
    }

    /// Derived total in smallest currency unit.
    pub fn total_amount(&self) -> u64 {
        self.total_amount
    }

    pub fn order_date(&self) -> DateTime<Utc> {
        self.order_date
    }
}
