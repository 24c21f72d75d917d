use std::sync::Arc;

use async_trait::async_trait;
use thiserror::Error;

use graphcrm_core::{CustomerId, OrderId, ProductId};
use graphcrm_customers::Customer;
use graphcrm_orders::Order;
use graphcrm_products::Product;

/// Entity store operation error.
///
/// These are **infrastructure errors** (storage faults, constraint hits) as
/// opposed to domain validation errors. The mutation core folds them into
/// the single validation kind callers see.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Unique-email constraint hit on customer insert.
    #[error("email already exists: {0}")]
    DuplicateEmail(String),

    /// Order-total update targeted an order that does not exist.
    #[error("unknown order: {0}")]
    UnknownOrder(OrderId),

    /// Backend failure (connection, serialization, poisoned lock, ...).
    #[error("storage backend failure: {0}")]
    Backend(String),
}

/// Durable store for Customer/Product/Order records.
///
/// The store exclusively owns persisted state; callers hold no state
/// between operations. Implementations must enforce customer-email
/// uniqueness on insert, and `products_by_ids` silently drops ids that do
/// not resolve (callers decide whether an empty resolution is an error).
#[async_trait]
pub trait EntityStore: Send + Sync {
    /// Persist a new customer. Fails with `DuplicateEmail` if the email is
    /// already taken.
    async fn insert_customer(&self, customer: Customer) -> Result<Customer, StoreError>;

    async fn customer_by_id(&self, id: CustomerId) -> Result<Option<Customer>, StoreError>;

    /// Probe whether any customer already uses `email`.
    async fn customer_email_exists(&self, email: &str) -> Result<bool, StoreError>;

    async fn list_customers(&self) -> Result<Vec<Customer>, StoreError>;

    async fn insert_product(&self, product: Product) -> Result<Product, StoreError>;

    async fn product_by_id(&self, id: ProductId) -> Result<Option<Product>, StoreError>;

    /// Resolve the given ids to existing products; unknown ids are dropped,
    /// duplicates resolve once.
    async fn products_by_ids(&self, ids: &[ProductId]) -> Result<Vec<Product>, StoreError>;

    async fn list_products(&self) -> Result<Vec<Product>, StoreError>;

    /// Persist a new order together with its product association set.
    async fn insert_order(&self, order: Order) -> Result<Order, StoreError>;

    /// Persist a recomputed derived total for an existing order.
    async fn update_order_total(&self, id: OrderId, total_amount: u64) -> Result<(), StoreError>;

    async fn order_by_id(&self, id: OrderId) -> Result<Option<Order>, StoreError>;

    async fn list_orders(&self) -> Result<Vec<Order>, StoreError>;
}

#[async_trait]
impl<S> EntityStore for Arc<S>
where
    S: EntityStore + ?Sized,
{
    async fn insert_customer(&self, customer: Customer) -> Result<Customer, StoreError> {
        (**self).insert_customer(customer).await
    }

    async fn customer_by_id(&self, id: CustomerId) -> Result<Option<Customer>, StoreError> {
        (**self).customer_by_id(id).await
    }

    async fn customer_email_exists(&self, email: &str) -> Result<bool, StoreError> {
        (**self).customer_email_exists(email).await
    }

    async fn list_customers(&self) -> Result<Vec<Customer>, StoreError> {
        (**self).list_customers().await
    }

    async fn insert_product(&self, product: Product) -> Result<Product, StoreError> {
        (**self).insert_product(product).await
    }

    async fn product_by_id(&self, id: ProductId) -> Result<Option<Product>, StoreError> {
        (**self).product_by_id(id).await
    }

    async fn products_by_ids(&self, ids: &[ProductId]) -> Result<Vec<Product>, StoreError> {
        (**self).products_by_ids(ids).await
    }

    async fn list_products(&self) -> Result<Vec<Product>, StoreError> {
        (**self).list_products().await
    }

    async fn insert_order(&self, order: Order) -> Result<Order, StoreError> {
        (**self).insert_order(order).await
    }

    async fn update_order_total(&self, id: OrderId, total_amount: u64) -> Result<(), StoreError> {
        (**self).update_order_total(id, total_amount).await
    }

    async fn order_by_id(&self, id: OrderId) -> Result<Option<Order>, StoreError> {
        (**self).order_by_id(id).await
    }

    async fn list_orders(&self) -> Result<Vec<Order>, StoreError> {
        (**self).list_orders().await
    }
}
