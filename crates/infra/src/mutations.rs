//! Validation & mutation core.
//!
//! Stateless create operations over any [`EntityStore`]. Each function
//! validates raw input, persists on success, and returns either the created
//! entity or a `DomainError::Validation` carrying a human-readable message.
//! Storage faults surface as the same validation kind; callers see a single
//! error shape.

use chrono::Utc;
use tracing::instrument;

use graphcrm_core::{CustomerId, DomainError, DomainResult, OrderId, ProductId};
use graphcrm_customers::{Customer, NewCustomer};
use graphcrm_orders::Order;
use graphcrm_products::{NewProduct, Product};

use crate::entity_store::{EntityStore, StoreError};

impl From<StoreError> for DomainError {
    fn from(value: StoreError) -> Self {
        match value {
            StoreError::DuplicateEmail(_) => DomainError::validation("Email already exists."),
            other => DomainError::validation(other.to_string()),
        }
    }
}

/// Create a single customer.
///
/// Fails if name/email are blank or the email is already taken; nothing is
/// persisted on failure.
pub async fn create_customer(
    store: &dyn EntityStore,
    input: NewCustomer,
) -> DomainResult<Customer> {
    let customer = Customer::create(CustomerId::new(), input)?;
    if store.customer_email_exists(customer.email()).await? {
        return Err(DomainError::validation("Email already exists."));
    }
    // The store re-checks uniqueness on insert; a race between the probe and
    // the insert still yields the duplicate-email message.
    let customer = store.insert_customer(customer).await?;
    Ok(customer)
}

/// Result of a bulk customer creation: partial success is a normal outcome.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BulkCreateOutcome {
    pub customers: Vec<Customer>,
    pub errors: Vec<String>,
}

/// Create many customers with independent per-item commits.
///
/// Each item is processed in order; a failing item contributes a
/// `"<name>: <error message>"` string and does not abort the rest.
#[instrument(skip(store, inputs), fields(items = inputs.len()))]
pub async fn bulk_create_customers(
    store: &dyn EntityStore,
    inputs: Vec<NewCustomer>,
) -> BulkCreateOutcome {
    let mut customers = Vec::new();
    let mut errors = Vec::new();

    for input in inputs {
        let name = input.name.clone();
        match create_customer(store, input).await {
            Ok(customer) => customers.push(customer),
            Err(err) => errors.push(format!("{name}: {err}")),
        }
    }

    tracing::debug!(created = customers.len(), failed = errors.len(), "bulk create finished");
    BulkCreateOutcome { customers, errors }
}

/// Create a single product. `stock` defaults to 0.
pub async fn create_product(store: &dyn EntityStore, input: NewProduct) -> DomainResult<Product> {
    let product = Product::create(ProductId::new(), input)?;
    let product = store.insert_product(product).await?;
    Ok(product)
}

/// Create an order for an existing customer over an existing product set.
///
/// Product ids that do not resolve are silently dropped; the order fails
/// only when none resolve. The order row must exist before associations are
/// attached, and the derived total is recomputed and persisted afterwards —
/// two persistence operations, in that order.
#[instrument(skip_all, fields(customer = %customer_id, requested = product_ids.len()))]
pub async fn create_order(
    store: &dyn EntityStore,
    customer_id: CustomerId,
    product_ids: Vec<ProductId>,
) -> DomainResult<Order> {
    let customer = store
        .customer_by_id(customer_id)
        .await?
        .ok_or_else(|| DomainError::validation("Invalid customer ID"))?;

    let products = store.products_by_ids(&product_ids).await?;
    if products.is_empty() {
        return Err(DomainError::validation("Invalid product IDs"));
    }

    // Checked up front so an overflowing product set persists nothing.
    let total = Order::total_of(&products)?;

    let resolved: Vec<ProductId> = products.iter().map(Product::id).collect();
    let order = Order::new(OrderId::new(), customer.id(), resolved, Utc::now());
    let mut order = store.insert_order(order).await?;

    store.update_order_total(order.id(), total).await?;
    order.set_total(total);

    tracing::info!(order_id = %order.id(), total_amount = total, "order created");
    Ok(order)
}
