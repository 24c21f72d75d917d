use std::sync::RwLock;

use async_trait::async_trait;

use graphcrm_core::{CustomerId, OrderId, ProductId};
use graphcrm_customers::Customer;
use graphcrm_orders::Order;
use graphcrm_products::Product;

use super::r#trait::{EntityStore, StoreError};

/// In-memory entity store.
///
/// Intended for tests/dev. Records are kept in insertion order; not
/// optimized for performance.
#[derive(Debug, Default)]
pub struct InMemoryEntityStore {
    customers: RwLock<Vec<Customer>>,
    products: RwLock<Vec<Product>>,
    orders: RwLock<Vec<Order>>,
}

impl InMemoryEntityStore {
    pub fn new() -> Self {
        Self::default()
    }
}

fn poisoned() -> StoreError {
    StoreError::Backend("lock poisoned".to_string())
}

#[async_trait]
impl EntityStore for InMemoryEntityStore {
    async fn insert_customer(&self, customer: Customer) -> Result<Customer, StoreError> {
        let mut customers = self.customers.write().map_err(|_| poisoned())?;
        if customers.iter().any(|c| c.email() == customer.email()) {
            return Err(StoreError::DuplicateEmail(customer.email().to_string()));
        }
        customers.push(customer.clone());
        Ok(customer)
    }

    async fn customer_by_id(&self, id: CustomerId) -> Result<Option<Customer>, StoreError> {
        let customers = self.customers.read().map_err(|_| poisoned())?;
        Ok(customers.iter().find(|c| c.id() == id).cloned())
    }

    async fn customer_email_exists(&self, email: &str) -> Result<bool, StoreError> {
        let customers = self.customers.read().map_err(|_| poisoned())?;
        Ok(customers.iter().any(|c| c.email() == email))
    }

    async fn list_customers(&self) -> Result<Vec<Customer>, StoreError> {
        let customers = self.customers.read().map_err(|_| poisoned())?;
        Ok(customers.clone())
    }

    async fn insert_product(&self, product: Product) -> Result<Product, StoreError> {
        let mut products = self.products.write().map_err(|_| poisoned())?;
        products.push(product.clone());
        Ok(product)
    }

    async fn product_by_id(&self, id: ProductId) -> Result<Option<Product>, StoreError> {
        let products = self.products.read().map_err(|_| poisoned())?;
        Ok(products.iter().find(|p| p.id() == id).cloned())
    }

    async fn products_by_ids(&self, ids: &[ProductId]) -> Result<Vec<Product>, StoreError> {
        let products = self.products.read().map_err(|_| poisoned())?;
        // Iterating stored products keeps each match unique even when the
        // request repeats an id.
        Ok(products
            .iter()
            .filter(|p| ids.contains(&p.id()))
            .cloned()
            .collect())
    }

    async fn list_products(&self) -> Result<Vec<Product>, StoreError> {
        let products = self.products.read().map_err(|_| poisoned())?;
        Ok(products.clone())
    }

    async fn insert_order(&self, order: Order) -> Result<Order, StoreError> {
        let mut orders = self.orders.write().map_err(|_| poisoned())?;
        orders.push(order.clone());
        Ok(order)
    }

    async fn update_order_total(&self, id: OrderId, total_amount: u64) -> Result<(), StoreError> {
        let mut orders = self.orders.write().map_err(|_| poisoned())?;
        let order = orders
            .iter_mut()
            .find(|o| o.id() == id)
            .ok_or(StoreError::UnknownOrder(id))?;
        order.set_total(total_amount);
        Ok(())
    }

    async fn order_by_id(&self, id: OrderId) -> Result<Option<Order>, StoreError> {
        let orders = self.orders.read().map_err(|_| poisoned())?;
        Ok(orders.iter().find(|o| o.id() == id).cloned())
    }

    async fn list_orders(&self) -> Result<Vec<Order>, StoreError> {
        let orders = self.orders.read().map_err(|_| poisoned())?;
        Ok(orders.clone())
    }
}
