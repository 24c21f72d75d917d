//! GraphQL object and input types wrapping the domain entities.

use std::sync::Arc;

use async_graphql::{Context, InputObject, Object, Result, SimpleObject, ID};
use chrono::{DateTime, Utc};

use graphcrm_customers::NewCustomer;
use graphcrm_infra::EntityStore;

/// A CRM customer.
#[derive(Debug, Clone, SimpleObject)]
pub struct Customer {
    pub id: ID,
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
}

impl From<&graphcrm_customers::Customer> for Customer {
    fn from(customer: &graphcrm_customers::Customer) -> Self {
        Self {
            id: ID(customer.id().to_string()),
            name: customer.name().to_string(),
            email: customer.email().to_string(),
            phone: customer.phone().map(str::to_string),
        }
    }
}

/// A sellable product. Monetary values are integer cents.
#[derive(Debug, Clone, SimpleObject)]
pub struct Product {
    pub id: ID,
    pub name: String,
    /// Price in smallest currency unit (cents).
    pub price: i64,
    pub stock: i64,
}

impl From<&graphcrm_products::Product> for Product {
    fn from(product: &graphcrm_products::Product) -> Self {
        Self {
            id: ID(product.id().to_string()),
            name: product.name().to_string(),
            price: product.price() as i64,
            stock: i64::from(product.stock()),
        }
    }
}

/// An order; `customer` and `products` resolve through the entity store.
#[derive(Debug, Clone)]
pub struct Order(pub graphcrm_orders::Order);

#[Object]
impl Order {
    async fn id(&self) -> ID {
        ID(self.0.id().to_string())
    }

    /// Derived total in smallest currency unit (cents).
    async fn total_amount(&self) -> i64 {
        self.0.total_amount() as i64
    }

    async fn order_date(&self) -> DateTime<Utc> {
        self.0.order_date()
    }

    async fn customer(&self, ctx: &Context<'_>) -> Result<Customer> {
        let store = ctx.data::<Arc<dyn EntityStore>>()?;
        let customer = store
            .customer_by_id(self.0.customer_id())
            .await
            .map_err(|e| async_graphql::Error::new(e.to_string()))?
            .ok_or_else(|| async_graphql::Error::new("order references a missing customer"))?;
        Ok(Customer::from(&customer))
    }

    async fn products(&self, ctx: &Context<'_>) -> Result<Vec<Product>> {
        let store = ctx.data::<Arc<dyn EntityStore>>()?;
        let products = store
            .products_by_ids(self.0.product_ids())
            .await
            .map_err(|e| async_graphql::Error::new(e.to_string()))?;
        Ok(products.iter().map(Product::from).collect())
    }
}

/// Per-item input for `bulkCreateCustomers`; `phone` is an explicit
/// optional field.
#[derive(Debug, Clone, InputObject)]
pub struct CustomerInput {
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
}

impl From<CustomerInput> for NewCustomer {
    fn from(input: CustomerInput) -> Self {
        NewCustomer::new(input.name, input.email, input.phone)
    }
}

#[derive(Debug, Clone, SimpleObject)]
pub struct CreateCustomerPayload {
    pub customer: Customer,
    pub message: String,
}

#[derive(Debug, Clone, SimpleObject)]
pub struct BulkCreateCustomersPayload {
    pub customers: Vec<Customer>,
    pub errors: Vec<String>,
}

#[derive(Debug, Clone, SimpleObject)]
pub struct CreateProductPayload {
    pub product: Product,
}

#[derive(Clone, SimpleObject)]
pub struct CreateOrderPayload {
    pub order: Order,
}
