use std::sync::Arc;

use async_graphql::{Context, Object, Result};

use graphcrm_infra::EntityStore;

use super::types::{Customer, Order, Product};
use crate::app::errors;

pub struct QueryRoot;

#[Object]
impl QueryRoot {
    /// Liveness probe; carries no business meaning.
    async fn hello(&self) -> &'static str {
        "Hello, GraphQL!"
    }

    async fn customers(&self, ctx: &Context<'_>) -> Result<Vec<Customer>> {
        let store = ctx.data::<Arc<dyn EntityStore>>()?;
        let customers = store
            .list_customers()
            .await
            .map_err(|e| errors::domain_error(e.into()))?;
        Ok(customers.iter().map(Customer::from).collect())
    }

    async fn products(&self, ctx: &Context<'_>) -> Result<Vec<Product>> {
        let store = ctx.data::<Arc<dyn EntityStore>>()?;
        let products = store
            .list_products()
            .await
            .map_err(|e| errors::domain_error(e.into()))?;
        Ok(products.iter().map(Product::from).collect())
    }

    async fn orders(&self, ctx: &Context<'_>) -> Result<Vec<Order>> {
        let store = ctx.data::<Arc<dyn EntityStore>>()?;
        let orders = store
            .list_orders()
            .await
            .map_err(|e| errors::domain_error(e.into()))?;
        Ok(orders.into_iter().map(Order).collect())
    }
}
