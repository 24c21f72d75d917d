use std::sync::Arc;

use async_graphql::{Context, Object, Result, ID};

use graphcrm_core::{CustomerId, DomainError, ProductId};
use graphcrm_customers::NewCustomer;
use graphcrm_infra::{mutations, EntityStore};
use graphcrm_products::NewProduct;

use super::types::{
    BulkCreateCustomersPayload, CreateCustomerPayload, CreateOrderPayload, CreateProductPayload,
    Customer, CustomerInput, Order, Product,
};
use crate::app::errors;

pub struct MutationRoot;

#[Object]
impl MutationRoot {
    /// Create a customer; fails if the email is already taken.
    async fn create_customer(
        &self,
        ctx: &Context<'_>,
        name: String,
        email: String,
        phone: Option<String>,
    ) -> Result<CreateCustomerPayload> {
        let store = ctx.data::<Arc<dyn EntityStore>>()?;
        let customer = mutations::create_customer(store.as_ref(), NewCustomer::new(name, email, phone))
            .await
            .map_err(errors::domain_error)?;

        Ok(CreateCustomerPayload {
            customer: Customer::from(&customer),
            message: "Customer created successfully.".to_string(),
        })
    }

    /// Create many customers; item failures are collected, not raised.
    async fn bulk_create_customers(
        &self,
        ctx: &Context<'_>,
        input: Vec<CustomerInput>,
    ) -> Result<BulkCreateCustomersPayload> {
        let store = ctx.data::<Arc<dyn EntityStore>>()?;
        let inputs = input.into_iter().map(NewCustomer::from).collect();
        let outcome = mutations::bulk_create_customers(store.as_ref(), inputs).await;

        Ok(BulkCreateCustomersPayload {
            customers: outcome.customers.iter().map(Customer::from).collect(),
            errors: outcome.errors,
        })
    }

    /// Create a product; price and stock must be non-negative.
    async fn create_product(
        &self,
        ctx: &Context<'_>,
        name: String,
        price: i64,
        stock: Option<i64>,
    ) -> Result<CreateProductPayload> {
        let store = ctx.data::<Arc<dyn EntityStore>>()?;
        let product = mutations::create_product(store.as_ref(), NewProduct::new(name, price, stock))
            .await
            .map_err(errors::domain_error)?;

        Ok(CreateProductPayload {
            product: Product::from(&product),
        })
    }

    /// Create an order for an existing customer over existing products.
    async fn create_order(
        &self,
        ctx: &Context<'_>,
        customer_id: ID,
        product_ids: Vec<ID>,
    ) -> Result<CreateOrderPayload> {
        let store = ctx.data::<Arc<dyn EntityStore>>()?;

        // An unparsable customer id behaves like a missing customer;
        // unparsable product ids are dropped like unresolved ones.
        let customer_id = customer_id
            .parse::<CustomerId>()
            .map_err(|_| errors::domain_error(DomainError::validation("Invalid customer ID")))?;
        let product_ids: Vec<ProductId> = product_ids
            .iter()
            .filter_map(|id| id.parse::<ProductId>().ok())
            .collect();

        let order = mutations::create_order(store.as_ref(), customer_id, product_ids)
            .await
            .map_err(errors::domain_error)?;

        Ok(CreateOrderPayload { order: Order(order) })
    }
}
