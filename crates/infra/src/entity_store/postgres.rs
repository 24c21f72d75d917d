//! Postgres-backed entity store.
//!
//! Customer-email uniqueness is enforced by a unique constraint; SQLSTATE
//! 23505 on customer insert maps to `StoreError::DuplicateEmail`. All other
//! sqlx failures map to `StoreError::Backend`.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{PgPool, Row};
use tracing::instrument;
use uuid::Uuid;

use graphcrm_core::{CustomerId, OrderId, ProductId};
use graphcrm_customers::Customer;
use graphcrm_orders::Order;
use graphcrm_products::Product;

use super::r#trait::{EntityStore, StoreError};

const SCHEMA: &str = r#"
CREATE TABLE IF NOT EXISTS customers (
    id    UUID PRIMARY KEY,
    name  TEXT NOT NULL,
    email TEXT NOT NULL UNIQUE,
    phone TEXT
);

CREATE TABLE IF NOT EXISTS products (
    id    UUID PRIMARY KEY,
    name  TEXT NOT NULL,
    price BIGINT NOT NULL CHECK (price >= 0),
    stock BIGINT NOT NULL DEFAULT 0 CHECK (stock >= 0)
);

CREATE TABLE IF NOT EXISTS orders (
    id           UUID PRIMARY KEY,
    customer_id  UUID NOT NULL REFERENCES customers (id),
    total_amount BIGINT NOT NULL DEFAULT 0 CHECK (total_amount >= 0),
    order_date   TIMESTAMPTZ NOT NULL
);

CREATE TABLE IF NOT EXISTS order_products (
    order_id   UUID NOT NULL REFERENCES orders (id),
    product_id UUID NOT NULL REFERENCES products (id),
    PRIMARY KEY (order_id, product_id)
);
"#;

/// Postgres-backed entity store over a sqlx connection pool.
#[derive(Debug, Clone)]
pub struct PostgresEntityStore {
    pool: PgPool,
}

impl PostgresEntityStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Create the tables if they do not exist yet.
    #[instrument(skip(self), err)]
    pub async fn migrate(&self) -> Result<(), StoreError> {
        sqlx::raw_sql(SCHEMA)
            .execute(&self.pool)
            .await
            .map_err(|e| map_sqlx_error("migrate", e))?;
        Ok(())
    }
}

fn map_sqlx_error(op: &str, err: sqlx::Error) -> StoreError {
    if let sqlx::Error::Database(db_err) = &err {
        // 23505 = unique_violation; the only unique constraint in this
        // schema besides primary keys is customers.email.
        if db_err.code().as_deref() == Some("23505") {
            return StoreError::DuplicateEmail(db_err.message().to_string());
        }
    }
    StoreError::Backend(format!("{op}: {err}"))
}

fn customer_from_row(row: &sqlx::postgres::PgRow) -> Result<Customer, StoreError> {
    let id: Uuid = row.try_get("id").map_err(decode_err)?;
    let name: String = row.try_get("name").map_err(decode_err)?;
    let email: String = row.try_get("email").map_err(decode_err)?;
    let phone: Option<String> = row.try_get("phone").map_err(decode_err)?;
    Customer::create(
        CustomerId::from_uuid(id),
        graphcrm_customers::NewCustomer::new(name, email, phone),
    )
    .map_err(|e| StoreError::Backend(format!("stored customer failed validation: {e}")))
}

fn product_from_row(row: &sqlx::postgres::PgRow) -> Result<Product, StoreError> {
    let id: Uuid = row.try_get("id").map_err(decode_err)?;
    let name: String = row.try_get("name").map_err(decode_err)?;
    let price: i64 = row.try_get("price").map_err(decode_err)?;
    let stock: i64 = row.try_get("stock").map_err(decode_err)?;
    let price = u64::try_from(price)
        .map_err(|_| StoreError::Backend("negative price in products table".to_string()))?;
    let stock = u32::try_from(stock)
        .map_err(|_| StoreError::Backend("stock out of range in products table".to_string()))?;
    Ok(Product::from_parts(ProductId::from_uuid(id), name, price, stock))
}

fn decode_err(err: sqlx::Error) -> StoreError {
    StoreError::Backend(format!("row decode: {err}"))
}

#[async_trait]
impl EntityStore for PostgresEntityStore {
    #[instrument(skip(self, customer), fields(customer_id = %customer.id()), err)]
    async fn insert_customer(&self, customer: Customer) -> Result<Customer, StoreError> {
        sqlx::query("INSERT INTO customers (id, name, email, phone) VALUES ($1, $2, $3, $4)")
            .bind(customer.id().as_uuid())
            .bind(customer.name())
            .bind(customer.email())
            .bind(customer.phone())
            .execute(&self.pool)
            .await
            .map_err(|e| map_sqlx_error("insert_customer", e))?;
        Ok(customer)
    }

    #[instrument(skip(self), fields(customer_id = %id), err)]
    async fn customer_by_id(&self, id: CustomerId) -> Result<Option<Customer>, StoreError> {
        let row = sqlx::query("SELECT id, name, email, phone FROM customers WHERE id = $1")
            .bind(id.as_uuid())
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| map_sqlx_error("customer_by_id", e))?;
        row.as_ref().map(customer_from_row).transpose()
    }

    #[instrument(skip(self, email), err)]
    async fn customer_email_exists(&self, email: &str) -> Result<bool, StoreError> {
        let row = sqlx::query("SELECT 1 AS present FROM customers WHERE email = $1 LIMIT 1")
            .bind(email)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| map_sqlx_error("customer_email_exists", e))?;
        Ok(row.is_some())
    }

    #[instrument(skip(self), err)]
    async fn list_customers(&self) -> Result<Vec<Customer>, StoreError> {
        let rows = sqlx::query("SELECT id, name, email, phone FROM customers ORDER BY id")
            .fetch_all(&self.pool)
            .await
            .map_err(|e| map_sqlx_error("list_customers", e))?;
        rows.iter().map(customer_from_row).collect()
    }

    #[instrument(skip(self, product), fields(product_id = %product.id()), err)]
    async fn insert_product(&self, product: Product) -> Result<Product, StoreError> {
        let price = i64::try_from(product.price())
            .map_err(|_| StoreError::Backend("price exceeds BIGINT range".to_string()))?;
        sqlx::query("INSERT INTO products (id, name, price, stock) VALUES ($1, $2, $3, $4)")
            .bind(product.id().as_uuid())
            .bind(product.name())
            .bind(price)
            .bind(i64::from(product.stock()))
            .execute(&self.pool)
            .await
            .map_err(|e| map_sqlx_error("insert_product", e))?;
        Ok(product)
    }

    #[instrument(skip(self), fields(product_id = %id), err)]
    async fn product_by_id(&self, id: ProductId) -> Result<Option<Product>, StoreError> {
        let row = sqlx::query("SELECT id, name, price, stock FROM products WHERE id = $1")
            .bind(id.as_uuid())
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| map_sqlx_error("product_by_id", e))?;
        row.as_ref().map(product_from_row).transpose()
    }

    #[instrument(skip(self, ids), fields(requested = ids.len()), err)]
    async fn products_by_ids(&self, ids: &[ProductId]) -> Result<Vec<Product>, StoreError> {
        let uuids: Vec<Uuid> = ids.iter().map(|id| *id.as_uuid()).collect();
        let rows = sqlx::query(
            "SELECT id, name, price, stock FROM products WHERE id = ANY($1) ORDER BY id",
        )
        .bind(&uuids)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| map_sqlx_error("products_by_ids", e))?;
        rows.iter().map(product_from_row).collect()
    }

    #[instrument(skip(self), err)]
    async fn list_products(&self) -> Result<Vec<Product>, StoreError> {
        let rows = sqlx::query("SELECT id, name, price, stock FROM products ORDER BY id")
            .fetch_all(&self.pool)
            .await
            .map_err(|e| map_sqlx_error("list_products", e))?;
        rows.iter().map(product_from_row).collect()
    }

    #[instrument(skip(self, order), fields(order_id = %order.id()), err)]
    async fn insert_order(&self, order: Order) -> Result<Order, StoreError> {
        let total = i64::try_from(order.total_amount())
            .map_err(|_| StoreError::Backend("total exceeds BIGINT range".to_string()))?;

        // Order row and association rows commit together.
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| map_sqlx_error("insert_order", e))?;

        sqlx::query(
            "INSERT INTO orders (id, customer_id, total_amount, order_date) VALUES ($1, $2, $3, $4)",
        )
        .bind(order.id().as_uuid())
        .bind(order.customer_id().as_uuid())
        .bind(total)
        .bind(order.order_date())
        .execute(&mut *tx)
        .await
        .map_err(|e| map_sqlx_error("insert_order", e))?;

        for product_id in order.product_ids() {
            sqlx::query("INSERT INTO order_products (order_id, product_id) VALUES ($1, $2)")
                .bind(order.id().as_uuid())
                .bind(product_id.as_uuid())
                .execute(&mut *tx)
                .await
                .map_err(|e| map_sqlx_error("insert_order", e))?;
        }

        tx.commit()
            .await
            .map_err(|e| map_sqlx_error("insert_order", e))?;
        Ok(order)
    }

    #[instrument(skip(self), fields(order_id = %id), err)]
    async fn update_order_total(&self, id: OrderId, total_amount: u64) -> Result<(), StoreError> {
        let total = i64::try_from(total_amount)
            .map_err(|_| StoreError::Backend("total exceeds BIGINT range".to_string()))?;
        let result = sqlx::query("UPDATE orders SET total_amount = $1 WHERE id = $2")
            .bind(total)
            .bind(id.as_uuid())
            .execute(&self.pool)
            .await
            .map_err(|e| map_sqlx_error("update_order_total", e))?;
        if result.rows_affected() == 0 {
            return Err(StoreError::UnknownOrder(id));
        }
        Ok(())
    }

    #[instrument(skip(self), fields(order_id = %id), err)]
    async fn order_by_id(&self, id: OrderId) -> Result<Option<Order>, StoreError> {
        let row = sqlx::query(
            "SELECT id, customer_id, total_amount, order_date FROM orders WHERE id = $1",
        )
        .bind(id.as_uuid())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| map_sqlx_error("order_by_id", e))?;

        match row {
            Some(row) => Ok(Some(self.order_from_row(&row).await?)),
            None => Ok(None),
        }
    }

    #[instrument(skip(self), err)]
    async fn list_orders(&self) -> Result<Vec<Order>, StoreError> {
        let rows = sqlx::query(
            "SELECT id, customer_id, total_amount, order_date FROM orders ORDER BY id",
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|e| map_sqlx_error("list_orders", e))?;

        let mut orders = Vec::with_capacity(rows.len());
        for row in &rows {
            orders.push(self.order_from_row(row).await?);
        }
        Ok(orders)
    }
}

impl PostgresEntityStore {
    async fn order_from_row(&self, row: &sqlx::postgres::PgRow) -> Result<Order, StoreError> {
        let id: Uuid = row.try_get("id").map_err(decode_err)?;
        let customer_id: Uuid = row.try_get("customer_id").map_err(decode_err)?;
        let total_amount: i64 = row.try_get("total_amount").map_err(decode_err)?;
        let order_date: DateTime<Utc> = row.try_get("order_date").map_err(decode_err)?;
        let total_amount = u64::try_from(total_amount)
            .map_err(|_| StoreError::Backend("negative total in orders table".to_string()))?;

        let order_id = OrderId::from_uuid(id);
        let assoc = sqlx::query("SELECT product_id FROM order_products WHERE order_id = $1")
            .bind(order_id.as_uuid())
            .fetch_all(&self.pool)
            .await
            .map_err(|e| map_sqlx_error("order_from_row", e))?;

        let mut product_ids = Vec::with_capacity(assoc.len());
        for assoc_row in &assoc {
            let product_id: Uuid = assoc_row.try_get("product_id").map_err(decode_err)?;
            product_ids.push(ProductId::from_uuid(product_id));
        }

        Ok(Order::from_parts(
            order_id,
            CustomerId::from_uuid(customer_id),
            product_ids,
            total_amount,
            order_date,
        ))
    }
}
