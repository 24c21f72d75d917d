//! Facade-level tests: GraphQL documents executed against the composed
//! schema over the in-memory entity store.

use std::sync::Arc;

use async_graphql::{Request, Variables};
use serde_json::{json, Value};

use graphcrm_api::app::schema::{build_schema, CrmSchema};
use graphcrm_infra::{EntityStore, InMemoryEntityStore};

fn schema() -> CrmSchema {
    let store: Arc<dyn EntityStore> = Arc::new(InMemoryEntityStore::new());
    build_schema(store)
}

async fn execute(schema: &CrmSchema, query: &str, variables: Value) -> async_graphql::Response {
    schema
        .execute(Request::new(query).variables(Variables::from_json(variables)))
        .await
}

async fn data(schema: &CrmSchema, query: &str, variables: Value) -> Value {
    let resp = execute(schema, query, variables).await;
    assert!(resp.errors.is_empty(), "unexpected errors: {:?}", resp.errors);
    resp.data.into_json().expect("data is json")
}

async fn first_error(schema: &CrmSchema, query: &str, variables: Value) -> String {
    let resp = execute(schema, query, variables).await;
    assert!(!resp.errors.is_empty(), "expected an error");
    resp.errors[0].message.clone()
}

const CREATE_CUSTOMER: &str = r#"
    mutation($name: String!, $email: String!, $phone: String) {
        createCustomer(name: $name, email: $email, phone: $phone) {
            customer { id name email phone }
            message
        }
    }
"#;

const CREATE_PRODUCT: &str = r#"
    mutation($name: String!, $price: Int!, $stock: Int) {
        createProduct(name: $name, price: $price, stock: $stock) {
            product { id name price stock }
        }
    }
"#;

const CREATE_ORDER: &str = r#"
    mutation($customerId: ID!, $productIds: [ID!]!) {
        createOrder(customerId: $customerId, productIds: $productIds) {
            order {
                id
                totalAmount
                customer { email }
                products { id price }
            }
        }
    }
"#;

async fn seed_customer(schema: &CrmSchema, name: &str, email: &str) -> String {
    let data = data(
        schema,
        CREATE_CUSTOMER,
        json!({ "name": name, "email": email, "phone": null }),
    )
    .await;
    data["createCustomer"]["customer"]["id"]
        .as_str()
        .unwrap()
        .to_string()
}

async fn seed_product(schema: &CrmSchema, name: &str, price: i64) -> String {
    let data = data(
        schema,
        CREATE_PRODUCT,
        json!({ "name": name, "price": price, "stock": null }),
    )
    .await;
    data["createProduct"]["product"]["id"]
        .as_str()
        .unwrap()
        .to_string()
}

#[tokio::test]
async fn hello_returns_fixed_greeting() {
    let schema = schema();
    let data = data(&schema, "{ hello }", json!({})).await;
    assert_eq!(data, json!({ "hello": "Hello, GraphQL!" }));
}

#[tokio::test]
async fn create_customer_returns_customer_and_message() {
    let schema = schema();
    let data = data(
        &schema,
        CREATE_CUSTOMER,
        json!({ "name": "Alice", "email": "alice@example.com", "phone": "+1 555 0100" }),
    )
    .await;

    let payload = &data["createCustomer"];
    assert_eq!(payload["message"], "Customer created successfully.");
    assert_eq!(payload["customer"]["name"], "Alice");
    assert_eq!(payload["customer"]["email"], "alice@example.com");
    assert_eq!(payload["customer"]["phone"], "+1 555 0100");
}

#[tokio::test]
async fn duplicate_email_surfaces_validation_error() {
    let schema = schema();
    seed_customer(&schema, "Alice", "alice@example.com").await;

    let message = first_error(
        &schema,
        CREATE_CUSTOMER,
        json!({ "name": "Other Alice", "email": "alice@example.com", "phone": null }),
    )
    .await;
    assert_eq!(message, "Email already exists.");

    // Nothing extra was persisted.
    let data = data(&schema, "{ customers { email } }", json!({})).await;
    assert_eq!(data["customers"].as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn bulk_create_collects_per_item_errors() {
    let schema = schema();
    seed_customer(&schema, "Taken", "taken@example.com").await;

    let query = r#"
        mutation($input: [CustomerInput!]!) {
            bulkCreateCustomers(input: $input) {
                customers { name email }
                errors
            }
        }
    "#;
    let data = data(
        &schema,
        query,
        json!({ "input": [
            { "name": "Bob", "email": "bob@example.com" },
            { "name": "Imposter", "email": "taken@example.com" },
            { "name": "Carol", "email": "carol@example.com", "phone": "+1 555 0101" },
        ]}),
    )
    .await;

    let payload = &data["bulkCreateCustomers"];
    let customers = payload["customers"].as_array().unwrap();
    assert_eq!(customers.len(), 2);
    assert_eq!(customers[0]["name"], "Bob");
    assert_eq!(customers[1]["name"], "Carol");
    assert_eq!(payload["errors"], json!(["Imposter: Email already exists."]));
}

#[tokio::test]
async fn create_product_defaults_stock_and_checks_bounds() {
    let schema = schema();

    let data = data(
        &schema,
        CREATE_PRODUCT,
        json!({ "name": "Mouse", "price": 1999, "stock": null }),
    )
    .await;
    assert_eq!(data["createProduct"]["product"]["price"], 1999);
    assert_eq!(data["createProduct"]["product"]["stock"], 0);

    let message = first_error(
        &schema,
        CREATE_PRODUCT,
        json!({ "name": "Broken", "price": -1, "stock": null }),
    )
    .await;
    assert_eq!(message, "Price must be non-negative.");

    let message = first_error(
        &schema,
        CREATE_PRODUCT,
        json!({ "name": "Broken", "price": 1, "stock": -3 }),
    )
    .await;
    assert_eq!(message, "Stock must be non-negative.");
}

#[tokio::test]
async fn create_order_computes_total_and_resolves_nested_fields() {
    let schema = schema();
    let customer_id = seed_customer(&schema, "Alice", "alice@example.com").await;
    let p1 = seed_product(&schema, "Keyboard", 1000).await;
    let p2 = seed_product(&schema, "Headset", 1550).await;

    let data = data(
        &schema,
        CREATE_ORDER,
        json!({ "customerId": customer_id, "productIds": [p1, p2] }),
    )
    .await;

    let order = &data["createOrder"]["order"];
    assert_eq!(order["totalAmount"], 2550);
    assert_eq!(order["customer"]["email"], "alice@example.com");
    assert_eq!(order["products"].as_array().unwrap().len(), 2);
}

#[tokio::test]
async fn create_order_rejects_unknown_customer() {
    let schema = schema();
    let product_id = seed_product(&schema, "Keyboard", 1000).await;

    // Well-formed but unknown id.
    let message = first_error(
        &schema,
        CREATE_ORDER,
        json!({
            "customerId": "00000000-0000-0000-0000-000000000000",
            "productIds": [product_id.clone()],
        }),
    )
    .await;
    assert_eq!(message, "Invalid customer ID");

    // Unparsable id behaves the same.
    let message = first_error(
        &schema,
        CREATE_ORDER,
        json!({ "customerId": "not-an-id", "productIds": [product_id] }),
    )
    .await;
    assert_eq!(message, "Invalid customer ID");

    let data = data(&schema, "{ orders { id } }", json!({})).await;
    assert!(data["orders"].as_array().unwrap().is_empty());
}

#[tokio::test]
async fn create_order_rejects_fully_unresolved_product_list() {
    let schema = schema();
    let customer_id = seed_customer(&schema, "Alice", "alice@example.com").await;

    let message = first_error(
        &schema,
        CREATE_ORDER,
        json!({
            "customerId": customer_id,
            "productIds": ["00000000-0000-0000-0000-000000000000", "garbage"],
        }),
    )
    .await;
    assert_eq!(message, "Invalid product IDs");

    let data = data(&schema, "{ orders { id } }", json!({})).await;
    assert!(data["orders"].as_array().unwrap().is_empty());
}

#[tokio::test]
async fn create_order_drops_partially_unresolved_product_ids() {
    let schema = schema();
    let customer_id = seed_customer(&schema, "Alice", "alice@example.com").await;
    let product_id = seed_product(&schema, "Keyboard", 1000).await;

    let data = data(
        &schema,
        CREATE_ORDER,
        json!({
            "customerId": customer_id,
            "productIds": [product_id, "00000000-0000-0000-0000-000000000000"],
        }),
    )
    .await;

    let order = &data["createOrder"]["order"];
    assert_eq!(order["totalAmount"], 1000);
    assert_eq!(order["products"].as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn listings_reflect_created_entities() {
    let schema = schema();
    seed_customer(&schema, "Alice", "alice@example.com").await;
    let customer_id = seed_customer(&schema, "Bob", "bob@example.com").await;
    let product_id = seed_product(&schema, "Keyboard", 1000).await;
    data(
        &schema,
        CREATE_ORDER,
        json!({ "customerId": customer_id, "productIds": [product_id] }),
    )
    .await;

    let data = data(
        &schema,
        "{ customers { email } products { name } orders { totalAmount } }",
        json!({}),
    )
    .await;
    assert_eq!(data["customers"].as_array().unwrap().len(), 2);
    assert_eq!(data["products"][0]["name"], "Keyboard");
    assert_eq!(data["orders"][0]["totalAmount"], 1000);
}
