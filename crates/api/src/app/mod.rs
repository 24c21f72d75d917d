//! HTTP/GraphQL application wiring (axum router + schema composition).
//!
//! Folder layout:
//! - `schema.rs`: explicit root composition (`build_schema`)
//! - `graphql/`: query root, mutation root, object/input types
//! - `errors.rs`: domain error → GraphQL error mapping

use std::sync::Arc;

use async_graphql::http::GraphiQLSource;
use async_graphql_axum::GraphQL;
use axum::{
    http::StatusCode,
    response::{Html, IntoResponse},
    routing::get,
    Router,
};

use graphcrm_infra::EntityStore;

pub mod errors;
pub mod graphql;
pub mod schema;

/// Build the full HTTP router (public entrypoint used by `main.rs` and the
/// facade tests).
pub fn build_app(store: Arc<dyn EntityStore>) -> Router {
    let schema = schema::build_schema(store);

    Router::new()
        .route("/health", get(health))
        .route("/graphql", get(graphiql).post_service(GraphQL::new(schema)))
}

async fn health() -> StatusCode {
    StatusCode::OK
}

async fn graphiql() -> impl IntoResponse {
    Html(GraphiQLSource::build().endpoint("/graphql").finish())
}
