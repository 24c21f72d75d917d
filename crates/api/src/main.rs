use std::sync::Arc;

use graphcrm_infra::{EntityStore, InMemoryEntityStore, PostgresEntityStore};

#[tokio::main]
async fn main() {
    graphcrm_observability::init();

    let store: Arc<dyn EntityStore> = match std::env::var("DATABASE_URL") {
        Ok(url) => {
            let pool = sqlx::PgPool::connect(&url)
                .await
                .expect("failed to connect to Postgres");
            let store = PostgresEntityStore::new(pool);
            store.migrate().await.expect("failed to bootstrap schema");
            Arc::new(store)
        }
        Err(_) => {
            tracing::warn!("DATABASE_URL not set; using in-memory entity store");
            Arc::new(InMemoryEntityStore::new())
        }
    };

    let app = graphcrm_api::app::build_app(store);

    let addr = std::env::var("BIND_ADDR").unwrap_or_else(|_| "0.0.0.0:8080".to_string());
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .unwrap_or_else(|e| panic!("failed to bind {addr}: {e}"));

    tracing::info!("listening on {}", listener.local_addr().unwrap());

    axum::serve(listener, app).await.unwrap();
}
