//! Explicit root composition.
//!
//! The query/mutation roots are enumerated here and built exactly once at
//! process start; there is no ambient registration.

use std::sync::Arc;

use async_graphql::{EmptySubscription, Schema};

use graphcrm_infra::EntityStore;

use super::graphql::{MutationRoot, QueryRoot};

pub type CrmSchema = Schema<QueryRoot, MutationRoot, EmptySubscription>;

/// Build the schema with the entity store injected as context data.
pub fn build_schema(store: Arc<dyn EntityStore>) -> CrmSchema {
    Schema::build(QueryRoot, MutationRoot, EmptySubscription)
        .data(store)
        .finish()
}
