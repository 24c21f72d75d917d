//! `graphcrm-infra` — persistence backends and the validation & mutation core.
//!
//! - `entity_store`: the durable store for Customer/Product/Order records
//!   (trait + in-memory and Postgres implementations)
//! - `mutations`: stateless create operations orchestrating
//!   validate → persist → recompute over any `EntityStore`

pub mod entity_store;
pub mod mutations;

pub use entity_store::{EntityStore, InMemoryEntityStore, PostgresEntityStore, StoreError};
pub use mutations::BulkCreateOutcome;
