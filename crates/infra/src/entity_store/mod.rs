pub mod in_memory;
pub mod postgres;
mod r#trait;

pub use in_memory::InMemoryEntityStore;
pub use postgres::PostgresEntityStore;
pub use r#trait::{EntityStore, StoreError};
