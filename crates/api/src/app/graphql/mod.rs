pub mod mutation;
pub mod query;
pub mod types;

pub use mutation::MutationRoot;
pub use query::QueryRoot;
