//! `graphcrm-api` — GraphQL facade over the entity store.

pub mod app;
