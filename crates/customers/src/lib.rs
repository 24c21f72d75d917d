//! `graphcrm-customers` — Customer entity and field validation.

pub mod customer;

pub use customer::{Customer, NewCustomer};
