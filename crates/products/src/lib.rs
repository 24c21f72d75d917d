//! `graphcrm-products` — Product entity and field validation.

pub mod product;

pub use product::{NewProduct, Product};
