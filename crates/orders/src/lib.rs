//! `graphcrm-orders` — Order entity and derived-total computation.

pub mod order;

pub use order::Order;
