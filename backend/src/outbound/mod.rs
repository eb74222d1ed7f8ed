//! Outbound adapters implementing the domain's driven ports.
//!
//! - **persistence**: PostgreSQL-backed coupon store using Diesel ORM
//! - **memory**: process-local coupon store for tests and local runs

pub mod memory;
pub mod persistence;
