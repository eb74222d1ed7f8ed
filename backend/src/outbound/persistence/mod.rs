//! PostgreSQL persistence adapters using Diesel ORM.
//!
//! Adapters only translate between Diesel rows and domain types. Row structs
//! and the schema stay private to this module; callers see the repository,
//! the pool and the migration runner.
//!
//! # Example
//!
//! ```ignore
//! use backend::outbound::persistence::{DbPool, DieselCouponRepository, PoolConfig};
//!
//! let pool = DbPool::new(PoolConfig::new("postgres://localhost/coupons")).await?;
//! let repo = DieselCouponRepository::new(pool);
//! ```

mod diesel_coupon_repository;
mod diesel_error_mapping;
mod migrations;
mod models;
mod pool;
mod schema;

pub use diesel_coupon_repository::DieselCouponRepository;
pub use migrations::{MIGRATIONS, MigrationError, run_pending_migrations};
pub use pool::{DbPool, PoolConfig, PoolError};
