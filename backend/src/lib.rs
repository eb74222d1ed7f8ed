//! Coupon service library modules.
//!
//! The crate follows a hexagonal layout: [`domain`] holds the coupon model
//! and use-cases, [`inbound`] adapts HTTP requests onto domain ports, and
//! [`outbound`] implements the persistence ports.

pub mod doc;
pub mod domain;
pub mod inbound;
pub mod middleware;
pub mod outbound;
pub mod settings;

/// Public OpenAPI surface used by Swagger UI and tooling.
pub use doc::ApiDoc;
pub use domain::TraceId;
pub use middleware::Trace;
pub use settings::CouponSettings;
