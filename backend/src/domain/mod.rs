//! Domain model and use-cases.
//!
//! Purpose: define the coupon entity, its validated value types, the error
//! taxonomy, and the service enforcing one coupon per phone and one
//! redemption per coupon. Nothing here depends on HTTP or SQL.
//!
//! Public surface:
//! - [`Coupon`], [`PhoneNumber`], [`CouponCode`]: the data model.
//! - [`CouponService`]: implementation of the
//!   [`CouponCommand`](ports::CouponCommand) driving port.
//! - [`Error`], [`ErrorCode`]: transport-agnostic failures.
//! - [`TraceId`]: request correlation identifier.

pub mod coupon;
pub mod coupon_service;
pub mod error;
pub mod ports;
pub mod trace_id;

pub use self::coupon::{
    COUPON_CODE_PREFIX, COUPON_CODE_RANDOM_LEN, Coupon, CouponCode, CouponValidationError,
    PhoneNumber,
};
pub use self::coupon_service::{CouponService, MAX_CODE_ATTEMPTS};
pub use self::error::{Error, ErrorCode};
pub use self::trace_id::TraceId;

/// Name of the response header carrying the request trace identifier.
pub const TRACE_ID_HEADER: &str = "trace-id";
