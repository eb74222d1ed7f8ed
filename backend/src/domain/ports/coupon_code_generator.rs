//! Driven port supplying fresh coupon codes.

use crate::domain::CouponCode;

/// Source of newly minted coupon codes.
#[cfg_attr(test, mockall::automock)]
pub trait CouponCodeGenerator: Send + Sync {
    /// Produce a candidate code. Uniqueness is checked by the store.
    fn generate(&self) -> CouponCode;
}

/// Generator backed by the thread-local random number generator.
#[derive(Debug, Default, Clone, Copy)]
pub struct RandomCouponCodeGenerator;

impl CouponCodeGenerator for RandomCouponCodeGenerator {
    fn generate(&self) -> CouponCode {
        CouponCode::generate(&mut rand::thread_rng())
    }
}
