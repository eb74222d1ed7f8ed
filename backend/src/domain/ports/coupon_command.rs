//! Driving port for coupon use-cases.
//!
//! Inbound adapters call [`CouponCommand`] without knowing which store backs
//! it, which keeps HTTP handler tests free of persistence.

use async_trait::async_trait;

use crate::domain::{Coupon, CouponCode, Error, PhoneNumber};

/// Request to issue (or re-fetch) the coupon for a phone number.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerateCouponRequest {
    pub phone: PhoneNumber,
}

/// Outcome of a generate call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerateCouponResponse {
    pub coupon: Coupon,
    /// `true` when this call issued the coupon, `false` when it already
    /// existed for the phone.
    pub newly_issued: bool,
}

/// Request to redeem a coupon.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RedeemCouponRequest {
    pub code: CouponCode,
}

/// Confirmation of a redemption.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RedeemCouponResponse {
    pub code: CouponCode,
}

/// Request to return a coupon to the unredeemed state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResetCouponRequest {
    pub code: CouponCode,
}

/// Confirmation of a reset.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResetCouponResponse {
    pub code: CouponCode,
}

/// Domain use-case port for coupon issuance and redemption.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CouponCommand: Send + Sync {
    /// Return the phone's coupon, issuing one on first call.
    async fn generate(&self, request: GenerateCouponRequest)
    -> Result<GenerateCouponResponse, Error>;

    /// Consume a coupon. Fails with `not_found` for unknown codes and
    /// `conflict` when the coupon is already redeemed.
    async fn redeem(&self, request: RedeemCouponRequest) -> Result<RedeemCouponResponse, Error>;

    /// Mark a coupon unredeemed regardless of its current state.
    async fn reset(&self, request: ResetCouponRequest) -> Result<ResetCouponResponse, Error>;
}
