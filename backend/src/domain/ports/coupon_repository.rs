//! Driven port for coupon persistence.
//!
//! The store owns the uniqueness guarantees: at most one coupon per phone and
//! at most one coupon per code. Redemption is expressed as a conditional write
//! so adapters can make the `false -> true` transition atomic.

use async_trait::async_trait;

use crate::domain::{Coupon, CouponCode, PhoneNumber};

use super::define_port_error;

define_port_error! {
    /// Errors raised by coupon store adapters.
    pub enum CouponRepositoryError {
        /// The store could not be reached.
        Connection { message: String } => "coupon store connection failed: {message}",
        /// A query or mutation failed during execution.
        Query { message: String } => "coupon store query failed: {message}",
        /// A coupon is already issued to this phone.
        DuplicatePhone { phone: String } => "a coupon is already issued to {phone}",
        /// The generated code collides with an issued coupon.
        DuplicateCode { code: String } => "coupon code {code} is already issued",
    }
}

/// Port for coupon storage.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CouponRepository: Send + Sync {
    /// Fetch the coupon issued to `phone`, if any.
    async fn find_by_phone(
        &self,
        phone: &PhoneNumber,
    ) -> Result<Option<Coupon>, CouponRepositoryError>;

    /// Fetch the coupon carrying `code`, if any.
    async fn find_by_code(&self, code: &CouponCode)
    -> Result<Option<Coupon>, CouponRepositoryError>;

    /// Persist a newly issued coupon.
    ///
    /// Fails with [`CouponRepositoryError::DuplicatePhone`] or
    /// [`CouponRepositoryError::DuplicateCode`] when a uniqueness constraint
    /// rejects the row.
    async fn insert(&self, coupon: &Coupon) -> Result<(), CouponRepositoryError>;

    /// Set `redeemed = true` only if the coupon exists and is unredeemed.
    ///
    /// Returns `true` when the row changed. Implementations must perform the
    /// check and the write as one atomic step so that concurrent callers for
    /// the same code see exactly one `true`.
    async fn mark_redeemed(&self, code: &CouponCode) -> Result<bool, CouponRepositoryError>;

    /// Set `redeemed = false` unconditionally.
    ///
    /// Returns `false` when no coupon carries the code.
    async fn clear_redeemed(&self, code: &CouponCode) -> Result<bool, CouponRepositoryError>;
}

/// Repository used when the store could not be reached at startup.
///
/// Every call fails with [`CouponRepositoryError::Connection`], so the
/// service keeps answering requests with server errors instead of refusing to
/// start.
#[derive(Debug, Clone)]
pub struct UnavailableCouponRepository {
    reason: String,
}

impl UnavailableCouponRepository {
    /// Create a repository that reports `reason` on every call.
    pub fn new(reason: impl Into<String>) -> Self {
        Self {
            reason: reason.into(),
        }
    }

    fn error(&self) -> CouponRepositoryError {
        CouponRepositoryError::connection(self.reason.as_str())
    }
}

#[async_trait]
impl CouponRepository for UnavailableCouponRepository {
    async fn find_by_phone(
        &self,
        _phone: &PhoneNumber,
    ) -> Result<Option<Coupon>, CouponRepositoryError> {
        Err(self.error())
    }

    async fn find_by_code(
        &self,
        _code: &CouponCode,
    ) -> Result<Option<Coupon>, CouponRepositoryError> {
        Err(self.error())
    }

    async fn insert(&self, _coupon: &Coupon) -> Result<(), CouponRepositoryError> {
        Err(self.error())
    }

    async fn mark_redeemed(&self, _code: &CouponCode) -> Result<bool, CouponRepositoryError> {
        Err(self.error())
    }

    async fn clear_redeemed(&self, _code: &CouponCode) -> Result<bool, CouponRepositoryError> {
        Err(self.error())
    }
}
