//! Process-local coupon store.
//!
//! Keeps coupons in a mutex-guarded map keyed by phone. Each port call takes
//! the lock once, so uniqueness checks and the redemption transition are
//! atomic with respect to other callers in the same process. Data is lost on
//! restart.

use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard};

use async_trait::async_trait;

use crate::domain::ports::{CouponRepository, CouponRepositoryError};
use crate::domain::{Coupon, CouponCode, PhoneNumber};

/// In-memory implementation of the `CouponRepository` port.
#[derive(Debug, Default)]
pub struct InMemoryCouponRepository {
    coupons: Mutex<HashMap<PhoneNumber, Coupon>>,
}

impl InMemoryCouponRepository {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> Result<MutexGuard<'_, HashMap<PhoneNumber, Coupon>>, CouponRepositoryError> {
        self.coupons
            .lock()
            .map_err(|_| CouponRepositoryError::query("in-memory coupon store poisoned"))
    }
}

fn find_code_mut<'a>(
    coupons: &'a mut HashMap<PhoneNumber, Coupon>,
    code: &CouponCode,
) -> Option<&'a mut Coupon> {
    coupons.values_mut().find(|coupon| coupon.code() == code)
}

#[async_trait]
impl CouponRepository for InMemoryCouponRepository {
    async fn find_by_phone(
        &self,
        phone: &PhoneNumber,
    ) -> Result<Option<Coupon>, CouponRepositoryError> {
        Ok(self.lock()?.get(phone).cloned())
    }

    async fn find_by_code(
        &self,
        code: &CouponCode,
    ) -> Result<Option<Coupon>, CouponRepositoryError> {
        Ok(self
            .lock()?
            .values()
            .find(|coupon| coupon.code() == code)
            .cloned())
    }

    async fn insert(&self, coupon: &Coupon) -> Result<(), CouponRepositoryError> {
        let mut guard = self.lock()?;
        if guard.contains_key(coupon.phone()) {
            return Err(CouponRepositoryError::duplicate_phone(
                coupon.phone().to_string(),
            ));
        }
        if guard.values().any(|existing| existing.code() == coupon.code()) {
            return Err(CouponRepositoryError::duplicate_code(
                coupon.code().to_string(),
            ));
        }
        guard.insert(coupon.phone().clone(), coupon.clone());
        Ok(())
    }

    async fn mark_redeemed(&self, code: &CouponCode) -> Result<bool, CouponRepositoryError> {
        let mut guard = self.lock()?;
        match find_code_mut(&mut guard, code) {
            Some(coupon) if !coupon.is_redeemed() => {
                *coupon = Coupon::from_parts(coupon.phone().clone(), coupon.code().clone(), true);
                Ok(true)
            }
            _ => Ok(false),
        }
    }

    async fn clear_redeemed(&self, code: &CouponCode) -> Result<bool, CouponRepositoryError> {
        let mut guard = self.lock()?;
        match find_code_mut(&mut guard, code) {
            Some(coupon) => {
                *coupon = Coupon::from_parts(coupon.phone().clone(), coupon.code().clone(), false);
                Ok(true)
            }
            None => Ok(false),
        }
    }
}
