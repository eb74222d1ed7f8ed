//! Coupon domain service.
//!
//! Implements the [`CouponCommand`] driving port on top of a
//! [`CouponRepository`] and a [`CouponCodeGenerator`].

use std::sync::Arc;

use async_trait::async_trait;
use tracing::{error, info, warn};

use crate::domain::ports::{
    CouponCodeGenerator, CouponCommand, CouponRepository, CouponRepositoryError,
    GenerateCouponRequest, GenerateCouponResponse, RedeemCouponRequest, RedeemCouponResponse,
    ResetCouponRequest, ResetCouponResponse,
};
use crate::domain::{Coupon, CouponCode, Error, PhoneNumber};

/// Number of fresh codes tried before giving up on a colliding insert.
pub const MAX_CODE_ATTEMPTS: usize = 5;

fn map_repository_error(error: CouponRepositoryError) -> Error {
    error!(%error, "coupon store operation failed");
    Error::internal(format!("coupon store error: {error}"))
}

fn coupon_not_found() -> Error {
    Error::not_found("Coupon not found")
}

/// Coupon service implementing the generate, redeem and reset use-cases.
///
/// Generic over the store and generator so tests can inject mocks; the
/// server wires trait objects.
pub struct CouponService<R: ?Sized, G: ?Sized> {
    coupon_repo: Arc<R>,
    code_generator: Arc<G>,
}

impl<R: ?Sized, G: ?Sized> CouponService<R, G> {
    /// Create a new service over the given store and code generator.
    pub fn new(coupon_repo: Arc<R>, code_generator: Arc<G>) -> Self {
        Self {
            coupon_repo,
            code_generator,
        }
    }
}

impl<R, G> CouponService<R, G>
where
    R: CouponRepository + ?Sized,
    G: CouponCodeGenerator + ?Sized,
{
    async fn issue(&self, phone: PhoneNumber) -> Result<GenerateCouponResponse, Error> {
        for attempt in 1..=MAX_CODE_ATTEMPTS {
            let coupon = Coupon::issue(phone.clone(), self.code_generator.generate());
            match self.coupon_repo.insert(&coupon).await {
                Ok(()) => {
                    info!(code = %coupon.code(), "coupon issued");
                    return Ok(GenerateCouponResponse {
                        coupon,
                        newly_issued: true,
                    });
                }
                Err(CouponRepositoryError::DuplicateCode { code }) => {
                    warn!(%code, attempt, "generated coupon code already issued; retrying");
                }
                Err(CouponRepositoryError::DuplicatePhone { .. }) => {
                    return self.existing_after_insert_race(&phone).await;
                }
                Err(other) => return Err(map_repository_error(other)),
            }
        }

        error!(
            attempts = MAX_CODE_ATTEMPTS,
            "exhausted attempts to generate a unique coupon code"
        );
        Err(Error::internal("could not generate a unique coupon code"))
    }

    /// Another request issued the phone's coupon between our lookup and
    /// insert; hand back the winner's coupon.
    async fn existing_after_insert_race(
        &self,
        phone: &PhoneNumber,
    ) -> Result<GenerateCouponResponse, Error> {
        let coupon = self
            .coupon_repo
            .find_by_phone(phone)
            .await
            .map_err(map_repository_error)?
            .ok_or_else(|| {
                error!("coupon insert hit the phone constraint but no coupon was found");
                Error::internal("coupon insert conflicted without an existing coupon")
            })?;

        Ok(GenerateCouponResponse {
            coupon,
            newly_issued: false,
        })
    }

    /// Explain why a conditional redeem changed nothing.
    async fn redeem_refusal(&self, code: &CouponCode) -> Error {
        match self.coupon_repo.find_by_code(code).await {
            Ok(Some(_)) => Error::conflict("Coupon already redeemed"),
            Ok(None) => coupon_not_found(),
            Err(err) => map_repository_error(err),
        }
    }
}

#[async_trait]
impl<R, G> CouponCommand for CouponService<R, G>
where
    R: CouponRepository + ?Sized,
    G: CouponCodeGenerator + ?Sized,
{
    async fn generate(
        &self,
        request: GenerateCouponRequest,
    ) -> Result<GenerateCouponResponse, Error> {
        let GenerateCouponRequest { phone } = request;

        if let Some(coupon) = self
            .coupon_repo
            .find_by_phone(&phone)
            .await
            .map_err(map_repository_error)?
        {
            return Ok(GenerateCouponResponse {
                coupon,
                newly_issued: false,
            });
        }

        self.issue(phone).await
    }

    async fn redeem(&self, request: RedeemCouponRequest) -> Result<RedeemCouponResponse, Error> {
        let RedeemCouponRequest { code } = request;

        let changed = self
            .coupon_repo
            .mark_redeemed(&code)
            .await
            .map_err(map_repository_error)?;
        if !changed {
            return Err(self.redeem_refusal(&code).await);
        }

        info!(%code, "coupon redeemed");
        Ok(RedeemCouponResponse { code })
    }

    async fn reset(&self, request: ResetCouponRequest) -> Result<ResetCouponResponse, Error> {
        let ResetCouponRequest { code } = request;

        let found = self
            .coupon_repo
            .clear_redeemed(&code)
            .await
            .map_err(map_repository_error)?;
        if !found {
            return Err(coupon_not_found());
        }

        info!(%code, "coupon reset");
        Ok(ResetCouponResponse { code })
    }
}

#[cfg(test)]
#[path = "coupon_service_tests.rs"]
mod tests;
