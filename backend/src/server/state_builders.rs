//! Builders wiring the coupon store into the HTTP state.

use std::sync::Arc;

use actix_web::web;
use tracing::warn;

use backend::domain::CouponService;
use backend::domain::ports::{
    CouponCommand, CouponRepository, RandomCouponCodeGenerator, UnavailableCouponRepository,
};
use backend::inbound::http::state::HttpState;
use backend::outbound::persistence::DieselCouponRepository;

use super::ServerConfig;

/// Pick the coupon store: Diesel when a pool is configured, otherwise a
/// repository that fails every call with the recorded reason.
fn build_coupon_repository(config: &ServerConfig) -> Arc<dyn CouponRepository> {
    match &config.db_pool {
        Some(pool) => Arc::new(DieselCouponRepository::new(pool.clone())),
        None => {
            warn!(
                reason = %config.store_unavailable_reason,
                "coupon store unavailable; coupon endpoints will answer 500"
            );
            Arc::new(UnavailableCouponRepository::new(
                config.store_unavailable_reason.as_str(),
            ))
        }
    }
}

/// Build the shared HTTP state from the server configuration.
pub(super) fn build_http_state(config: &ServerConfig) -> web::Data<HttpState> {
    let coupons: Arc<dyn CouponCommand> = Arc::new(CouponService::new(
        build_coupon_repository(config),
        Arc::new(RandomCouponCodeGenerator),
    ));
    web::Data::new(HttpState::new(coupons).with_reset_enabled(config.reset_enabled))
}
