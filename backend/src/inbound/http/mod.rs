//! HTTP inbound adapter exposing the coupon endpoints.

pub mod coupons;
pub mod error;
pub mod health;
pub mod schemas;
pub mod state;
pub mod validation;

use actix_web::web;

pub use error::{ApiResult, json_error_handler};

/// Register the coupon endpoints, the banner and the health probes.
///
/// Callers provide `web::Data<HttpState>` and `web::Data<HealthState>`.
///
/// # Examples
/// ```
/// use actix_web::App;
/// use backend::inbound::http::configure;
///
/// let _app = App::new().configure(configure);
/// ```
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.app_data(web::JsonConfig::default().error_handler(json_error_handler))
        .service(health::root)
        .service(health::ready)
        .service(health::live)
        .service(coupons::generate_coupon)
        .service(coupons::redeem_coupon)
        .service(coupons::reset_coupon);
}
