//! Coupon HTTP handlers.
//!
//! ```text
//! POST /generate {"phone":"555-0100"}
//! POST /redeem {"code":"CPN-AB12CD34"}
//! POST /reset {"code":"CPN-AB12CD34"}
//! ```

use actix_web::{post, web};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::ports::{
    GenerateCouponRequest, GenerateCouponResponse, RedeemCouponRequest, ResetCouponRequest,
};
use crate::domain::{CouponCode, Error, PhoneNumber};
use crate::inbound::http::ApiResult;
use crate::inbound::http::schemas::ErrorSchema;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{
    CODE_FIELD, FieldName, PHONE_FIELD, missing_field_error, require_text,
};

pub(crate) const GENERATED_MESSAGE: &str = "Coupon generated";
pub(crate) const ALREADY_EXISTS_MESSAGE: &str = "Coupon already exists for this phone";
pub(crate) const REDEEMED_MESSAGE: &str = "Coupon redeemed";
pub(crate) const RESET_MESSAGE: &str = "Coupon reset for testing";
pub(crate) const RESET_DISABLED_MESSAGE: &str = "Coupon reset is disabled";

/// Request body for `POST /generate`.
///
/// `phone` is optional at the schema level so that a missing field yields the
/// API's own validation error instead of a deserialisation failure.
#[derive(Debug, Default, Deserialize, Serialize, ToSchema)]
pub struct GenerateRequestBody {
    #[schema(example = "555-0100")]
    pub phone: Option<String>,
}

/// Request body for `POST /redeem` and `POST /reset`.
#[derive(Debug, Default, Deserialize, Serialize, ToSchema)]
pub struct CouponCodeRequestBody {
    #[schema(example = "CPN-AB12CD34")]
    pub code: Option<String>,
}

/// Response body for `POST /generate`.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
pub struct GenerateResponseBody {
    /// Whether the coupon was issued by this call or already existed.
    #[schema(example = "Coupon generated")]
    pub message: String,
    #[schema(example = "CPN-AB12CD34")]
    pub code: String,
    #[schema(example = "555-0100")]
    pub phone: String,
    pub redeemed: bool,
}

impl From<GenerateCouponResponse> for GenerateResponseBody {
    fn from(value: GenerateCouponResponse) -> Self {
        let message = if value.newly_issued {
            GENERATED_MESSAGE
        } else {
            ALREADY_EXISTS_MESSAGE
        };
        Self {
            message: message.to_owned(),
            code: value.coupon.code().to_string(),
            phone: value.coupon.phone().to_string(),
            redeemed: value.coupon.is_redeemed(),
        }
    }
}

/// Response body for `POST /redeem` and `POST /reset`.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
pub struct CouponCodeResponseBody {
    #[schema(example = "Coupon redeemed")]
    pub message: String,
    #[schema(example = "CPN-AB12CD34")]
    pub code: String,
}

impl CouponCodeResponseBody {
    fn new(message: &str, code: &CouponCode) -> Self {
        Self {
            message: message.to_owned(),
            code: code.to_string(),
        }
    }
}

fn parse_phone(value: Option<String>) -> Result<PhoneNumber, Error> {
    let text = require_text(value, PHONE_FIELD)?;
    PhoneNumber::new(text).map_err(|_| missing_field_error(PHONE_FIELD))
}

fn parse_code(value: Option<String>, field: FieldName) -> Result<CouponCode, Error> {
    let text = require_text(value, field)?;
    CouponCode::new(text).map_err(|_| missing_field_error(field))
}

/// Issue a coupon for a phone number, or return the one already issued.
///
/// Both cases answer 200; `message` tells them apart.
#[utoipa::path(
    post,
    path = "/generate",
    request_body = GenerateRequestBody,
    responses(
        (
            status = 200,
            description = "Coupon issued or already present",
            body = GenerateResponseBody
        ),
        (status = 400, description = "Phone number missing", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["coupons"],
    operation_id = "generateCoupon"
)]
#[post("/generate")]
pub async fn generate_coupon(
    state: web::Data<HttpState>,
    payload: web::Json<GenerateRequestBody>,
) -> ApiResult<web::Json<GenerateResponseBody>> {
    let phone = parse_phone(payload.into_inner().phone)?;
    let response = state
        .coupons
        .generate(GenerateCouponRequest { phone })
        .await?;
    Ok(web::Json(GenerateResponseBody::from(response)))
}

/// Redeem a coupon exactly once.
#[utoipa::path(
    post,
    path = "/redeem",
    request_body = CouponCodeRequestBody,
    responses(
        (status = 200, description = "Coupon redeemed", body = CouponCodeResponseBody),
        (status = 400, description = "Code missing or coupon already redeemed", body = ErrorSchema),
        (status = 404, description = "Coupon not found", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["coupons"],
    operation_id = "redeemCoupon"
)]
#[post("/redeem")]
pub async fn redeem_coupon(
    state: web::Data<HttpState>,
    payload: web::Json<CouponCodeRequestBody>,
) -> ApiResult<web::Json<CouponCodeResponseBody>> {
    let code = parse_code(payload.into_inner().code, CODE_FIELD)?;
    let response = state.coupons.redeem(RedeemCouponRequest { code }).await?;
    Ok(web::Json(CouponCodeResponseBody::new(
        REDEEMED_MESSAGE,
        &response.code,
    )))
}

/// Return a coupon to the unredeemed state. Test deployments only.
#[utoipa::path(
    post,
    path = "/reset",
    request_body = CouponCodeRequestBody,
    responses(
        (status = 200, description = "Coupon reset", body = CouponCodeResponseBody),
        (status = 400, description = "Code missing", body = ErrorSchema),
        (status = 403, description = "Reset disabled on this deployment", body = ErrorSchema),
        (status = 404, description = "Coupon not found", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["coupons"],
    operation_id = "resetCoupon"
)]
#[post("/reset")]
pub async fn reset_coupon(
    state: web::Data<HttpState>,
    payload: web::Json<CouponCodeRequestBody>,
) -> ApiResult<web::Json<CouponCodeResponseBody>> {
    if !state.reset_enabled {
        return Err(Error::forbidden(RESET_DISABLED_MESSAGE));
    }
    let code = parse_code(payload.into_inner().code, CODE_FIELD)?;
    let response = state.coupons.reset(ResetCouponRequest { code }).await?;
    Ok(web::Json(CouponCodeResponseBody::new(
        RESET_MESSAGE,
        &response.code,
    )))
}

#[cfg(test)]
#[path = "coupons_tests.rs"]
mod tests;
