//! Tests for coupon HTTP handlers.

use std::sync::Arc;

use actix_web::http::StatusCode;
use actix_web::{App, test as actix_test, web};
use rstest::rstest;
use serde_json::{Value, json};

use super::*;
use crate::domain::ports::{MockCouponCommand, RedeemCouponResponse, ResetCouponResponse};
use crate::domain::{Coupon, ErrorCode};
use crate::inbound::http::error::json_error_handler;

fn coupon(phone: &str, code: &str, redeemed: bool) -> Coupon {
    Coupon::from_parts(
        PhoneNumber::new(phone).expect("valid phone"),
        CouponCode::new(code).expect("valid code"),
        redeemed,
    )
}

async fn call(
    command: MockCouponCommand,
    reset_enabled: bool,
    uri: &str,
    body: Value,
) -> actix_web::dev::ServiceResponse {
    let state = HttpState::new(Arc::new(command)).with_reset_enabled(reset_enabled);
    let app = actix_test::init_service(
        App::new()
            .app_data(web::Data::new(state))
            .app_data(web::JsonConfig::default().error_handler(json_error_handler))
            .service(generate_coupon)
            .service(redeem_coupon)
            .service(reset_coupon),
    )
    .await;
    let request = actix_test::TestRequest::post()
        .uri(uri)
        .set_json(body)
        .to_request();
    actix_test::call_service(&app, request).await
}

#[rstest]
#[case(true, GENERATED_MESSAGE)]
#[case(false, ALREADY_EXISTS_MESSAGE)]
#[actix_web::test]
async fn generate_reports_whether_the_coupon_is_new(
    #[case] newly_issued: bool,
    #[case] message: &str,
) {
    let mut command = MockCouponCommand::new();
    command
        .expect_generate()
        .withf(|request: &GenerateCouponRequest| request.phone.as_str() == "555-0100")
        .times(1)
        .returning(move |request| {
            Ok(GenerateCouponResponse {
                coupon: Coupon::issue(
                    request.phone,
                    CouponCode::new("CPN-AB12CD34").expect("valid code"),
                ),
                newly_issued,
            })
        });

    let response = call(command, false, "/generate", json!({"phone": "555-0100"})).await;

    assert_eq!(response.status(), StatusCode::OK);
    let body: GenerateResponseBody = actix_test::read_body_json(response).await;
    assert_eq!(body.message, message);
    assert_eq!(body.code, "CPN-AB12CD34");
    assert_eq!(body.phone, "555-0100");
    assert!(!body.redeemed);
}

#[rstest]
#[actix_web::test]
async fn generate_echoes_redeemed_state_of_existing_coupon() {
    let mut command = MockCouponCommand::new();
    command.expect_generate().times(1).returning(|_| {
        Ok(GenerateCouponResponse {
            coupon: coupon("555-0100", "CPN-AB12CD34", true),
            newly_issued: false,
        })
    });

    let response = call(command, false, "/generate", json!({"phone": "555-0100"})).await;

    let body: GenerateResponseBody = actix_test::read_body_json(response).await;
    assert!(body.redeemed);
}

#[rstest]
#[case("/generate", json!({}), "Phone number is required", "phone")]
#[case("/generate", json!({"phone": ""}), "Phone number is required", "phone")]
#[case("/generate", json!({"phone": null}), "Phone number is required", "phone")]
#[case("/redeem", json!({}), "Coupon code is required", "code")]
#[case("/redeem", json!({"code": ""}), "Coupon code is required", "code")]
#[case("/reset", json!({"code": ""}), "Coupon code is required", "code")]
#[actix_web::test]
async fn missing_fields_are_rejected_before_the_domain(
    #[case] uri: &str,
    #[case] body: Value,
    #[case] message: &str,
    #[case] field: &str,
) {
    let mut command = MockCouponCommand::new();
    command.expect_generate().times(0);
    command.expect_redeem().times(0);
    command.expect_reset().times(0);

    let response = call(command, true, uri, body).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let error: Error = actix_test::read_body_json(response).await;
    assert_eq!(error.code(), ErrorCode::InvalidRequest);
    assert_eq!(error.message(), message);
    assert_eq!(
        error.details(),
        Some(&json!({"field": field, "code": "missing_field"}))
    );
}

#[rstest]
#[actix_web::test]
async fn redeem_returns_code_and_message() {
    let mut command = MockCouponCommand::new();
    command
        .expect_redeem()
        .withf(|request: &RedeemCouponRequest| request.code.as_str() == "CPN-AB12CD34")
        .times(1)
        .returning(|request| Ok(RedeemCouponResponse { code: request.code }));

    let response = call(command, false, "/redeem", json!({"code": "CPN-AB12CD34"})).await;

    assert_eq!(response.status(), StatusCode::OK);
    let body: CouponCodeResponseBody = actix_test::read_body_json(response).await;
    assert_eq!(body.message, REDEEMED_MESSAGE);
    assert_eq!(body.code, "CPN-AB12CD34");
}

#[rstest]
#[case(Error::not_found("Coupon not found"), StatusCode::NOT_FOUND)]
#[case(Error::conflict("Coupon already redeemed"), StatusCode::BAD_REQUEST)]
#[case(Error::internal("coupon store connection failed"), StatusCode::INTERNAL_SERVER_ERROR)]
#[actix_web::test]
async fn redeem_maps_domain_failures(#[case] failure: Error, #[case] status: StatusCode) {
    let expected_message = if failure.code() == ErrorCode::InternalError {
        "Internal server error".to_owned()
    } else {
        failure.message().to_owned()
    };
    let mut command = MockCouponCommand::new();
    command
        .expect_redeem()
        .times(1)
        .return_once(move |_| Err(failure));

    let response = call(command, false, "/redeem", json!({"code": "CPN-AB12CD34"})).await;

    assert_eq!(response.status(), status);
    let error: Error = actix_test::read_body_json(response).await;
    assert_eq!(error.message(), expected_message);
}

#[rstest]
#[actix_web::test]
async fn reset_is_forbidden_when_disabled() {
    let mut command = MockCouponCommand::new();
    command.expect_reset().times(0);

    let response = call(command, false, "/reset", json!({"code": "CPN-AB12CD34"})).await;

    assert_eq!(response.status(), StatusCode::FORBIDDEN);
    let error: Error = actix_test::read_body_json(response).await;
    assert_eq!(error.code(), ErrorCode::Forbidden);
    assert_eq!(error.message(), RESET_DISABLED_MESSAGE);
}

#[rstest]
#[actix_web::test]
async fn reset_returns_code_and_message_when_enabled() {
    let mut command = MockCouponCommand::new();
    command
        .expect_reset()
        .withf(|request: &ResetCouponRequest| request.code.as_str() == "CPN-AB12CD34")
        .times(1)
        .returning(|request| Ok(ResetCouponResponse { code: request.code }));

    let response = call(command, true, "/reset", json!({"code": "CPN-AB12CD34"})).await;

    assert_eq!(response.status(), StatusCode::OK);
    let body: CouponCodeResponseBody = actix_test::read_body_json(response).await;
    assert_eq!(body.message, RESET_MESSAGE);
    assert_eq!(body.code, "CPN-AB12CD34");
}

#[rstest]
#[actix_web::test]
async fn reset_reports_unknown_codes() {
    let mut command = MockCouponCommand::new();
    command
        .expect_reset()
        .times(1)
        .return_once(|_| Err(Error::not_found("Coupon not found")));

    let response = call(command, true, "/reset", json!({"code": "CPN-UNKNOWN0"})).await;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[rstest]
#[case(" 555-0100", " 555-0100")]
#[case("+44 20 7946 0000", "+44 20 7946 0000")]
fn parse_phone_keeps_value_verbatim(#[case] raw: &str, #[case] expected: &str) {
    let phone = parse_phone(Some(raw.to_owned())).expect("valid phone");
    assert_eq!(phone.as_str(), expected);
}
