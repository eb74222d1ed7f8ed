//! Tests for HTTP error mapping.

use super::*;
use actix_web::body::to_bytes;
use actix_web::{App, HttpResponse, test as actix_test, web};
use rstest::{fixture, rstest};
use serde::Deserialize;
use serde_json::json;

const TRACE_ID: &str = "00000000-0000-0000-0000-000000000000";

#[fixture]
fn expected_trace_id() -> String {
    TRACE_ID.to_owned()
}

#[rstest]
#[case(Error::invalid_request("Phone number is required"), StatusCode::BAD_REQUEST)]
#[case(Error::conflict("Coupon already redeemed"), StatusCode::BAD_REQUEST)]
#[case(Error::forbidden("Coupon reset is disabled"), StatusCode::FORBIDDEN)]
#[case(Error::not_found("Coupon not found"), StatusCode::NOT_FOUND)]
#[case(Error::internal("boom"), StatusCode::INTERNAL_SERVER_ERROR)]
fn status_code_matches_error_code(#[case] error: Error, #[case] status: StatusCode) {
    assert_eq!(ResponseError::status_code(&error), status);
}

async fn render(error: Error) -> (StatusCode, Option<String>, Error) {
    let response = ResponseError::error_response(&error);
    let status = response.status();
    let header = response
        .headers()
        .get(TRACE_ID_HEADER)
        .and_then(|value| value.to_str().ok())
        .map(str::to_owned);
    let bytes = to_bytes(response.into_body())
        .await
        .expect("reading response body succeeds");
    let body = serde_json::from_slice(&bytes).expect("Error JSON deserialisation succeeds");
    (status, header, body)
}

#[rstest]
#[actix_web::test]
async fn internal_errors_are_redacted(expected_trace_id: String) {
    let error = Error::internal("coupon store connection failed: refused")
        .with_trace_id(expected_trace_id.clone())
        .with_details(json!({"dsn": "postgres://secret"}));

    let (status, header, body) = render(error).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(header.as_deref(), Some(expected_trace_id.as_str()));
    assert_eq!(body.code(), ErrorCode::InternalError);
    assert_eq!(body.message(), "Internal server error");
    assert!(body.details().is_none());
}

#[rstest]
#[actix_web::test]
async fn client_errors_keep_message_and_details(expected_trace_id: String) {
    let error = Error::invalid_request("Coupon code is required")
        .with_trace_id(expected_trace_id.clone())
        .with_details(json!({"field": "code", "code": "missing_field"}));

    let (status, header, body) = render(error).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(header.as_deref(), Some(expected_trace_id.as_str()));
    assert_eq!(body.message(), "Coupon code is required");
    assert_eq!(
        body.details(),
        Some(&json!({"field": "code", "code": "missing_field"}))
    );
}

#[rstest]
#[actix_web::test]
async fn error_without_trace_id_omits_trace_header() {
    let (_, header, body) = render(Error::not_found("Coupon not found")).await;

    assert!(header.is_none());
    assert_eq!(body.trace_id(), None);
}

#[derive(Deserialize)]
struct CodePayload {
    #[expect(dead_code, reason = "only deserialised to exercise the extractor")]
    code: String,
}

#[rstest]
#[case("{not json", "application/json", "Request body must be valid JSON")]
#[case("{\"code\": 7}", "application/json", "Request body must be valid JSON")]
#[case("{\"code\": \"x\"}", "text/plain", "Content-Type must be application/json")]
#[actix_web::test]
async fn json_errors_use_the_error_envelope(
    #[case] payload: &'static str,
    #[case] content_type: &'static str,
    #[case] message: &str,
) {
    let app = actix_test::init_service(
        App::new()
            .app_data(web::JsonConfig::default().error_handler(json_error_handler))
            .route(
                "/",
                web::post().to(|_: web::Json<CodePayload>| async { HttpResponse::Ok().finish() }),
            ),
    )
    .await;
    let request = actix_test::TestRequest::post()
        .uri("/")
        .insert_header(("content-type", content_type))
        .set_payload(payload)
        .to_request();

    let response = actix_test::call_service(&app, request).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body: Error = actix_test::read_body_json(response).await;
    assert_eq!(body.code(), ErrorCode::InvalidRequest);
    assert_eq!(body.message(), message);
}

#[rstest]
fn actix_errors_become_internal_errors() {
    let actix_error = actix_web::error::ErrorBadGateway("upstream");
    let error = Error::from(actix_error);

    assert_eq!(error.code(), ErrorCode::InternalError);
    assert_eq!(error.message(), "Internal server error");
}
