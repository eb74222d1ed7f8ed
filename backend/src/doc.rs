//! OpenAPI documentation configuration.
//!
//! [`ApiDoc`] registers every coupon and health endpoint plus the error
//! schema wrappers from [`crate::inbound::http::schemas`]. The document backs
//! Swagger UI in debug builds and is printed by `cargo run --bin openapi-dump`.

use crate::inbound::http::coupons::{
    CouponCodeRequestBody, CouponCodeResponseBody, GenerateRequestBody, GenerateResponseBody,
};
use crate::inbound::http::schemas::{ErrorCodeSchema, ErrorSchema};
use utoipa::OpenApi;

/// OpenAPI document for the REST API.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Coupon backend API",
        description = "Issue one coupon per phone number and redeem it exactly once."
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    paths(
        crate::inbound::http::coupons::generate_coupon,
        crate::inbound::http::coupons::redeem_coupon,
        crate::inbound::http::coupons::reset_coupon,
        crate::inbound::http::health::root,
        crate::inbound::http::health::ready,
        crate::inbound::http::health::live,
    ),
    components(schemas(
        GenerateRequestBody,
        GenerateResponseBody,
        CouponCodeRequestBody,
        CouponCodeResponseBody,
        ErrorSchema,
        ErrorCodeSchema
    )),
    tags(
        (name = "coupons", description = "Coupon issuance and redemption"),
        (name = "health", description = "Banner and health probes")
    )
)]
pub struct ApiDoc;

#[cfg(test)]
mod tests {
    //! Tests verifying the generated OpenAPI document.

    use super::*;
    use rstest::rstest;
    use utoipa::openapi::RefOr;
    use utoipa::openapi::schema::Schema;

    // utoipa replaces :: with . in schema names
    const ERROR_SCHEMA_NAME: &str = "crate.domain.Error";

    fn assert_object_schema_has_field(schema: &RefOr<Schema>, field: &str) {
        match schema {
            RefOr::T(Schema::Object(obj)) => {
                assert!(
                    obj.properties.contains_key(field),
                    "schema should have field '{field}'"
                );
            }
            _ => panic!("expected Object schema"),
        }
    }

    #[rstest]
    #[case("code")]
    #[case("message")]
    #[case("traceId")]
    #[case("details")]
    fn error_schema_matches_the_wire_shape(#[case] field: &str) {
        let doc = ApiDoc::openapi();
        let schemas = &doc.components.as_ref().expect("components").schemas;
        let error_schema = schemas.get(ERROR_SCHEMA_NAME).expect("Error schema");

        assert_object_schema_has_field(error_schema, field);
    }

    #[rstest]
    #[case("/generate")]
    #[case("/redeem")]
    #[case("/reset")]
    #[case("/")]
    #[case("/health/ready")]
    #[case("/health/live")]
    fn every_endpoint_is_documented(#[case] path: &str) {
        let doc = ApiDoc::openapi();
        assert!(doc.paths.paths.contains_key(path), "missing path {path}");
    }
}
