//! PostgreSQL-backed `CouponRepository` implementation using Diesel ORM.
//!
//! Uniqueness is enforced by the table's constraints, and the redemption
//! transition is a single conditional `UPDATE` whose affected-row count
//! decides the outcome.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;
use tracing::warn;

use crate::domain::ports::{CouponRepository, CouponRepositoryError};
use crate::domain::{Coupon, CouponCode, PhoneNumber};

use super::diesel_error_mapping::{map_diesel_error, map_insert_error, map_pool_error};
use super::models::{CouponRow, NewCouponRow};
use super::pool::DbPool;
use super::schema::coupons;

/// Diesel-backed implementation of the `CouponRepository` port.
#[derive(Clone)]
pub struct DieselCouponRepository {
    pool: DbPool,
}

impl DieselCouponRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

/// Convert a stored row into a domain coupon.
///
/// Rows with empty keys cannot be produced through the service; finding one
/// means the table was edited by hand, which is reported as a query failure.
fn row_to_coupon(row: CouponRow) -> Result<Coupon, CouponRepositoryError> {
    let phone = PhoneNumber::new(row.phone).map_err(|err| {
        warn!(error = %err, "stored coupon has an invalid phone");
        CouponRepositoryError::query("stored coupon is malformed")
    })?;
    let code = CouponCode::new(row.code).map_err(|err| {
        warn!(error = %err, "stored coupon has an invalid code");
        CouponRepositoryError::query("stored coupon is malformed")
    })?;
    Ok(Coupon::from_parts(phone, code, row.redeemed))
}

#[async_trait]
impl CouponRepository for DieselCouponRepository {
    async fn find_by_phone(
        &self,
        phone: &PhoneNumber,
    ) -> Result<Option<Coupon>, CouponRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let phone = phone.as_str();

        let row: Option<CouponRow> = coupons::table
            .filter(coupons::phone.eq(phone))
            .select(CouponRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;

        row.map(row_to_coupon).transpose()
    }

    async fn find_by_code(
        &self,
        code: &CouponCode,
    ) -> Result<Option<Coupon>, CouponRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let code = code.as_str();

        let row: Option<CouponRow> = coupons::table
            .filter(coupons::code.eq(code))
            .select(CouponRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;

        row.map(row_to_coupon).transpose()
    }

    async fn insert(&self, coupon: &Coupon) -> Result<(), CouponRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let new_row = NewCouponRow {
            phone: coupon.phone().as_str(),
            code: coupon.code().as_str(),
            redeemed: coupon.is_redeemed(),
        };

        diesel::insert_into(coupons::table)
            .values(&new_row)
            .execute(&mut conn)
            .await
            .map(|_| ())
            .map_err(|err| map_insert_error(err, coupon))
    }

    async fn mark_redeemed(&self, code: &CouponCode) -> Result<bool, CouponRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let code = code.as_str();

        let updated = diesel::update(
            coupons::table
                .filter(coupons::code.eq(code))
                .filter(coupons::redeemed.eq(false)),
        )
        .set(coupons::redeemed.eq(true))
        .execute(&mut conn)
        .await
        .map_err(map_diesel_error)?;

        Ok(updated > 0)
    }

    async fn clear_redeemed(&self, code: &CouponCode) -> Result<bool, CouponRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let code = code.as_str();

        let updated = diesel::update(coupons::table.filter(coupons::code.eq(code)))
            .set(coupons::redeemed.eq(false))
            .execute(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        Ok(updated > 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn row(phone: &str, code: &str, redeemed: bool) -> CouponRow {
        CouponRow {
            phone: phone.to_owned(),
            code: code.to_owned(),
            redeemed,
        }
    }

    #[rstest]
    #[case(false)]
    #[case(true)]
    fn rows_convert_to_coupons(#[case] redeemed: bool) {
        let coupon = row_to_coupon(row("+15550001", "CPN-ABCD1234", redeemed)).expect("valid row");

        assert_eq!(coupon.phone().as_str(), "+15550001");
        assert_eq!(coupon.code().as_str(), "CPN-ABCD1234");
        assert_eq!(coupon.is_redeemed(), redeemed);
    }

    #[rstest]
    #[case(row("", "CPN-ABCD1234", false))]
    #[case(row("+15550001", "", false))]
    fn empty_keys_are_reported_as_query_errors(#[case] bad: CouponRow) {
        let err = row_to_coupon(bad).expect_err("empty key rejected");

        assert_eq!(err, CouponRepositoryError::query("stored coupon is malformed"));
    }
}
