//! Translation from Diesel and pool failures into coupon store errors.

use diesel::result::{DatabaseErrorKind, Error as DieselError};
use tracing::debug;

use crate::domain::Coupon;
use crate::domain::ports::CouponRepositoryError;

use super::pool::PoolError;

/// Unique constraint guarding `coupons.code`.
pub(crate) const CODE_UNIQUE_CONSTRAINT: &str = "coupons_code_key";

pub(crate) fn map_pool_error(error: PoolError) -> CouponRepositoryError {
    match error {
        PoolError::Checkout { message } | PoolError::Build { message } => {
            CouponRepositoryError::connection(message)
        }
    }
}

/// Map Diesel errors raised by reads and updates.
pub(crate) fn map_diesel_error(error: DieselError) -> CouponRepositoryError {
    match &error {
        DieselError::DatabaseError(kind, info) => {
            debug!(?kind, message = info.message(), "diesel operation failed");
        }
        _ => debug!(
            error_type = %std::any::type_name_of_val(&error),
            "diesel operation failed"
        ),
    }

    match error {
        DieselError::NotFound => CouponRepositoryError::query("record not found"),
        DieselError::QueryBuilderError(_) => CouponRepositoryError::query("database query error"),
        DieselError::DatabaseError(DatabaseErrorKind::ClosedConnection, _) => {
            CouponRepositoryError::connection("database connection error")
        }
        _ => CouponRepositoryError::query("database error"),
    }
}

/// Map an insert failure, naming the uniqueness rule the row broke.
///
/// A unique violation on [`CODE_UNIQUE_CONSTRAINT`] is a code collision; any
/// other unique violation on the table can only be the phone primary key.
pub(crate) fn map_insert_error(error: DieselError, coupon: &Coupon) -> CouponRepositoryError {
    match &error {
        DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, info) => {
            classify_unique_violation(info.constraint_name(), coupon)
        }
        _ => map_diesel_error(error),
    }
}

fn classify_unique_violation(constraint: Option<&str>, coupon: &Coupon) -> CouponRepositoryError {
    match constraint {
        Some(CODE_UNIQUE_CONSTRAINT) => {
            CouponRepositoryError::duplicate_code(coupon.code().to_string())
        }
        _ => CouponRepositoryError::duplicate_phone(coupon.phone().to_string()),
    }
}
