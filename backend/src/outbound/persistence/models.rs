//! Internal Diesel row structs.
//!
//! These never leave the persistence layer; repositories convert them to
//! domain types.

use diesel::prelude::*;

use super::schema::coupons;

/// Row read from the `coupons` table.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = coupons)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct CouponRow {
    pub phone: String,
    pub code: String,
    pub redeemed: bool,
}

/// Insertable row for a newly issued coupon.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = coupons)]
pub(crate) struct NewCouponRow<'a> {
    pub phone: &'a str,
    pub code: &'a str,
    pub redeemed: bool,
}
