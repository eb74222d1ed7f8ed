//! Diesel table definitions.
//!
//! Must match `backend/migrations` exactly; regenerate with
//! `diesel print-schema` after changing a migration.

diesel::table! {
    /// Issued coupons.
    ///
    /// `phone` is the primary key (`coupons_pkey`); `code` carries the
    /// `coupons_code_key` unique constraint.
    coupons (phone) {
        /// Owner's phone number.
        phone -> Varchar,
        /// Redeemable code, `CPN-` plus eight characters.
        code -> Varchar,
        /// Whether the coupon has been consumed.
        redeemed -> Bool,
    }
}
