//! Domain ports for the hexagonal boundary.

mod macros;
pub(crate) use macros::define_port_error;

mod coupon_code_generator;
mod coupon_command;
mod coupon_repository;

#[cfg(test)]
pub use coupon_code_generator::MockCouponCodeGenerator;
pub use coupon_code_generator::{CouponCodeGenerator, RandomCouponCodeGenerator};
#[cfg(test)]
pub use coupon_command::MockCouponCommand;
pub use coupon_command::{
    CouponCommand, GenerateCouponRequest, GenerateCouponResponse, RedeemCouponRequest,
    RedeemCouponResponse, ResetCouponRequest, ResetCouponResponse,
};
#[cfg(test)]
pub use coupon_repository::MockCouponRepository;
pub use coupon_repository::{
    CouponRepository, CouponRepositoryError, UnavailableCouponRepository,
};
