//! Coupon data model.
//!
//! A [`Coupon`] binds one phone number to one redeemable code. Value types
//! validate their input on construction so the service and adapters never
//! see an empty phone or code.

use std::fmt;

use rand::Rng;
use rand::seq::SliceRandom;

/// Prefix shared by every generated coupon code.
pub const COUPON_CODE_PREFIX: &str = "CPN-";
/// Number of random characters following [`COUPON_CODE_PREFIX`].
pub const COUPON_CODE_RANDOM_LEN: usize = 8;

const COUPON_CODE_ALPHABET: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789";

/// Validation errors raised by the coupon value types.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CouponValidationError {
    EmptyPhone,
    EmptyCode,
}

impl fmt::Display for CouponValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyPhone => write!(f, "phone number must not be empty"),
            Self::EmptyCode => write!(f, "coupon code must not be empty"),
        }
    }
}

impl std::error::Error for CouponValidationError {}

/// Phone number identifying the coupon owner.
///
/// The value is stored verbatim; only the empty string is rejected.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PhoneNumber(String);

impl PhoneNumber {
    /// Validate and construct a phone number.
    ///
    /// # Examples
    /// ```
    /// use backend::domain::PhoneNumber;
    ///
    /// let phone = PhoneNumber::new("555-0100").expect("valid phone");
    /// assert_eq!(phone.as_str(), "555-0100");
    /// assert!(PhoneNumber::new("").is_err());
    /// ```
    pub fn new(value: impl Into<String>) -> Result<Self, CouponValidationError> {
        let value = value.into();
        if value.is_empty() {
            return Err(CouponValidationError::EmptyPhone);
        }
        Ok(Self(value))
    }

    /// Borrow the phone number as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl AsRef<str> for PhoneNumber {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl fmt::Display for PhoneNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl TryFrom<String> for PhoneNumber {
    type Error = CouponValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

/// Redeemable coupon code.
///
/// Codes supplied by callers are only checked for emptiness so that unknown
/// codes resolve to "not found" rather than a validation failure. Codes
/// minted by [`CouponCode::generate`] always match `CPN-[A-Z0-9]{8}`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CouponCode(String);

impl CouponCode {
    /// Validate and construct a coupon code from caller input.
    pub fn new(value: impl Into<String>) -> Result<Self, CouponValidationError> {
        let value = value.into();
        if value.is_empty() {
            return Err(CouponValidationError::EmptyCode);
        }
        Ok(Self(value))
    }

    /// Mint a fresh code: the prefix followed by eight symbols drawn
    /// uniformly, with replacement, from `A-Z0-9`.
    ///
    /// # Examples
    /// ```
    /// use backend::domain::CouponCode;
    ///
    /// let code = CouponCode::generate(&mut rand::thread_rng());
    /// assert!(code.is_well_formed());
    /// assert!(code.as_str().starts_with("CPN-"));
    /// ```
    pub fn generate<R: Rng + ?Sized>(rng: &mut R) -> Self {
        let mut code = String::with_capacity(COUPON_CODE_PREFIX.len() + COUPON_CODE_RANDOM_LEN);
        code.push_str(COUPON_CODE_PREFIX);
        code.extend(
            (0..COUPON_CODE_RANDOM_LEN)
                .filter_map(|_| COUPON_CODE_ALPHABET.choose(rng))
                .map(|byte| char::from(*byte)),
        );
        Self(code)
    }

    /// Borrow the code as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }

    /// Whether the code has the shape produced by [`CouponCode::generate`].
    #[must_use]
    pub fn is_well_formed(&self) -> bool {
        self.0
            .strip_prefix(COUPON_CODE_PREFIX)
            .is_some_and(|rest| {
                rest.len() == COUPON_CODE_RANDOM_LEN
                    && rest.bytes().all(|b| COUPON_CODE_ALPHABET.contains(&b))
            })
    }
}

impl AsRef<str> for CouponCode {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl fmt::Display for CouponCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl TryFrom<String> for CouponCode {
    type Error = CouponValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

/// A coupon issued to a phone number.
///
/// ## Invariants
/// - `code` never changes after issuance.
/// - `redeemed` starts `false`; only redeem sets it and only reset clears it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Coupon {
    phone: PhoneNumber,
    code: CouponCode,
    redeemed: bool,
}

impl Coupon {
    /// Issue a new, unredeemed coupon.
    #[must_use]
    pub fn issue(phone: PhoneNumber, code: CouponCode) -> Self {
        Self {
            phone,
            code,
            redeemed: false,
        }
    }

    /// Rebuild a coupon from stored state.
    #[must_use]
    pub fn from_parts(phone: PhoneNumber, code: CouponCode, redeemed: bool) -> Self {
        Self {
            phone,
            code,
            redeemed,
        }
    }

    /// Owner's phone number.
    #[must_use]
    pub fn phone(&self) -> &PhoneNumber {
        &self.phone
    }

    /// Redeemable code.
    #[must_use]
    pub fn code(&self) -> &CouponCode {
        &self.code
    }

    /// Whether the coupon has been consumed.
    #[must_use]
    pub fn is_redeemed(&self) -> bool {
        self.redeemed
    }
}
