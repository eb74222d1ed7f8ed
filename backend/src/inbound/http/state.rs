//! Shared HTTP adapter state.
//!
//! Handlers accept this state via `actix_web::web::Data` so they only depend
//! on the driving port and remain testable without I/O.

use std::sync::Arc;

use crate::domain::ports::CouponCommand;

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    pub coupons: Arc<dyn CouponCommand>,
    /// Whether `POST /reset` is served or refused with 403.
    pub reset_enabled: bool,
}

impl HttpState {
    /// Construct state with reset disabled.
    ///
    /// # Examples
    /// ```ignore
    /// use std::sync::Arc;
    /// use backend::inbound::http::state::HttpState;
    ///
    /// let state = HttpState::new(Arc::new(service)).with_reset_enabled(true);
    /// ```
    pub fn new(coupons: Arc<dyn CouponCommand>) -> Self {
        Self {
            coupons,
            reset_enabled: false,
        }
    }

    /// Toggle the reset endpoint.
    #[must_use]
    pub fn with_reset_enabled(mut self, enabled: bool) -> Self {
        self.reset_enabled = enabled;
        self
    }
}
