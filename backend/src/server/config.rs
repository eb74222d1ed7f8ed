//! HTTP server configuration object and helpers.

use backend::CouponSettings;
use backend::outbound::persistence::DbPool;

/// Builder-style configuration for creating the HTTP server.
pub struct ServerConfig {
    pub(crate) host: String,
    pub(crate) port: u16,
    pub(crate) reset_enabled: bool,
    pub(crate) db_pool: Option<DbPool>,
    pub(crate) store_unavailable_reason: String,
}

impl ServerConfig {
    /// Construct a server configuration from loaded settings.
    #[must_use]
    pub fn from_settings(settings: &CouponSettings) -> Self {
        Self {
            host: settings.host().to_owned(),
            port: settings.port(),
            reset_enabled: settings.reset_enabled(),
            db_pool: None,
            store_unavailable_reason: "COUPONS_DATABASE_URL is not set".to_owned(),
        }
    }

    /// Attach a database connection pool for the coupon store.
    #[must_use]
    pub fn with_db_pool(mut self, pool: DbPool) -> Self {
        self.db_pool = Some(pool);
        self
    }

    /// Record why no pool is attached; reported by every store call.
    #[must_use]
    pub fn with_store_unavailable(mut self, reason: impl Into<String>) -> Self {
        self.db_pool = None;
        self.store_unavailable_reason = reason.into();
        self
    }

    /// Return the address the server will bind to.
    #[must_use]
    pub fn bind_addr(&self) -> (&str, u16) {
        (self.host.as_str(), self.port)
    }
}
