//! Portal configuration loaded from environment variables.

use std::time::Duration;

use serendib_core::types::{UserId, VendorId};
use serendib_sync::DEFAULT_REFRESH_INTERVAL;

/// Runtime configuration for the headless vendor portal.
#[derive(Debug, Clone)]
pub struct PortalConfig {
    /// Base URL of the backend API.
    pub api_base_url: String,
    /// Bearer token for the authenticated session, if any.
    pub api_token: Option<String>,
    /// The vendor account this portal instance acts for.
    pub vendor_id: VendorId,
    /// The authenticated user behind the session.
    pub user_id: UserId,
    /// Interval between background refresh ticks.
    pub refresh_interval: Duration,
}

impl PortalConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                 | Default                      |
    /// |-------------------------|------------------------------|
    /// | `API_BASE_URL`          | `http://localhost:3000/api`  |
    /// | `API_TOKEN`             | (none)                       |
    /// | `VENDOR_ID`             | required                     |
    /// | `USER_ID`               | required                     |
    /// | `REFRESH_INTERVAL_SECS` | `15`                         |
    pub fn from_env() -> Self {
        let api_base_url =
            std::env::var("API_BASE_URL").unwrap_or_else(|_| "http://localhost:3000/api".into());

        let api_token = std::env::var("API_TOKEN").ok().filter(|t| !t.is_empty());

        let vendor_id: VendorId = std::env::var("VENDOR_ID")
            .expect("VENDOR_ID must be set")
            .parse()
            .expect("VENDOR_ID must be a valid UUID");

        let user_id: UserId = std::env::var("USER_ID")
            .expect("USER_ID must be set")
            .parse()
            .expect("USER_ID must be a valid UUID");

        let refresh_interval = std::env::var("REFRESH_INTERVAL_SECS")
            .ok()
            .map(|v| {
                Duration::from_secs(v.parse().expect("REFRESH_INTERVAL_SECS must be a valid u64"))
            })
            .unwrap_or(DEFAULT_REFRESH_INTERVAL);

        Self {
            api_base_url,
            api_token,
            vendor_id,
            user_id,
            refresh_interval,
        }
    }
}
