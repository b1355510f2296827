//! Domain models for broker platforms.

use serde::{Deserialize, Serialize};

use crate::constants::PLATFORMS_REQUIRE_API_KEY;

/// Domain model representing a broker platform as stored by the host.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Platform {
    /// Slug identifier (e.g., "COINBASE", "TRADING212")
    pub id: String,
    /// Display name of the platform
    pub name: Option<String>,
    /// URL to the platform's website
    pub url: String,
    pub enabled: bool,
}

/// A platform together with whether credentials are stored for it.
///
/// `has_secrets` is derived from the secret store and cannot be set directly.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlatformSetting {
    pub id: String,
    pub name: Option<String>,
    pub url: String,
    pub enabled: bool,
    pub has_secrets: bool,
}

impl PlatformSetting {
    pub fn from_platform(platform: Platform, has_secrets: bool) -> Self {
        Self {
            id: platform.id,
            name: platform.name,
            url: platform.url,
            enabled: platform.enabled,
            has_secrets,
        }
    }

    /// Name shown to the user, falling back to the id.
    pub fn display_name(&self) -> &str {
        self.name.as_deref().unwrap_or(&self.id)
    }

    /// Whether credentials must be configured before the platform can sync.
    // TODO: replace with a per-platform capability flag once a platform without credentials exists.
    pub fn needs_api_key(&self) -> bool {
        PLATFORMS_REQUIRE_API_KEY
    }
}
