use serde::Serialize;

use crate::platforms::PlatformSetting;
use crate::queries::ApiKeyStatus;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum PlatformStatus {
    Disabled,
    /// Enabled, but credentials are still missing.
    NeedsConfiguration,
    Ready,
}

/// Everything the settings card shows for one platform.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PlatformView {
    pub id: String,
    pub display_name: String,
    pub url: String,
    pub enabled: bool,
    pub needs_api_key: bool,
    pub is_secret_set: bool,
    pub is_configured: bool,
    pub status: PlatformStatus,
    pub logo: Option<&'static str>,
}

impl PlatformView {
    pub fn new(platform: &PlatformSetting, api_key: ApiKeyStatus) -> Self {
        let is_configured = !api_key.needs_api_key || api_key.is_secret_set;
        let status = if !platform.enabled {
            PlatformStatus::Disabled
        } else if !is_configured {
            PlatformStatus::NeedsConfiguration
        } else {
            PlatformStatus::Ready
        };

        Self {
            id: platform.id.clone(),
            display_name: platform.display_name().to_string(),
            url: platform.url.clone(),
            enabled: platform.enabled,
            needs_api_key: api_key.needs_api_key,
            is_secret_set: api_key.is_secret_set,
            is_configured,
            status,
            logo: logo_filename(&platform.id),
        }
    }

    /// Settings can only be edited while the platform is enabled.
    pub fn can_configure(&self) -> bool {
        self.enabled
    }

    pub fn configure_label(&self) -> &'static str {
        if self.enabled {
            "Configure Settings"
        } else {
            "Enable platform to configure"
        }
    }

    pub fn api_key_placeholder(&self, input: &str) -> &'static str {
        if self.is_secret_set && input.is_empty() {
            "API Key is Set"
        } else {
            "Enter API Key"
        }
    }

    /// Helper text under the API key field, given what the user has typed.
    pub fn api_key_hint(&self, input: &str) -> Option<&'static str> {
        if !input.is_empty() {
            return None;
        }
        if self.is_secret_set {
            Some("An API key is set. Enter a new key to update, or leave blank and save to clear the key.")
        } else {
            Some("No API key set. Enter a key and save.")
        }
    }
}

pub fn logo_filename(platform_id: &str) -> Option<&'static str> {
    match platform_id {
        "TRADING212" => Some("T212.png"),
        "COINBASE" => Some("coinbase.png"),
        "BITVAVO" => Some("bitvavo.png"),
        _ => None,
    }
}
