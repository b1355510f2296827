use std::sync::Arc;

use async_trait::async_trait;

use crate::errors::Result;
use crate::platforms::PlatformSetting;

use super::{
    into_bridge_error, log_failure, CommandBridge, CredentialValidator, HostServices, RunEnv,
};

/// Bridge for the desktop host: every command reaches the real services.
pub struct DesktopBridge {
    host: HostServices,
    validator: Arc<dyn CredentialValidator>,
}

impl DesktopBridge {
    pub fn new(host: HostServices, validator: Arc<dyn CredentialValidator>) -> Self {
        Self { host, validator }
    }
}

#[async_trait]
impl CommandBridge for DesktopBridge {
    async fn list_platforms(&self) -> Result<Vec<PlatformSetting>> {
        let result = self.host.platforms.list_settings().map_err(into_bridge_error);
        log_failure("Error loading broker platform settings.", result)
    }

    async fn update_platform(&self, platform_id: &str, enabled: bool) -> Result<PlatformSetting> {
        let result = self
            .host
            .platforms
            .set_enabled(platform_id, enabled)
            .await
            .map_err(into_bridge_error);
        log_failure("Error updating broker platform settings.", result)
    }

    async fn set_secret(&self, platform_id: &str, secret: &str) -> Result<()> {
        let result = self
            .host
            .platforms
            .set_secret(platform_id, secret)
            .map_err(into_bridge_error);
        log_failure("Error saving platform secrets.", result)
    }

    async fn clear_secret(&self, platform_id: &str) -> Result<()> {
        let result = self
            .host
            .platforms
            .delete_secret(platform_id)
            .map_err(into_bridge_error);
        log_failure("Error deleting platform secrets.", result)
    }

    async fn get_secret(&self, platform_id: &str) -> Result<Option<String>> {
        let result = self
            .host
            .platforms
            .get_secret(platform_id)
            .map_err(into_bridge_error);
        log_failure("Error loading platform secrets.", result)
    }

    async fn sync_all(&self) -> Result<()> {
        let result = self
            .host
            .sync
            .sync_all_accounts()
            .await
            .map_err(into_bridge_error);
        log_failure("Error syncing brokers.", result)
    }

    async fn validate_credentials(&self, platform_id: &str) -> Result<Option<serde_json::Value>> {
        let result = self
            .validator
            .validate(platform_id)
            .await
            .map_err(into_bridge_error);
        log_failure("Error validating broker credentials.", result)
    }

    fn run_env(&self) -> RunEnv {
        RunEnv::Desktop
    }
}
