use std::sync::Arc;

use async_trait::async_trait;

use crate::errors::{Error, Result};
use crate::platforms::PlatformSetting;

use super::{into_bridge_error, log_failure, CommandBridge, CredentialValidator, RunEnv};

/// Bridge for environments without host commands.
///
/// Reads come back empty and writes fail with [`Error::Unsupported`]. The
/// credential check does not go through the host, so it stays available.
pub struct UnsupportedBridge {
    run_env: RunEnv,
    validator: Arc<dyn CredentialValidator>,
}

impl UnsupportedBridge {
    pub fn new(run_env: RunEnv, validator: Arc<dyn CredentialValidator>) -> Self {
        Self { run_env, validator }
    }
}

#[async_trait]
impl CommandBridge for UnsupportedBridge {
    async fn list_platforms(&self) -> Result<Vec<PlatformSetting>> {
        Ok(Vec::new())
    }

    async fn update_platform(&self, _platform_id: &str, _enabled: bool) -> Result<PlatformSetting> {
        log_failure(
            "Error updating broker platform settings.",
            Err(Error::Unsupported),
        )
    }

    async fn set_secret(&self, _platform_id: &str, _secret: &str) -> Result<()> {
        log_failure("Error saving platform secrets.", Err(Error::Unsupported))
    }

    async fn clear_secret(&self, _platform_id: &str) -> Result<()> {
        log_failure("Error deleting platform secrets.", Err(Error::Unsupported))
    }

    async fn get_secret(&self, _platform_id: &str) -> Result<Option<String>> {
        Ok(None)
    }

    async fn sync_all(&self) -> Result<()> {
        log_failure("Error syncing brokers.", Err(Error::Unsupported))
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
        self.run_env
    }
}
