use std::sync::Arc;

use async_trait::async_trait;
use log::debug;

use crate::errors::{Error, Result, ValidationError};
use crate::secrets::{platform_secret_key, SecretStore};

use super::platforms_model::{Platform, PlatformSetting};
use super::platforms_traits::{PlatformRepositoryTrait, PlatformServiceTrait};

pub struct PlatformService {
    repo: Arc<dyn PlatformRepositoryTrait>,
    secret_store: Arc<dyn SecretStore>,
}

impl PlatformService {
    pub fn new(repo: Arc<dyn PlatformRepositoryTrait>, secret_store: Arc<dyn SecretStore>) -> Self {
        Self { repo, secret_store }
    }

    fn to_setting(&self, platform: Platform) -> Result<PlatformSetting> {
        let has = self.has_secrets(&platform.id)?;
        Ok(PlatformSetting::from_platform(platform, has))
    }
}

#[async_trait]
impl PlatformServiceTrait for PlatformService {
    fn list(&self) -> Result<Vec<Platform>> {
        self.repo.list()
    }

    fn list_settings(&self) -> Result<Vec<PlatformSetting>> {
        let platforms = self.repo.list()?;
        let mut result = Vec::with_capacity(platforms.len());
        for platform in platforms {
            result.push(self.to_setting(platform)?);
        }
        Ok(result)
    }

    fn get_setting(&self, platform_id: &str) -> Result<PlatformSetting> {
        let platform = self
            .repo
            .get_by_id(platform_id)?
            .ok_or_else(|| Error::NotFound(format!("Platform {}", platform_id)))?;
        self.to_setting(platform)
    }

    async fn set_enabled(&self, platform_id: &str, enabled: bool) -> Result<PlatformSetting> {
        debug!("Setting platform {} enabled={}", platform_id, enabled);
        let updated = self.repo.update_enabled(platform_id, enabled).await?;
        self.to_setting(updated)
    }

    fn has_secrets(&self, platform_id: &str) -> Result<bool> {
        let key = platform_secret_key(platform_id);
        Ok(self
            .secret_store
            .get_secret(&key)?
            .map(|s| !s.is_empty())
            .unwrap_or(false))
    }

    fn get_secret(&self, platform_id: &str) -> Result<Option<String>> {
        self.secret_store.get_secret(&platform_secret_key(platform_id))
    }

    fn set_secret(&self, platform_id: &str, secret: &str) -> Result<()> {
        if secret.trim().is_empty() {
            return Err(ValidationError::InvalidInput(
                "Refusing to store an empty secret".to_string(),
            )
            .into());
        }
        // Do not log the secret value
        debug!("Storing secret for platform {}", platform_id);
        self.secret_store
            .set_secret(&platform_secret_key(platform_id), secret)
    }

    fn delete_secret(&self, platform_id: &str) -> Result<()> {
        debug!("Deleting secret for platform {}", platform_id);
        self.secret_store
            .delete_secret(&platform_secret_key(platform_id))
    }
}
