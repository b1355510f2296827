use async_trait::async_trait;

use crate::errors::Result;

use super::platforms_model::{Platform, PlatformSetting};

/// Repository trait for platform persistence.
#[async_trait]
pub trait PlatformRepositoryTrait: Send + Sync {
    fn list(&self) -> Result<Vec<Platform>>;
    fn get_by_id(&self, platform_id: &str) -> Result<Option<Platform>>;
    async fn update_enabled(&self, platform_id: &str, enabled: bool) -> Result<Platform>;
}

/// Host-side service behind the platform commands.
#[async_trait]
pub trait PlatformServiceTrait: Send + Sync {
    fn list(&self) -> Result<Vec<Platform>>;

    /// All platforms joined with their secret presence.
    fn list_settings(&self) -> Result<Vec<PlatformSetting>>;

    fn get_setting(&self, platform_id: &str) -> Result<PlatformSetting>;

    async fn set_enabled(&self, platform_id: &str, enabled: bool) -> Result<PlatformSetting>;

    fn has_secrets(&self, platform_id: &str) -> Result<bool>;

    fn get_secret(&self, platform_id: &str) -> Result<Option<String>>;

    fn set_secret(&self, platform_id: &str, secret: &str) -> Result<()>;

    fn delete_secret(&self, platform_id: &str) -> Result<()>;
}
