//! Command Bridge: request/response calls into the host process.
//!
//! The environment gate is a strategy chosen once at start-up by
//! [`select_bridge`]. Callers hold an `Arc<dyn CommandBridge>` and never
//! check the environment themselves.

mod desktop;
mod run_env;
mod unsupported;
mod validator;

use std::sync::Arc;

use async_trait::async_trait;
use log::error;

use crate::errors::{Error, Result};
use crate::platforms::{PlatformServiceTrait, PlatformSetting};
use crate::sync::BrokerSyncServiceTrait;

pub use desktop::DesktopBridge;
pub use run_env::RunEnv;
pub use unsupported::UnsupportedBridge;
pub use validator::{CredentialValidator, HttpCredentialValidator};

/// Host commands consumed by the settings layer.
#[async_trait]
pub trait CommandBridge: Send + Sync {
    async fn list_platforms(&self) -> Result<Vec<PlatformSetting>>;

    async fn update_platform(&self, platform_id: &str, enabled: bool) -> Result<PlatformSetting>;

    async fn set_secret(&self, platform_id: &str, secret: &str) -> Result<()>;

    async fn clear_secret(&self, platform_id: &str) -> Result<()>;

    async fn get_secret(&self, platform_id: &str) -> Result<Option<String>>;

    async fn sync_all(&self) -> Result<()>;

    async fn validate_credentials(&self, platform_id: &str) -> Result<Option<serde_json::Value>>;

    fn run_env(&self) -> RunEnv;
}

/// Host-side collaborators a desktop bridge forwards to.
#[derive(Clone)]
pub struct HostServices {
    pub platforms: Arc<dyn PlatformServiceTrait>,
    pub sync: Arc<dyn BrokerSyncServiceTrait>,
}

/// Picks the bridge implementation for the environment.
///
/// `host` is only consulted for [`RunEnv::Desktop`]; when it is missing the
/// gated bridge is used even on desktop.
pub fn select_bridge(
    run_env: RunEnv,
    host: Option<HostServices>,
    validator: Arc<dyn CredentialValidator>,
) -> Arc<dyn CommandBridge> {
    match host {
        Some(host) if run_env.is_desktop() => Arc::new(DesktopBridge::new(host, validator)),
        _ => Arc::new(UnsupportedBridge::new(run_env, validator)),
    }
}

/// Logs a failed host call at the boundary and hands the error back unchanged.
pub(crate) fn log_failure<T>(context: &str, result: Result<T>) -> Result<T> {
    if let Err(ref e) = result {
        error!("{} {}", context, e);
    }
    result
}

/// Collapses host-side failures into an opaque bridge error.
///
/// Capability and validation failures keep their kind so callers can tell them apart.
pub(crate) fn into_bridge_error(err: Error) -> Error {
    match err {
        Error::Unsupported | Error::ValidationFailed(_) | Error::Bridge(_) => err,
        other => Error::Bridge(other.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::platforms::PlatformService;
    use crate::test_support::{
        InMemoryPlatformRepository, InMemorySecretStore, MockSyncService, MockValidator,
    };

    #[test]
    fn test_select_bridge_by_environment() {
        let host = HostServices {
            platforms: Arc::new(PlatformService::new(
                Arc::new(InMemoryPlatformRepository::default()),
                Arc::new(InMemorySecretStore::default()),
            )),
            sync: Arc::new(MockSyncService::default()),
        };
        let validator: Arc<dyn CredentialValidator> = Arc::new(MockValidator::accepting());

        let desktop = select_bridge(RunEnv::Desktop, Some(host.clone()), validator.clone());
        assert_eq!(desktop.run_env(), RunEnv::Desktop);

        let web = select_bridge(RunEnv::Web, Some(host), validator.clone());
        assert_eq!(web.run_env(), RunEnv::Web);

        let headless = select_bridge(RunEnv::Desktop, None, validator);
        assert_eq!(headless.run_env(), RunEnv::Desktop);
    }

    #[test]
    fn test_into_bridge_error_keeps_domain_kinds() {
        assert!(matches!(into_bridge_error(Error::Unsupported), Error::Unsupported));
        assert!(matches!(
            into_bridge_error(Error::ValidationFailed("x".into())),
            Error::ValidationFailed(_)
        ));
        assert!(matches!(
            into_bridge_error(Error::NotFound("Platform X".into())),
            Error::Bridge(ref m) if m == "Not found: Platform X"
        ));
    }
}
