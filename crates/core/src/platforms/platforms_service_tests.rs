//! Tests for PlatformService secret handling and settings projection.

use std::sync::Arc;

use crate::errors::Error;
use crate::platforms::{PlatformService, PlatformServiceTrait};
use crate::test_support::{platform, InMemoryPlatformRepository, InMemorySecretStore};

fn service_with(
    platforms: Vec<crate::platforms::Platform>,
) -> (PlatformService, Arc<InMemorySecretStore>) {
    let repo = Arc::new(InMemoryPlatformRepository::with_platforms(platforms));
    let secrets = Arc::new(InMemorySecretStore::default());
    (PlatformService::new(repo, secrets.clone()), secrets)
}

#[test]
fn test_list_settings_joins_secret_presence() {
    let (service, secrets) = service_with(vec![
        platform("BITVAVO", false),
        platform("COINBASE", true),
    ]);
    secrets.insert("platform_COINBASE", "key-123");

    let settings = service.list_settings().unwrap();
    assert_eq!(settings.len(), 2);
    assert!(!settings[0].has_secrets);
    assert!(settings[1].has_secrets);
}

#[test]
fn test_empty_stored_secret_counts_as_absent() {
    let (service, secrets) = service_with(vec![platform("COINBASE", true)]);
    secrets.insert("platform_COINBASE", "");
    assert!(!service.has_secrets("COINBASE").unwrap());
}

#[test]
fn test_set_secret_rejects_blank_value() {
    let (service, secrets) = service_with(vec![platform("COINBASE", true)]);
    let err = service.set_secret("COINBASE", "   ").unwrap_err();
    assert!(matches!(err, Error::Validation(_)));
    assert!(secrets.get("platform_COINBASE").is_none());
}

#[test]
fn test_set_then_delete_secret() {
    let (service, secrets) = service_with(vec![platform("COINBASE", true)]);
    service.set_secret("COINBASE", "abc").unwrap();
    assert_eq!(secrets.get("platform_COINBASE").as_deref(), Some("abc"));
    assert_eq!(service.get_secret("COINBASE").unwrap().as_deref(), Some("abc"));

    service.delete_secret("COINBASE").unwrap();
    assert!(service.get_secret("COINBASE").unwrap().is_none());
}

#[tokio::test]
async fn test_set_enabled_returns_updated_setting() {
    let (service, secrets) = service_with(vec![platform("TRADING212", false)]);
    secrets.insert("platform_TRADING212", "k");

    let updated = service.set_enabled("TRADING212", true).await.unwrap();
    assert!(updated.enabled);
    assert!(updated.has_secrets);
    assert!(service.list().unwrap()[0].enabled);
}

#[test]
fn test_get_setting_unknown_platform() {
    let (service, _) = service_with(vec![]);
    let err = service.get_setting("NOPE").unwrap_err();
    assert!(matches!(err, Error::NotFound(_)));
}
