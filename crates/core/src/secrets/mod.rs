//! Port to the external secret store.
//!
//! Platform credentials never live in the settings database. The host keeps
//! them in an OS-backed store (keyring, encrypted file) reached through
//! [`SecretStore`].

use crate::constants::PLATFORM_SECRET_PREFIX;
use crate::errors::Result;

/// Default namespace for service keys in a shared keyring.
pub const DEFAULT_SERVICE_ID_PREFIX: &str = "platform-settings";

/// Abstraction over a secret backend.
pub trait SecretStore: Send + Sync {
    fn set_secret(&self, service: &str, secret: &str) -> Result<()>;
    fn get_secret(&self, service: &str) -> Result<Option<String>>;
    fn delete_secret(&self, service: &str) -> Result<()>;
}

/// Namespaces a service key so entries from different apps don't collide
/// in a shared OS keyring.
pub fn namespaced_service_id(prefix: &str, service: &str) -> String {
    format!("{}::{}", prefix, service.to_lowercase())
}

/// Service key under which a platform's credentials are stored.
pub fn platform_secret_key(platform_id: &str) -> String {
    format!("{}{}", PLATFORM_SECRET_PREFIX, platform_id)
}
