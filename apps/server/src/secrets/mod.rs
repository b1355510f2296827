use std::sync::Arc;

use keyring::Entry;

use platform_settings_core::{
    errors::Error,
    secrets::{namespaced_service_id, SecretStore},
    Result,
};

const USERNAME: &str = "default";

/// Secret store backed by the OS keyring.
#[derive(Debug)]
pub struct KeyringSecretStore {
    service_prefix: String,
}

impl KeyringSecretStore {
    pub fn new(service_prefix: impl Into<String>) -> Self {
        Self {
            service_prefix: service_prefix.into(),
        }
    }

    fn entry_for(&self, service: &str) -> Result<Entry> {
        let service_id = namespaced_service_id(&self.service_prefix, service);
        Entry::new(&service_id, USERNAME).map_err(|err| Error::Secret(err.to_string()))
    }
}

impl SecretStore for KeyringSecretStore {
    fn set_secret(&self, service: &str, secret: &str) -> Result<()> {
        self.entry_for(service)?
            .set_password(secret)
            .map_err(|err| Error::Secret(err.to_string()))
    }

    fn get_secret(&self, service: &str) -> Result<Option<String>> {
        match self.entry_for(service)?.get_password() {
            Ok(value) => Ok(Some(value)),
            Err(keyring::Error::NoEntry) => Ok(None),
            Err(err) => Err(Error::Secret(err.to_string())),
        }
    }

    fn delete_secret(&self, service: &str) -> Result<()> {
        match self.entry_for(service)?.delete_password() {
            Ok(_) | Err(keyring::Error::NoEntry) => Ok(()),
            Err(err) => Err(Error::Secret(err.to_string())),
        }
    }
}

pub fn build_secret_store(service_prefix: &str) -> Arc<dyn SecretStore> {
    Arc::new(KeyringSecretStore::new(service_prefix))
}
