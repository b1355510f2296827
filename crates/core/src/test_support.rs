//! In-memory doubles shared by unit tests.

use std::collections::{HashMap, VecDeque};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;
use tokio::sync::oneshot;

use crate::bridge::{CommandBridge, CredentialValidator, RunEnv};
use crate::errors::{DatabaseError, Error, Result};
use crate::platforms::{Platform, PlatformRepositoryTrait, PlatformSetting};
use crate::secrets::SecretStore;
use crate::sync::BrokerSyncServiceTrait;

pub fn platform(id: &str, enabled: bool) -> Platform {
    Platform {
        id: id.to_string(),
        name: None,
        url: format!("https://{}.example.com", id.to_lowercase()),
        enabled,
    }
}

pub fn setting(id: &str, enabled: bool) -> PlatformSetting {
    PlatformSetting::from_platform(platform(id, enabled), false)
}

#[derive(Default)]
pub struct InMemorySecretStore {
    secrets: Mutex<HashMap<String, String>>,
}

impl InMemorySecretStore {
    pub fn insert(&self, service: &str, secret: &str) {
        self.secrets
            .lock()
            .unwrap()
            .insert(service.to_string(), secret.to_string());
    }

    pub fn get(&self, service: &str) -> Option<String> {
        self.secrets.lock().unwrap().get(service).cloned()
    }
}

impl SecretStore for InMemorySecretStore {
    fn set_secret(&self, service: &str, secret: &str) -> Result<()> {
        self.insert(service, secret);
        Ok(())
    }

    fn get_secret(&self, service: &str) -> Result<Option<String>> {
        Ok(self.get(service))
    }

    fn delete_secret(&self, service: &str) -> Result<()> {
        self.secrets.lock().unwrap().remove(service);
        Ok(())
    }
}

#[derive(Default)]
pub struct InMemoryPlatformRepository {
    platforms: Mutex<Vec<Platform>>,
}

impl InMemoryPlatformRepository {
    pub fn with_platforms(platforms: Vec<Platform>) -> Self {
        Self {
            platforms: Mutex::new(platforms),
        }
    }
}

#[async_trait]
impl PlatformRepositoryTrait for InMemoryPlatformRepository {
    fn list(&self) -> Result<Vec<Platform>> {
        Ok(self.platforms.lock().unwrap().clone())
    }

    fn get_by_id(&self, platform_id: &str) -> Result<Option<Platform>> {
        Ok(self
            .platforms
            .lock()
            .unwrap()
            .iter()
            .find(|p| p.id == platform_id)
            .cloned())
    }

    async fn update_enabled(&self, platform_id: &str, enabled: bool) -> Result<Platform> {
        let mut platforms = self.platforms.lock().unwrap();
        let platform = platforms
            .iter_mut()
            .find(|p| p.id == platform_id)
            .ok_or_else(|| DatabaseError::NotFound(format!("Platform {}", platform_id)))?;
        platform.enabled = enabled;
        Ok(platform.clone())
    }
}

#[derive(Default)]
pub struct MockSyncService {
    calls: AtomicUsize,
    failure: Option<String>,
}

impl MockSyncService {
    pub fn failing(message: &str) -> Self {
        Self {
            calls: AtomicUsize::new(0),
            failure: Some(message.to_string()),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl BrokerSyncServiceTrait for MockSyncService {
    async fn sync_all_accounts(&self) -> Result<()> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        match &self.failure {
            Some(message) => Err(Error::Unexpected(message.clone())),
            None => Ok(()),
        }
    }
}

pub struct MockValidator {
    accept: bool,
}

impl MockValidator {
    pub fn accepting() -> Self {
        Self { accept: true }
    }

    pub fn rejecting() -> Self {
        Self { accept: false }
    }
}

#[async_trait]
impl CredentialValidator for MockValidator {
    async fn validate(&self, _platform_id: &str) -> Result<Option<serde_json::Value>> {
        if self.accept {
            Ok(Some(serde_json::json!({ "valid": true })))
        } else {
            Err(Error::ValidationFailed("Validation failed".to_string()))
        }
    }
}

/// Scriptable host. Holds the "server truth" and records every call.
///
/// Gates let a test hold a call in flight: the call waits until the sender
/// fires, then fails with the sent message or succeeds on `None`.
pub struct MockBridge {
    run_env: RunEnv,
    platforms: Mutex<Vec<PlatformSetting>>,
    secrets: Mutex<HashMap<String, String>>,
    list_failure: Mutex<Option<String>>,
    update_failure: Mutex<Option<String>>,
    secret_failure: Mutex<Option<String>>,
    get_secret_failure: Mutex<Option<String>>,
    validate_failure: Mutex<Option<String>>,
    sync_failure: Mutex<Option<String>>,
    list_gates: Mutex<VecDeque<oneshot::Receiver<Option<String>>>>,
    update_gates: Mutex<VecDeque<oneshot::Receiver<Option<String>>>>,
    list_calls: AtomicUsize,
    get_secret_calls: AtomicUsize,
    calls: Mutex<Vec<String>>,
}

impl MockBridge {
    pub fn with_platforms(platforms: Vec<PlatformSetting>) -> Self {
        Self {
            run_env: RunEnv::Desktop,
            platforms: Mutex::new(platforms),
            secrets: Mutex::new(HashMap::new()),
            list_failure: Mutex::new(None),
            update_failure: Mutex::new(None),
            secret_failure: Mutex::new(None),
            get_secret_failure: Mutex::new(None),
            validate_failure: Mutex::new(None),
            sync_failure: Mutex::new(None),
            list_gates: Mutex::new(VecDeque::new()),
            update_gates: Mutex::new(VecDeque::new()),
            list_calls: AtomicUsize::new(0),
            get_secret_calls: AtomicUsize::new(0),
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn set_server_enabled(&self, platform_id: &str, enabled: bool) {
        for p in self
            .platforms
            .lock()
            .unwrap()
            .iter_mut()
            .filter(|p| p.id == platform_id)
        {
            p.enabled = enabled;
        }
    }

    pub fn server_enabled(&self, platform_id: &str) -> Option<bool> {
        self.platforms
            .lock()
            .unwrap()
            .iter()
            .find(|p| p.id == platform_id)
            .map(|p| p.enabled)
    }

    pub fn set_server_secret(&self, platform_id: &str, secret: Option<&str>) {
        let mut secrets = self.secrets.lock().unwrap();
        match secret {
            Some(s) => secrets.insert(platform_id.to_string(), s.to_string()),
            None => secrets.remove(platform_id),
        };
    }

    pub fn fail_list(&self, message: &str) {
        *self.list_failure.lock().unwrap() = Some(message.to_string());
    }

    pub fn fail_update(&self, message: &str) {
        *self.update_failure.lock().unwrap() = Some(message.to_string());
    }

    pub fn fail_secrets(&self, message: &str) {
        *self.secret_failure.lock().unwrap() = Some(message.to_string());
    }

    pub fn fail_get_secret(&self, message: &str) {
        *self.get_secret_failure.lock().unwrap() = Some(message.to_string());
    }

    pub fn fail_validate(&self, message: &str) {
        *self.validate_failure.lock().unwrap() = Some(message.to_string());
    }

    pub fn fail_sync(&self, message: &str) {
        *self.sync_failure.lock().unwrap() = Some(message.to_string());
    }

    pub fn gate_next_list(&self) -> oneshot::Sender<Option<String>> {
        let (tx, rx) = oneshot::channel();
        self.list_gates.lock().unwrap().push_back(rx);
        tx
    }

    pub fn gate_next_update(&self) -> oneshot::Sender<Option<String>> {
        let (tx, rx) = oneshot::channel();
        self.update_gates.lock().unwrap().push_back(rx);
        tx
    }

    pub fn list_calls(&self) -> usize {
        self.list_calls.load(Ordering::SeqCst)
    }

    pub fn get_secret_calls(&self) -> usize {
        self.get_secret_calls.load(Ordering::SeqCst)
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    fn record(&self, call: String) {
        self.calls.lock().unwrap().push(call);
    }

    fn failure(slot: &Mutex<Option<String>>) -> Result<()> {
        match slot.lock().unwrap().clone() {
            Some(message) => Err(Error::Bridge(message)),
            None => Ok(()),
        }
    }

    async fn pass_gate(gates: &Mutex<VecDeque<oneshot::Receiver<Option<String>>>>) -> Result<()> {
        let gate = gates.lock().unwrap().pop_front();
        if let Some(rx) = gate {
            if let Ok(Some(message)) = rx.await {
                return Err(Error::Bridge(message));
            }
        }
        Ok(())
    }
}

#[async_trait]
impl CommandBridge for MockBridge {
    async fn list_platforms(&self) -> Result<Vec<PlatformSetting>> {
        self.list_calls.fetch_add(1, Ordering::SeqCst);
        // Snapshot before waiting, like a response already on the wire.
        let platforms = self.platforms.lock().unwrap().clone();
        Self::pass_gate(&self.list_gates).await?;
        Self::failure(&self.list_failure)?;
        Ok(platforms)
    }

    async fn update_platform(&self, platform_id: &str, enabled: bool) -> Result<PlatformSetting> {
        self.record(format!("update_platform:{}:{}", platform_id, enabled));
        Self::pass_gate(&self.update_gates).await?;
        Self::failure(&self.update_failure)?;
        self.set_server_enabled(platform_id, enabled);
        self.platforms
            .lock()
            .unwrap()
            .iter()
            .find(|p| p.id == platform_id)
            .cloned()
            .ok_or_else(|| Error::Bridge(format!("Platform {} not found", platform_id)))
    }

    async fn set_secret(&self, platform_id: &str, secret: &str) -> Result<()> {
        self.record(format!("set_secret:{}:{}", platform_id, secret));
        Self::failure(&self.secret_failure)?;
        self.set_server_secret(platform_id, Some(secret));
        Ok(())
    }

    async fn clear_secret(&self, platform_id: &str) -> Result<()> {
        self.record(format!("clear_secret:{}", platform_id));
        Self::failure(&self.secret_failure)?;
        self.set_server_secret(platform_id, None);
        Ok(())
    }

    async fn get_secret(&self, platform_id: &str) -> Result<Option<String>> {
        self.get_secret_calls.fetch_add(1, Ordering::SeqCst);
        Self::failure(&self.get_secret_failure)?;
        Ok(self.secrets.lock().unwrap().get(platform_id).cloned())
    }

    async fn sync_all(&self) -> Result<()> {
        self.record("sync_all".to_string());
        Self::failure(&self.sync_failure)
    }

    async fn validate_credentials(&self, platform_id: &str) -> Result<Option<serde_json::Value>> {
        self.record(format!("validate_credentials:{}", platform_id));
        match self.validate_failure.lock().unwrap().clone() {
            Some(message) => Err(Error::ValidationFailed(message)),
            None => Ok(None),
        }
    }

    fn run_env(&self) -> RunEnv {
        self.run_env
    }
}
