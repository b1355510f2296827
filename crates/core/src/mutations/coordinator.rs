use std::future::Future;
use std::sync::Arc;

use log::{debug, info, warn};

use crate::bridge::CommandBridge;
use crate::cache::{CacheKey, SettingsCache};
use crate::errors::Result;
use crate::notifications::{Notification, NotificationSink};
use crate::platforms::PlatformSetting;

use super::mutation_state::{MutationKey, MutationOutcome, MutationState};

/// Runs state-changing host calls with optimistic cache updates.
///
/// Every optimistic mutation snapshots the affected value, writes the new
/// value to the cache, calls the host, then either commits or restores the
/// snapshot. The affected key is invalidated once the call settles either way.
///
/// Mutations on the same [`MutationKey`] are not serialized. Each failure
/// restores its own snapshot, so the last one to settle decides the cached
/// value; the final invalidation then reconciles the cache with the host.
pub struct MutationCoordinator {
    bridge: Arc<dyn CommandBridge>,
    cache: Arc<SettingsCache>,
    notifier: Arc<dyn NotificationSink>,
}

impl MutationCoordinator {
    pub fn new(
        bridge: Arc<dyn CommandBridge>,
        cache: Arc<SettingsCache>,
        notifier: Arc<dyn NotificationSink>,
    ) -> Self {
        Self {
            bridge,
            cache,
            notifier,
        }
    }

    pub fn cache(&self) -> &Arc<SettingsCache> {
        &self.cache
    }

    /// Enables or disables a platform.
    pub async fn toggle_enabled(
        &self,
        platform_id: &str,
        enabled: bool,
    ) -> MutationOutcome<PlatformSetting> {
        let snapshot = self.cache.platform_enabled(platform_id);
        let outcome = self
            .run_optimistic(
                MutationKey::enabled(platform_id),
                CacheKey::PlatformSettings,
                snapshot,
                |cache| {
                    cache.update_platforms(|list| set_enabled(list, platform_id, enabled));
                },
                |cache, snapshot| match snapshot {
                    Some(previous) => {
                        cache.update_platforms(|list| set_enabled(list, platform_id, previous))
                    }
                    None => false,
                },
                self.bridge.update_platform(platform_id, enabled),
            )
            .await;

        match &outcome {
            MutationOutcome::Committed(updated) => {
                self.cache.invalidate(&CacheKey::PlatformSettings);
                self.notifier.notify(
                    Notification::success(format!(
                        "{} settings updated successfully.",
                        updated.display_name()
                    ))
                    .for_platform(platform_id),
                );
            }
            MutationOutcome::RolledBack { error, .. } | MutationOutcome::Failed(error) => {
                self.notifier.notify(
                    Notification::error(
                        format!("Failed to update platform {}", platform_id),
                        error.to_string(),
                    )
                    .for_platform(platform_id),
                );
            }
        }
        outcome
    }

    /// Stores an API key. A blank key clears the stored one instead; an empty
    /// secret is never sent to the store.
    pub async fn set_api_key(&self, platform_id: &str, api_key: &str) -> MutationOutcome<()> {
        if api_key.trim().is_empty() {
            debug!("Blank API key for {}, clearing instead", platform_id);
            return self.clear_api_key(platform_id).await;
        }

        let outcome = self
            .secret_mutation(platform_id, true, self.bridge.set_secret(platform_id, api_key))
            .await;
        self.notify_secret_outcome(
            platform_id,
            &outcome,
            "API Key saved successfully.",
            "Failed to save API key",
        );
        outcome
    }

    pub async fn clear_api_key(&self, platform_id: &str) -> MutationOutcome<()> {
        let outcome = self
            .secret_mutation(platform_id, false, self.bridge.clear_secret(platform_id))
            .await;
        self.notify_secret_outcome(
            platform_id,
            &outcome,
            "API Key deleted successfully.",
            "Failed to delete API key",
        );
        outcome
    }

    /// Read-only credential check. Never touches the cache.
    pub async fn validate_credentials(
        &self,
        platform_id: &str,
    ) -> MutationOutcome<Option<serde_json::Value>> {
        match self.bridge.validate_credentials(platform_id).await {
            Ok(body) => {
                self.notifier.notify(
                    Notification::success("Credentials are valid.").for_platform(platform_id),
                );
                MutationOutcome::Committed(body)
            }
            Err(e) => {
                self.notifier.notify(
                    Notification::error("Validation failed", e.to_string())
                        .for_platform(platform_id),
                );
                MutationOutcome::Failed(e)
            }
        }
    }

    /// Triggers the bulk broker sync. The cache is left alone; later reads
    /// pick up whatever the sync changed.
    pub async fn sync_all(&self) -> MutationOutcome<()> {
        match self.bridge.sync_all().await {
            Ok(()) => {
                info!("Broker sync triggered");
                self.notifier
                    .notify(Notification::success("Broker sync started."));
                MutationOutcome::Committed(())
            }
            Err(e) => {
                self.notifier
                    .notify(Notification::error("Failed to sync brokers", e.to_string()));
                MutationOutcome::Failed(e)
            }
        }
    }

    /// Fire-and-forget variant of [`Self::sync_all`].
    pub fn spawn_sync_all(self: &Arc<Self>) -> tokio::task::JoinHandle<MutationOutcome<()>> {
        let coordinator = Arc::clone(self);
        tokio::spawn(async move { coordinator.sync_all().await })
    }

    async fn secret_mutation<F>(
        &self,
        platform_id: &str,
        is_set: bool,
        call: F,
    ) -> MutationOutcome<()>
    where
        F: Future<Output = Result<()>>,
    {
        let snapshot = self.cache.read_secret_presence(platform_id).into_value();
        let outcome = self
            .run_optimistic(
                MutationKey::secret(platform_id),
                CacheKey::ApiKey(platform_id.to_string()),
                snapshot,
                |cache| cache.write_secret_presence(platform_id, is_set),
                |cache, snapshot| {
                    cache.restore_secret_presence(platform_id, snapshot);
                    true
                },
                call,
            )
            .await;

        if outcome.is_committed() {
            self.cache.invalidate(&CacheKey::PlatformSettings);
            self.cache
                .invalidate(&CacheKey::ApiKey(platform_id.to_string()));
        }
        outcome
    }

    fn notify_secret_outcome(
        &self,
        platform_id: &str,
        outcome: &MutationOutcome<()>,
        success_title: &str,
        error_title: &str,
    ) {
        let notification = match outcome.error() {
            None => Notification::success(success_title),
            Some(e) => Notification::error(error_title, e.to_string()),
        };
        self.notifier.notify(notification.for_platform(platform_id));
    }

    async fn run_optimistic<S, T, F>(
        &self,
        key: MutationKey,
        cache_key: CacheKey,
        snapshot: S,
        apply: impl FnOnce(&SettingsCache),
        restore: impl FnOnce(&SettingsCache, S) -> bool,
        call: F,
    ) -> MutationOutcome<T>
    where
        F: Future<Output = Result<T>>,
    {
        let state = match MutationState::Idle.begin(snapshot) {
            Ok(state) => state,
            Err(e) => return MutationOutcome::Failed(e),
        };

        // In-flight reads would land on top of the optimistic value.
        self.cache.cancel_fetches(&cache_key);
        self.cache.mark_pending(&cache_key);
        apply(&self.cache);
        debug!("Optimistic write applied for {}", key);

        let result = call.await;

        let outcome = match result {
            Ok(value) => match state.commit() {
                Ok(_) => {
                    info!("Mutation {} committed", key);
                    MutationOutcome::Committed(value)
                }
                Err(e) => MutationOutcome::Failed(e),
            },
            Err(error) => match state.rollback() {
                Ok((_, snapshot)) => {
                    let restored = restore(&self.cache, snapshot);
                    warn!("Mutation {} rolled back: {}", key, error);
                    MutationOutcome::RolledBack { error, restored }
                }
                Err(e) => MutationOutcome::Failed(e),
            },
        };

        self.cache.settle_pending(&cache_key);
        self.cache.invalidate(&cache_key);
        outcome
    }
}

fn set_enabled(platforms: &mut [PlatformSetting], platform_id: &str, enabled: bool) {
    for platform in platforms.iter_mut().filter(|p| p.id == platform_id) {
        platform.enabled = enabled;
    }
}
