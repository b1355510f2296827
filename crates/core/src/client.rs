//! Entry point tying the cache, queries and mutations together.

use std::sync::Arc;

use crate::bridge::{CommandBridge, RunEnv};
use crate::cache::SettingsCache;
use crate::mutations::MutationCoordinator;
use crate::notifications::NotificationSink;
use crate::presentation::{DispatchResult, PageState, SettingsPage, UserIntent};
use crate::queries::SettingsQueries;

/// Owns one settings cache for the life of the process.
///
/// Built once at start-up with the bridge chosen for the environment.
/// Dropping it drops the cache; nothing is persisted.
pub struct SettingsClient {
    bridge: Arc<dyn CommandBridge>,
    cache: Arc<SettingsCache>,
    queries: SettingsQueries,
    coordinator: Arc<MutationCoordinator>,
}

impl SettingsClient {
    pub fn new(bridge: Arc<dyn CommandBridge>, notifier: Arc<dyn NotificationSink>) -> Self {
        let cache = Arc::new(SettingsCache::new());
        let queries = SettingsQueries::new(bridge.clone(), cache.clone());
        let coordinator = Arc::new(MutationCoordinator::new(
            bridge.clone(),
            cache.clone(),
            notifier,
        ));
        Self {
            bridge,
            cache,
            queries,
            coordinator,
        }
    }

    pub fn run_env(&self) -> RunEnv {
        self.bridge.run_env()
    }

    pub fn cache(&self) -> &Arc<SettingsCache> {
        &self.cache
    }

    pub fn queries(&self) -> &SettingsQueries {
        &self.queries
    }

    pub fn coordinator(&self) -> &Arc<MutationCoordinator> {
        &self.coordinator
    }

    pub async fn page(&self) -> PageState {
        SettingsPage::new(&self.queries).load().await
    }

    pub async fn dispatch(&self, intent: UserIntent) -> DispatchResult {
        intent.dispatch(&self.coordinator).await
    }
}
