//! Read-through queries over the settings cache.

use std::sync::Arc;

use log::{debug, warn};
use serde::Serialize;

use crate::bridge::CommandBridge;
use crate::cache::{CacheKey, CacheRead, SettingsCache};
use crate::platforms::PlatformSetting;

/// What the presentation layer gets back from a query.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", content = "data", rename_all = "camelCase")]
pub enum QueryState<T> {
    Loading,
    Ready(T),
    Error(String),
}

impl<T> QueryState<T> {
    pub fn ready(&self) -> Option<&T> {
        match self {
            QueryState::Ready(v) => Some(v),
            _ => None,
        }
    }
}

/// Credential status of one platform.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiKeyStatus {
    pub needs_api_key: bool,
    pub is_secret_set: bool,
}

pub struct SettingsQueries {
    bridge: Arc<dyn CommandBridge>,
    cache: Arc<SettingsCache>,
}

impl SettingsQueries {
    pub fn new(bridge: Arc<dyn CommandBridge>, cache: Arc<SettingsCache>) -> Self {
        Self { bridge, cache }
    }

    /// Cached platform list without touching the bridge.
    pub fn peek_platform_settings(&self) -> QueryState<Vec<PlatformSetting>> {
        match self.cache.read_platforms().into_value() {
            Some(platforms) => QueryState::Ready(platforms),
            None => QueryState::Loading,
        }
    }

    /// Returns the platform list, refetching when the cached one is stale or missing.
    ///
    /// A fetch that is superseded while in flight (by a newer fetch or a
    /// write) does not overwrite the cache. While a mutation on the list is
    /// pending the cached value is served as is.
    pub async fn platform_settings(&self) -> QueryState<Vec<PlatformSetting>> {
        match self.cache.read_platforms() {
            CacheRead::Fresh(platforms) => return QueryState::Ready(platforms),
            CacheRead::Stale(platforms) if self.cache.is_pending(&CacheKey::PlatformSettings) => {
                debug!("Mutation pending, serving cached platform settings");
                return QueryState::Ready(platforms);
            }
            _ => {}
        }

        let ticket = self.cache.begin_fetch(&CacheKey::PlatformSettings);
        match self.bridge.list_platforms().await {
            Ok(platforms) => {
                if self.cache.complete_platforms_fetch(&ticket, platforms.clone()) {
                    return QueryState::Ready(platforms);
                }
                // Superseded or blocked by a pending mutation: report the cached value.
                match self.cache.read_platforms().into_value() {
                    Some(current) => QueryState::Ready(current),
                    None => QueryState::Ready(platforms),
                }
            }
            Err(e) => {
                warn!("Failed to load broker platform settings: {}", e);
                QueryState::Error(e.to_string())
            }
        }
    }

    /// Secret presence for a platform. Never goes stale on its own; only an
    /// invalidation triggers a refetch.
    pub async fn api_key_status(&self, platform: &PlatformSetting) -> ApiKeyStatus {
        let needs_api_key = platform.needs_api_key();
        if !needs_api_key {
            return ApiKeyStatus {
                needs_api_key,
                is_secret_set: false,
            };
        }

        let key = CacheKey::ApiKey(platform.id.clone());
        let cached = self.cache.read_secret_presence(&platform.id);
        match cached {
            CacheRead::Fresh(is_secret_set) => {
                return ApiKeyStatus {
                    needs_api_key,
                    is_secret_set,
                }
            }
            CacheRead::Stale(is_secret_set) if self.cache.is_pending(&key) => {
                return ApiKeyStatus {
                    needs_api_key,
                    is_secret_set,
                }
            }
            _ => {}
        }

        let ticket = self.cache.begin_fetch(&key);
        match self.bridge.get_secret(&platform.id).await {
            Ok(secret) => {
                let is_set = secret.map(|s| !s.is_empty()).unwrap_or(false);
                if !self.cache.complete_secret_fetch(&ticket, is_set) {
                    debug!("Secret presence fetch for {} superseded", platform.id);
                }
                ApiKeyStatus {
                    needs_api_key,
                    is_secret_set: self
                        .cache
                        .read_secret_presence(&platform.id)
                        .into_value()
                        .unwrap_or(is_set),
                }
            }
            Err(e) => {
                warn!("Failed to load secret status for {}: {}", platform.id, e);
                ApiKeyStatus {
                    needs_api_key,
                    is_secret_set: cached.into_value().unwrap_or(false),
                }
            }
        }
    }
}
