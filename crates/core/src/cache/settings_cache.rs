use std::fmt;
use std::sync::{Mutex, MutexGuard};

use dashmap::DashMap;
use log::debug;

use crate::platforms::PlatformSetting;

use super::cache_entry::{CacheEntry, CacheRead};

/// Named cache slots.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum CacheKey {
    /// The full platform list.
    PlatformSettings,
    /// Whether a secret is stored for the given platform id.
    ApiKey(String),
}

impl fmt::Display for CacheKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CacheKey::PlatformSettings => f.write_str("broker_platform_settings"),
            CacheKey::ApiKey(id) => write!(f, "secrets.api_key.{}", id),
        }
    }
}

/// Handle for an in-flight fetch. Completing a superseded ticket is a no-op.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchTicket {
    key: CacheKey,
    generation: u64,
}

impl FetchTicket {
    pub fn key(&self) -> &CacheKey {
        &self.key
    }
}

/// Process-wide cache of platform settings and per-platform secret presence.
///
/// Starts empty and is never persisted. Only presence of a secret is kept,
/// never its value.
#[derive(Default)]
pub struct SettingsCache {
    platforms: Mutex<CacheEntry<Vec<PlatformSetting>>>,
    secret_presence: DashMap<String, CacheEntry<bool>>,
}

impl SettingsCache {
    pub fn new() -> Self {
        Self::default()
    }

    fn platforms_entry(&self) -> MutexGuard<'_, CacheEntry<Vec<PlatformSetting>>> {
        self.platforms
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    pub fn read_platforms(&self) -> CacheRead<Vec<PlatformSetting>> {
        self.platforms_entry().read()
    }

    pub fn write_platforms(&self, platforms: Vec<PlatformSetting>) {
        self.platforms_entry().write(platforms);
    }

    /// Applies `f` to the cached list. Returns false when no list is cached.
    pub fn update_platforms<F>(&self, f: F) -> bool
    where
        F: FnOnce(&mut Vec<PlatformSetting>),
    {
        self.platforms_entry().update(f)
    }

    /// Cached `enabled` flag of one platform, if the list and the platform are cached.
    pub fn platform_enabled(&self, platform_id: &str) -> Option<bool> {
        self.platforms_entry()
            .read()
            .into_value()?
            .iter()
            .find(|p| p.id == platform_id)
            .map(|p| p.enabled)
    }

    pub fn read_secret_presence(&self, platform_id: &str) -> CacheRead<bool> {
        self.secret_presence
            .get(platform_id)
            .map(|entry| entry.read())
            .unwrap_or(CacheRead::Pending)
    }

    pub fn write_secret_presence(&self, platform_id: &str, is_set: bool) {
        self.secret_presence
            .entry(platform_id.to_string())
            .or_default()
            .write(is_set);
    }

    /// Puts back a presence flag captured earlier. `None` returns the slot to
    /// the never-loaded state.
    pub fn restore_secret_presence(&self, platform_id: &str, snapshot: Option<bool>) {
        match snapshot {
            Some(is_set) => self.write_secret_presence(platform_id, is_set),
            None => {
                if let Some(mut entry) = self.secret_presence.get_mut(platform_id) {
                    entry.reset();
                }
            }
        }
    }

    pub fn invalidate(&self, key: &CacheKey) {
        debug!("Invalidating cache key {}", key);
        match key {
            CacheKey::PlatformSettings => self.platforms_entry().invalidate(),
            CacheKey::ApiKey(id) => {
                if let Some(mut entry) = self.secret_presence.get_mut(id) {
                    entry.invalidate();
                }
            }
        }
    }

    pub fn begin_fetch(&self, key: &CacheKey) -> FetchTicket {
        let generation = match key {
            CacheKey::PlatformSettings => self.platforms_entry().begin_fetch(),
            CacheKey::ApiKey(id) => self
                .secret_presence
                .entry(id.clone())
                .or_default()
                .begin_fetch(),
        };
        FetchTicket {
            key: key.clone(),
            generation,
        }
    }

    pub fn cancel_fetches(&self, key: &CacheKey) {
        match key {
            CacheKey::PlatformSettings => self.platforms_entry().cancel_fetches(),
            CacheKey::ApiKey(id) => {
                if let Some(mut entry) = self.secret_presence.get_mut(id) {
                    entry.cancel_fetches();
                }
            }
        }
    }

    /// Stores a fetched platform list. Returns false if the fetch was superseded.
    pub fn complete_platforms_fetch(
        &self,
        ticket: &FetchTicket,
        platforms: Vec<PlatformSetting>,
    ) -> bool {
        if ticket.key != CacheKey::PlatformSettings {
            return false;
        }
        let applied = self
            .platforms_entry()
            .complete_fetch(ticket.generation, platforms);
        if !applied {
            debug!("Discarding superseded fetch for {}", ticket.key);
        }
        applied
    }

    /// Stores a fetched presence flag. Returns false if the fetch was superseded.
    pub fn complete_secret_fetch(&self, ticket: &FetchTicket, is_set: bool) -> bool {
        let CacheKey::ApiKey(id) = &ticket.key else {
            return false;
        };
        let applied = self
            .secret_presence
            .entry(id.clone())
            .or_default()
            .complete_fetch(ticket.generation, is_set);
        if !applied {
            debug!("Discarding superseded fetch for {}", ticket.key);
        }
        applied
    }

    pub fn mark_pending(&self, key: &CacheKey) {
        match key {
            CacheKey::PlatformSettings => self.platforms_entry().mark_pending(),
            CacheKey::ApiKey(id) => self
                .secret_presence
                .entry(id.clone())
                .or_default()
                .mark_pending(),
        }
    }

    pub fn settle_pending(&self, key: &CacheKey) {
        match key {
            CacheKey::PlatformSettings => self.platforms_entry().settle_pending(),
            CacheKey::ApiKey(id) => {
                if let Some(mut entry) = self.secret_presence.get_mut(id) {
                    entry.settle_pending();
                }
            }
        }
    }

    pub fn is_pending(&self, key: &CacheKey) -> bool {
        match key {
            CacheKey::PlatformSettings => self.platforms_entry().is_pending(),
            CacheKey::ApiKey(id) => self
                .secret_presence
                .get(id)
                .map(|entry| entry.is_pending())
                .unwrap_or(false),
        }
    }
}
