//! In-memory cache of platform settings and secret presence.
//!
//! The cache only stores and replaces values. Keeping it consistent with the
//! host is the job of the query layer and the mutation coordinator.

mod cache_entry;
mod settings_cache;

pub use cache_entry::{CacheEntry, CacheRead};
pub use settings_cache::{CacheKey, FetchTicket, SettingsCache};
