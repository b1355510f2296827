//! Platform Settings Core - broker platform settings kept consistent with the host.
//!
//! The crate holds the domain model and host-side service for broker
//! platforms, plus the client side that keeps an in-memory cache of those
//! settings in step with the host while the user edits them:
//!
//! - [`bridge`]: host commands behind an environment-selected strategy
//! - [`cache`]: keyed in-memory slots with fetch supersession
//! - [`queries`]: read-through loading of the cache
//! - [`mutations`]: optimistic writes with commit/rollback
//! - [`presentation`]: ordering and derived view data for the settings screen

pub mod bridge;
pub mod cache;
pub mod client;
pub mod constants;
pub mod errors;
pub mod mutations;
pub mod notifications;
pub mod platforms;
pub mod presentation;
pub mod queries;
pub mod secrets;
pub mod sync;

#[cfg(test)]
mod test_support;

pub use client::SettingsClient;

// Re-export error types
pub use errors::Error;
pub use errors::Result;
