//! SQLite storage for broker platform settings.
//!
//! Implements the repository traits from `platform-settings-core` with Diesel
//! over SQLite. Reads go through a small r2d2 pool; writes are serialized
//! through a single writer actor.

pub mod db;
pub mod errors;
pub mod platforms;
pub mod schema;

// Re-export database utilities
pub use db::{
    create_pool, get_connection, init, run_migrations, spawn_writer, DbConnection, DbPool,
    WriteHandle,
};

// Re-export storage errors and conversion helpers
pub use errors::{IntoCore, StorageError};

pub use platforms::PlatformRepository;

pub use platform_settings_core::errors::{DatabaseError, Error, Result};
