//! SQLite storage implementation for broker platforms.

mod model;
mod repository;

pub use model::PlatformDB;
pub use repository::PlatformRepository;
