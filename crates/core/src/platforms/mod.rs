//! Broker platforms and their user-facing settings.

pub mod platforms_model;
pub mod platforms_service;
pub mod platforms_traits;

#[cfg(test)]
mod platforms_service_tests;

pub use platforms_model::{Platform, PlatformSetting};
pub use platforms_service::PlatformService;
pub use platforms_traits::{PlatformRepositoryTrait, PlatformServiceTrait};
