use std::sync::Arc;

use platform_settings_core::bridge::RunEnv;
use platform_settings_core::platforms::{PlatformService, PlatformServiceTrait};
use platform_settings_core::secrets::SecretStore;
use platform_settings_storage_sqlite::{db, PlatformRepository};
use tracing_subscriber::prelude::*;
use tracing_subscriber::{fmt, EnvFilter};

use crate::{config::Config, secrets::build_secret_store};

pub struct AppState {
    pub platform_service: Arc<dyn PlatformServiceTrait>,
    pub run_env: RunEnv,
}

pub fn init_tracing() {
    let log_format = std::env::var("PS_LOG_FORMAT").unwrap_or_else(|_| "text".to_string());
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let registry = tracing_subscriber::registry().with(filter);

    if log_format.eq_ignore_ascii_case("json") {
        registry
            .with(fmt::layer().json().with_current_span(false))
            .init();
    } else {
        registry
            .with(fmt::layer().with_target(true).with_line_number(true))
            .init();
    }
}

/// Wires storage and the OS keyring into the shared application state.
pub async fn build_state(config: &Config) -> anyhow::Result<Arc<AppState>> {
    let secret_store = build_secret_store(&config.keyring_service_prefix);
    build_state_with_secret_store(config, secret_store).await
}

/// Same as [`build_state`] with a caller-provided secret backend.
pub async fn build_state_with_secret_store(
    config: &Config,
    secret_store: Arc<dyn SecretStore>,
) -> anyhow::Result<Arc<AppState>> {
    let db_path = db::init(&config.db_path)?;
    tracing::info!("Database path in use: {}", db_path);

    let pool = db::create_pool(&db_path)?;
    db::run_migrations(&pool)?;
    let writer = db::spawn_writer(&pool)?;

    let repository = Arc::new(PlatformRepository::new(pool, writer));
    let platform_service: Arc<dyn PlatformServiceTrait> =
        Arc::new(PlatformService::new(repository, secret_store));

    tracing::info!("Host environment: {}", config.run_env);

    Ok(Arc::new(AppState {
        platform_service,
        run_env: config.run_env,
    }))
}
