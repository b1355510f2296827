use std::{net::SocketAddr, time::Duration};

use anyhow::Context;
use platform_settings_core::bridge::RunEnv;
use platform_settings_core::secrets::DEFAULT_SERVICE_ID_PREFIX;

pub struct Config {
    pub listen_addr: SocketAddr,
    pub db_path: String,
    pub cors_allow: Vec<String>,
    pub request_timeout: Duration,
    pub run_env: RunEnv,
    pub keyring_service_prefix: String,
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();
        let listen_addr: SocketAddr = env_or("PS_LISTEN_ADDR", "0.0.0.0:8088")
            .parse()
            .context("Invalid PS_LISTEN_ADDR")?;
        let db_path = env_or("PS_DB_PATH", "./db/platforms.db");
        let cors_allow = parse_origins(&env_or("PS_CORS_ALLOW_ORIGINS", "*"));
        let timeout_ms: u64 = env_or("PS_REQUEST_TIMEOUT_MS", "30000")
            .parse()
            .unwrap_or(30000);
        // Unknown values fall back to web.
        let run_env: RunEnv = env_or("PS_RUN_ENV", "web").parse().unwrap_or_default();
        let keyring_service_prefix = env_or("PS_KEYRING_SERVICE_PREFIX", DEFAULT_SERVICE_ID_PREFIX);

        Ok(Self {
            listen_addr,
            db_path,
            cors_allow,
            request_timeout: Duration::from_millis(timeout_ms),
            run_env,
            keyring_service_prefix,
        })
    }
}

fn env_or(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}

fn parse_origins(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_origins_trims_and_drops_empty() {
        assert_eq!(
            parse_origins(" http://a.test , ,http://b.test"),
            vec!["http://a.test", "http://b.test"]
        );
        assert_eq!(parse_origins("*"), vec!["*"]);
    }
}
