//! Credential checks over the REST validate endpoint.

use std::time::Duration;

use async_trait::async_trait;
use log::{debug, warn};
use reqwest::Client;

use crate::constants::VALIDATE_CREDENTIALS_PATH;
use crate::errors::{Error, Result};

/// Read-only credential check for a platform.
///
/// A successful check may carry an optional JSON payload from the host.
#[async_trait]
pub trait CredentialValidator: Send + Sync {
    async fn validate(&self, platform_id: &str) -> Result<Option<serde_json::Value>>;
}

pub struct HttpCredentialValidator {
    client: Client,
    base_url: String,
}

impl HttpCredentialValidator {
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| Error::Unexpected(format!("Failed to build HTTP client: {}", e)))?;
        Ok(Self {
            client,
            base_url: base_url.into(),
        })
    }

    pub fn endpoint(&self, platform_id: &str) -> String {
        let path =
            VALIDATE_CREDENTIALS_PATH.replace("{id}", &urlencoding::encode(platform_id));
        format!("{}{}", self.base_url.trim_end_matches('/'), path)
    }
}

#[async_trait]
impl CredentialValidator for HttpCredentialValidator {
    async fn validate(&self, platform_id: &str) -> Result<Option<serde_json::Value>> {
        let url = self.endpoint(platform_id);
        debug!("Validating credentials for {} via {}", platform_id, url);

        let response = self.client.post(&url).send().await?;
        if !response.status().is_success() {
            warn!(
                "Credential validation for {} rejected with status {}",
                platform_id,
                response.status()
            );
            return Err(Error::ValidationFailed("Validation failed".to_string()));
        }

        // An empty or non-JSON body still counts as a successful check.
        Ok(response.json::<serde_json::Value>().await.ok())
    }
}
