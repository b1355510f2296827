/// Prefix for the secret-store service key of a platform's credentials.
pub const PLATFORM_SECRET_PREFIX: &str = "platform_";

/// Every broker platform currently requires an API key before it can sync.
pub const PLATFORMS_REQUIRE_API_KEY: bool = true;

/// Path of the credential check endpoint, relative to the API base URL.
pub const VALIDATE_CREDENTIALS_PATH: &str = "/api/platforms/{id}/validate";
